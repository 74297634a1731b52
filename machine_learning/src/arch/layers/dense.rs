use ndarray::{linalg, prelude::*};

use crate::{MlErr, Result, arch::Model};

/// A fully connected linear layer, `z = x · W + b`.
///
/// The layer doesn't own its parameters, they are read from a flat slice laid out as the
/// row-major `(n_in, n_out)` weight matrix followed by the `n_out` biases. Gradients are written
/// with the same layout.
#[derive(Debug, Clone)]
pub struct Dense {
    dim: (usize, usize),
    size: usize,
    bias: bool,

    // Forward metadata
    x: Array2<f32>,
    z: Array2<f32>,
}

impl Dense {
    /// Creates a new `Dense` layer.
    ///
    /// # Arguments
    /// * `dim` - The amount of inputs and outputs.
    /// * `bias` - Whether the biases are trained, when `false` they are left untouched.
    pub fn new(dim: (usize, usize), bias: bool) -> Self {
        Self {
            dim,
            size: (dim.0 + 1) * dim.1,
            bias,
            x: Array2::zeros((0, dim.0)),
            z: Array2::zeros((0, dim.1)),
        }
    }

    /// Returns the amount of weights, the biases come right after them.
    fn weights_len(&self) -> usize {
        self.size - self.dim.1
    }

    /// Gives a view of the raw parameter slice as the weights and biases of this layer.
    ///
    /// # Arguments
    /// * `params` - A slice of parameters.
    ///
    /// # Returns
    /// A tuple containing the weights and biases.
    pub fn view_params<'a>(
        &self,
        params: &'a [f32],
    ) -> Result<(ArrayView2<'a, f32>, ArrayView1<'a, f32>)> {
        self.check_len("params", params.len())?;

        let (w_raw, b_raw) = params.split_at(self.weights_len());
        let weights = ArrayView2::from_shape(self.dim, w_raw).map_err(|_| self.mismatch(w_raw))?;
        let biases = ArrayView1::from(b_raw);
        Ok((weights, biases))
    }

    /// Gives a view of the raw gradient slice as the delta weights and delta biases of this layer.
    ///
    /// # Arguments
    /// * `grad` - A gradient slice.
    ///
    /// # Returns
    /// A tuple containing the delta weights and delta biases.
    fn view_grad<'a>(
        &self,
        grad: &'a mut [f32],
    ) -> Result<(ArrayViewMut2<'a, f32>, ArrayViewMut1<'a, f32>)> {
        self.check_len("grad", grad.len())?;

        let (dw_raw, db_raw) = grad.split_at_mut(self.weights_len());
        let got = dw_raw.len();
        let dw = ArrayViewMut2::from_shape(self.dim, dw_raw).map_err(|_| MlErr::SizeMismatch {
            what: "grad",
            got,
            expected: self.weights_len(),
        })?;
        let db = ArrayViewMut1::from(db_raw);
        Ok((dw, db))
    }

    fn check_len(&self, what: &'static str, got: usize) -> Result<()> {
        if got != self.size {
            return Err(MlErr::SizeMismatch {
                what,
                got,
                expected: self.size,
            });
        }

        Ok(())
    }

    fn mismatch(&self, raw: &[f32]) -> MlErr {
        MlErr::SizeMismatch {
            what: "weights",
            got: raw.len(),
            expected: self.weights_len(),
        }
    }
}

impl Model for Dense {
    fn size(&self) -> usize {
        self.size
    }

    fn forward(&mut self, params: &[f32], x: ArrayView2<f32>) -> Result<ArrayView2<'_, f32>> {
        if x.ncols() != self.dim.0 {
            return Err(MlErr::SizeMismatch {
                what: "input features",
                got: x.ncols(),
                expected: self.dim.0,
            });
        }

        let (w, b) = self.view_params(params)?;
        let shape = (x.nrows(), self.dim.1);

        if self.z.dim() != shape {
            self.z = Array2::zeros(shape);
        }

        linalg::general_mat_mul(1.0, &x, &w, 0.0, &mut self.z);
        if self.bias {
            self.z += &b;
        }

        if self.x.dim() == x.dim() {
            self.x.assign(&x);
        } else {
            self.x = x.to_owned();
        }

        Ok(self.z.view())
    }

    fn backward(&mut self, params: &[f32], grad: &mut [f32], d: ArrayView2<f32>) -> Result<()> {
        self.check_len("params", params.len())?;

        if d.dim() != self.z.dim() {
            return Err(MlErr::SizeMismatch {
                what: "deltas",
                got: d.nrows(),
                expected: self.z.nrows(),
            });
        }

        let (mut dw, mut db) = self.view_grad(grad)?;
        linalg::general_mat_mul(1.0, &self.x.t(), &d, 0.0, &mut dw);

        if self.bias {
            db.assign(&d.sum_axis(Axis(0)));
        } else {
            db.fill(0.0);
        }

        Ok(())
    }

    fn weight_decay(&self, params: &[f32], grad: &mut [f32], alpha: f32) -> f32 {
        let n = self.weights_len();
        let mut sq_norm = 0.0;

        for (g, w) in grad.iter_mut().zip(params).take(n) {
            *g += alpha * w;
            sq_norm += w * w;
        }

        0.5 * alpha * sq_norm
    }
}
