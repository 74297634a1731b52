mod split;
mod synthetic;

use std::num::NonZeroUsize;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2, Axis};

use crate::{MlErr, Result};

pub use split::{Split, SplitSize, train_test_split};
pub use synthetic::SyntheticClassification;

/// An in-memory tabular dataset: a feature matrix with one row per sample and the
/// class label of each sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    x: Array2<f32>,
    y: Array1<usize>,
}

impl Dataset {
    /// Creates a new `Dataset`.
    ///
    /// # Arguments
    /// * `x` - The feature matrix, shaped `(samples, features)`.
    /// * `y` - The label of each sample.
    ///
    /// # Returns
    /// A new `Dataset` or an error if the amount of rows and labels differ.
    pub fn new(x: Array2<f32>, y: Array1<usize>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(MlErr::SizeMismatch {
                what: "labels",
                got: y.len(),
                expected: x.nrows(),
            });
        }

        Ok(Self { x, y })
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    /// Returns the amount of columns of the feature matrix.
    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    pub fn x(&self) -> ArrayView2<'_, f32> {
        self.x.view()
    }

    pub fn y(&self) -> ArrayView1<'_, usize> {
        self.y.view()
    }

    /// Returns the labels as a single `f32` column, the shape the loss functions expect.
    pub fn targets(&self) -> Array2<f32> {
        self.y
            .mapv(|label| label as f32)
            .insert_axis(Axis(1))
    }

    /// Gathers the given rows, in the given order, into a new `Dataset`.
    ///
    /// # Panics
    /// If any index is out of bounds.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            x: self.x.select(Axis(0), indices),
            y: self.y.select(Axis(0), indices),
        }
    }

    /// Walks the dataset in batches following a row ordering.
    ///
    /// # Arguments
    /// * `order` - The row indices, in the order they should be visited.
    /// * `batch_size` - The amount of rows per batch, the last one may be shorter.
    pub fn batches<'a>(
        &'a self,
        order: &'a [usize],
        batch_size: NonZeroUsize,
    ) -> impl Iterator<Item = Dataset> + 'a {
        order
            .chunks(batch_size.get())
            .map(move |indices| self.select(indices))
    }
}
