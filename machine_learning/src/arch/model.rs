use ndarray::ArrayView2;

use crate::Result;

/// A differentiable model whose parameters live outside of it, in a flat `f32` slice.
pub trait Model {
    /// Returns the amount of parameters in the model.
    fn size(&self) -> usize;

    /// Makes a forward pass, keeping whatever the backward pass will need.
    ///
    /// # Arguments
    /// * `params` - The model's parameters.
    /// * `x` - The input data, one sample per row.
    ///
    /// # Returns
    /// The model's output for each sample or an error if the shapes don't fit.
    fn forward(&mut self, params: &[f32], x: ArrayView2<f32>) -> Result<ArrayView2<'_, f32>>;

    /// Computes the gradient of the loss with respect to the parameters, given the gradient of the
    /// loss with respect to the output of the last `forward` call.
    ///
    /// # Arguments
    /// * `params` - The model's parameters.
    /// * `grad` - A buffer of the same size as `params` where the gradient is written.
    /// * `d` - The derivative of the loss with respect to the model's output.
    fn backward(&mut self, params: &[f32], grad: &mut [f32], d: ArrayView2<f32>) -> Result<()>;

    /// Applies L2 regularization: adds `alpha * w` to the gradient of every weight.
    ///
    /// # Returns
    /// The penalty term `alpha / 2 * ||w||²` to add to the loss.
    fn weight_decay(&self, params: &[f32], grad: &mut [f32], alpha: f32) -> f32;
}
