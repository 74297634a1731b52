/// An algorithm that updates a model's parameters given the gradient of the loss.
pub trait Optimizer {
    /// Takes one step, modifying `params` in place.
    ///
    /// # Arguments
    /// * `params` - The parameters that are going to be modified.
    /// * `grad` - The gradient of the loss at `params`, with the same layout.
    fn update_params(&mut self, params: &mut [f32], grad: &[f32]);
}
