use super::Optimizer;

/// Gradient descent optimization algorithm.
#[derive(Debug, Clone, Copy)]
pub struct GradientDescent {
    learning_rate: f32,
}

impl GradientDescent {
    /// Returns a new `GradientDescent`.
    ///
    /// # Arguments
    /// * `learning_rate` - The *length* of the steps taken on `update_params`.
    pub fn new(learning_rate: f32) -> Self {
        Self { learning_rate }
    }
}

impl Optimizer for GradientDescent {
    /// Makes a step in the opposite direction of the gradient, with a length of `learning_rate`.
    fn update_params(&mut self, params: &mut [f32], grad: &[f32]) {
        let lr = self.learning_rate;

        for (w, g) in params.iter_mut().zip(grad) {
            *w -= lr * g;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_against_the_gradient() {
        let mut optimizer = GradientDescent::new(0.5);
        let mut params = [1.0, -2.0, 0.0];

        optimizer.update_params(&mut params, &[2.0, -4.0, 0.0]);

        assert_eq!(params, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn minimizes_a_parabola() {
        // f(w) = (w - 3)², f'(w) = 2 (w - 3)
        let mut optimizer = GradientDescent::new(0.1);
        let mut params = [0.0];

        for _ in 0..200 {
            let grad = [2.0 * (params[0] - 3.0)];
            optimizer.update_params(&mut params, &grad);
        }

        assert!((params[0] - 3.0).abs() < 1e-4);
    }
}
