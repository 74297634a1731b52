use ndarray::{Array2, ArrayView2, Zip};

use super::LossFn;
use crate::arch::activations::Sigmoid;

/// Binary cross-entropy evaluated directly on logits.
///
/// For a logit `z` and a target `y` in {0, 1} the per-sample loss is `softplus(z) - y * z`, which
/// equals `-y * ln(σ(z)) - (1 - y) * ln(1 - σ(z))` without ever taking the log of a saturated
/// probability. The batch loss is the mean.
#[derive(Default, Clone, Copy, Debug)]
pub struct LogLoss;

fn softplus(z: f32) -> f32 {
    z.max(0.0) + (-z.abs()).exp().ln_1p()
}

impl LossFn for LogLoss {
    fn loss(&self, y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> f32 {
        if y_pred.is_empty() {
            return 0.0;
        }

        let total = Zip::from(&y_pred)
            .and(&y)
            .fold(0.0, |acc, &z, &t| acc + softplus(z) - t * z);

        total / y_pred.len() as f32
    }

    fn loss_prime(&self, y_pred: ArrayView2<f32>, y: ArrayView2<f32>) -> Array2<f32> {
        let n = y_pred.len() as f32;
        Zip::from(&y_pred)
            .and(&y)
            .map_collect(|&z, &t| (Sigmoid.f(z) - t) / n)
    }
}
