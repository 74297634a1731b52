use log::{debug, warn};
use ndarray::ArrayView2;
use rand::{Rng, seq::SliceRandom};

use super::TrainingSchedule;
use crate::{
    MlErr, Result,
    arch::{Model, loss::LossFn},
    dataset::Dataset,
    optimization::Optimizer,
};

/// The outcome of a `ModelTrainer::train` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainReport {
    /// The amount of epochs that were run.
    pub epochs: usize,
    /// The regularized loss of the last epoch.
    pub loss: f32,
    /// Whether the gradient fell below the tolerance before running out of epochs.
    pub converged: bool,
}

/// A model `Trainer`. Contains the relevant components needed for training a model,
/// including the model itself.
pub struct ModelTrainer<M, O, L, R>
where
    M: Model,
    O: Optimizer,
    L: LossFn,
    R: Rng,
{
    model: M,
    optimizer: O,
    loss_fn: L,
    schedule: TrainingSchedule,
    grad: Vec<f32>,
    rng: R,
}

impl<M, O, L, R> ModelTrainer<M, O, L, R>
where
    M: Model,
    O: Optimizer,
    L: LossFn,
    R: Rng,
{
    /// Returns a new `ModelTrainer`.
    ///
    /// # Arguments
    /// * `model` - The model that will be trained.
    /// * `optimizer` - The optimizer that dictates how to update the parameters on each step.
    /// * `loss_fn` - The loss function used to measure the difference between a model's output and the expected one.
    /// * `schedule` - Epoch limit, batch size, stopping tolerance and regularization.
    /// * `rng` - A random number generator, used to shuffle the rows between epochs when mini-batching.
    pub fn new(model: M, optimizer: O, loss_fn: L, schedule: TrainingSchedule, rng: R) -> Self {
        Self {
            grad: vec![0.0; model.size()],
            model,
            optimizer,
            loss_fn,
            schedule,
            rng,
        }
    }

    /// Trains the model on the whole dataset until the gradient vanishes or the epochs run out.
    /// **`params` gets updated** on every step.
    ///
    /// # Arguments
    /// * `params` - The model's parameters, used as the starting point.
    /// * `dataset` - The training data.
    ///
    /// # Returns
    /// A report of the training or an error if the parameters or data don't fit the model.
    pub fn train(&mut self, params: &mut [f32], dataset: &Dataset) -> Result<TrainReport> {
        if params.len() != self.model.size() {
            return Err(MlErr::SizeMismatch {
                what: "params",
                got: params.len(),
                expected: self.model.size(),
            });
        }

        if dataset.is_empty() {
            return Err(MlErr::EmptyDataset);
        }

        let TrainingSchedule {
            max_epochs,
            batch_size,
            tol,
            ..
        } = self.schedule;

        let targets = dataset.targets();
        let mut order: Vec<usize> = (0..dataset.len()).collect();
        let mut report = TrainReport {
            epochs: 0,
            loss: f32::INFINITY,
            converged: false,
        };

        for epoch in 1..=max_epochs.get() {
            let loss = match batch_size {
                None => self.step(params, dataset.x(), targets.view())?,
                Some(batch_size) => {
                    order.shuffle(&mut self.rng);

                    let mut total_loss = 0.0;
                    let mut num_batches = 0;
                    for batch in dataset.batches(&order, batch_size) {
                        total_loss += self.step(params, batch.x(), batch.targets().view())?;
                        num_batches += 1;
                    }

                    total_loss / num_batches as f32
                }
            };

            report.epochs = epoch;
            report.loss = loss;

            let grad_max = self.grad.iter().fold(0.0f32, |max, g| max.max(g.abs()));
            debug!("epoch {epoch}: loss {loss:.6}, max |grad| {grad_max:.6}");

            if grad_max <= tol {
                report.converged = true;
                break;
            }
        }

        if !report.converged {
            warn!(
                "training did not converge after {} epochs (loss {:.6}), consider more epochs or a larger learning rate",
                report.epochs, report.loss
            );
        }

        Ok(report)
    }

    /// Runs one optimization step over a batch.
    ///
    /// # Returns
    /// The regularized loss of the batch, measured before the update.
    fn step(
        &mut self,
        params: &mut [f32],
        x: ArrayView2<f32>,
        targets: ArrayView2<f32>,
    ) -> Result<f32> {
        self.grad.fill(0.0);

        let y_pred = self.model.forward(params, x)?;
        let mut loss = self.loss_fn.loss(y_pred, targets);
        let d = self.loss_fn.loss_prime(y_pred, targets);

        self.model.backward(params, &mut self.grad, d.view())?;
        loss += self
            .model
            .weight_decay(params, &mut self.grad, self.schedule.l2);

        self.optimizer.update_params(params, &self.grad);
        Ok(loss)
    }
}
