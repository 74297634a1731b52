use std::num::NonZeroUsize;

/// How long and on what data each optimization step of a `ModelTrainer` runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingSchedule {
    /// The maximum amount of passes over the dataset.
    pub max_epochs: NonZeroUsize,
    /// Rows per optimization step, `None` means the whole dataset (full batch).
    pub batch_size: Option<NonZeroUsize>,
    /// Training stops once no gradient component is larger than this in absolute value.
    pub tol: f32,
    /// The L2 regularization strength applied to the model's weights.
    pub l2: f32,
}
