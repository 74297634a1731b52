use std::path::PathBuf;

/// The fixed settings of a purchase prediction run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentConfig {
    /// Rows of synthetic customer data to generate.
    pub n_samples: usize,
    /// Columns of the feature matrix.
    pub n_features: usize,
    /// Drives both the data generation and the train/test split.
    pub seed: u64,
    /// Fraction of the rows held out for evaluation.
    pub test_size: f64,
    /// Where the fitted model is written.
    pub model_path: PathBuf,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            n_samples: 1000,
            n_features: 4,
            seed: 42,
            test_size: 0.2,
            model_path: PathBuf::from("trained_model.bin"),
        }
    }
}
