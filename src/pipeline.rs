use std::path::PathBuf;

use anyhow::{Context, Result};
use log::info;
use machine_learning::{
    dataset::{Split, SplitSize, SyntheticClassification, train_test_split},
    linear::{LogisticRegression, LogisticRegressionParams},
    metrics::accuracy_score,
    persistence,
};

use crate::ExperimentConfig;

/// Everything a run produced.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub split: Split,
    /// Accuracy on the held out rows, in [0, 1].
    pub accuracy: f32,
    pub model: LogisticRegression,
    pub model_path: PathBuf,
}

/// Generates the data, fits a logistic regression on the training rows, evaluates it on the
/// test rows and saves it to `config.model_path`.
///
/// # Arguments
/// * `config` - The settings of the run.
///
/// # Returns
/// The outcome of the run or the first stage that failed.
pub fn run(config: &ExperimentConfig) -> Result<Outcome> {
    let generator = SyntheticClassification {
        n_samples: config.n_samples,
        n_features: config.n_features,
        seed: Some(config.seed),
        ..Default::default()
    };
    let dataset = generator
        .generate()
        .context("failed to generate the synthetic dataset")?;
    info!(
        "generated {} samples with {} features",
        dataset.len(),
        dataset.n_features()
    );

    let split = train_test_split(
        &dataset,
        SplitSize::Fraction(config.test_size),
        Some(config.seed),
    )
    .context("failed to split the dataset")?;
    info!(
        "split into {} train and {} test samples",
        split.train.len(),
        split.test.len()
    );

    let model = LogisticRegressionParams::default()
        .fit(&split.train)
        .context("failed to fit the model")?;
    info!("trained model in {} epochs", model.n_iter());

    let y_pred = model
        .predict(split.test.x())
        .context("failed to predict the test set")?;
    let accuracy = accuracy_score(split.test.y(), y_pred.view())
        .context("failed to score the predictions")?;
    info!("evaluated model, accuracy {accuracy:.4}");

    persistence::save(&model, &config.model_path)
        .with_context(|| format!("failed to save model to {}", config.model_path.display()))?;
    info!("saved model to {}", config.model_path.display());

    Ok(Outcome {
        split,
        accuracy,
        model,
        model_path: config.model_path.clone(),
    })
}
