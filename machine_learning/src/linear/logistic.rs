use std::num::NonZeroUsize;

use log::info;
use ndarray::{Array1, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};

use crate::{
    MlErr, Result,
    arch::{Model, activations::Sigmoid, layers::Dense, loss::LogLoss},
    dataset::Dataset,
    metrics::accuracy_score,
    optimization::GradientDescent,
    random::generate_rng,
    training::{ModelTrainer, TrainingSchedule},
};

const DEFAULT_MAX_EPOCHS: NonZeroUsize = NonZeroUsize::new(1000).unwrap();

/// The configuration of a binary logistic regression, the unfitted estimator.
///
/// The fit minimizes `mean log-loss + ||w||² / (2 * c * n_samples)` with gradient descent,
/// starting from all-zero parameters. The intercept is never regularized.
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegressionParams {
    /// Inverse of the regularization strength, smaller values regularize more.
    pub c: f32,
    pub fit_intercept: bool,
    /// Training stops once no gradient component is larger than this in absolute value.
    pub tol: f32,
    pub max_epochs: NonZeroUsize,
    pub learning_rate: f32,
    /// Rows per gradient step, `None` uses the whole training set on every step.
    pub batch_size: Option<NonZeroUsize>,
    /// Only used to shuffle mini-batches.
    pub seed: Option<u64>,
}

impl Default for LogisticRegressionParams {
    fn default() -> Self {
        Self {
            c: 1.0,
            fit_intercept: true,
            tol: 1e-4,
            max_epochs: DEFAULT_MAX_EPOCHS,
            learning_rate: 0.1,
            batch_size: None,
            seed: None,
        }
    }
}

impl LogisticRegressionParams {
    /// Fits a logistic regression to a dataset with labels in {0, 1}.
    ///
    /// # Arguments
    /// * `dataset` - The training data.
    ///
    /// # Returns
    /// The fitted model or an error if the configuration or the data are invalid.
    pub fn fit(&self, dataset: &Dataset) -> Result<LogisticRegression> {
        self.validate()?;

        if dataset.is_empty() {
            return Err(MlErr::EmptyDataset);
        }

        if let Some(&label) = dataset.y().iter().find(|&&label| label > 1) {
            return Err(MlErr::NonBinaryLabels { label });
        }

        let n_features = dataset.n_features();
        let model = Dense::new((n_features, 1), self.fit_intercept);
        let mut params = vec![0.0; model.size()];

        let schedule = TrainingSchedule {
            max_epochs: self.max_epochs,
            batch_size: self.batch_size,
            tol: self.tol,
            l2: 1.0 / (self.c * dataset.len() as f32),
        };

        let mut trainer = ModelTrainer::new(
            model,
            GradientDescent::new(self.learning_rate),
            LogLoss,
            schedule,
            generate_rng(self.seed),
        );
        let report = trainer.train(&mut params, dataset)?;

        info!(
            "fitted logistic regression on {} samples in {} epochs (loss {:.4}, converged: {})",
            dataset.len(),
            report.epochs,
            report.loss,
            report.converged
        );

        Ok(LogisticRegression {
            n_features,
            params,
            n_iter: report.epochs,
            converged: report.converged,
        })
    }

    fn validate(&self) -> Result<()> {
        if !(self.c.is_finite() && self.c > 0.0) {
            return Err(MlErr::invalid("c", format!("must be positive, got {}", self.c)));
        }

        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(MlErr::invalid(
                "learning_rate",
                format!("must be positive, got {}", self.learning_rate),
            ));
        }

        if self.tol.is_nan() || self.tol < 0.0 {
            return Err(MlErr::invalid("tol", format!("must be non-negative, got {}", self.tol)));
        }

        Ok(())
    }
}

/// A fitted binary logistic regression.
///
/// The parameters are the coefficients, one per feature, followed by the intercept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    n_features: usize,
    params: Vec<f32>,
    n_iter: usize,
    converged: bool,
}

impl LogisticRegression {
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn coef(&self) -> ArrayView1<'_, f32> {
        ArrayView1::from(&self.params[..self.n_features])
    }

    pub fn intercept(&self) -> f32 {
        self.params[self.n_features]
    }

    /// Returns the amount of epochs the fit took.
    pub fn n_iter(&self) -> usize {
        self.n_iter
    }

    pub fn converged(&self) -> bool {
        self.converged
    }

    /// Computes the logit `x · coef + intercept` of each sample.
    pub fn decision_function(&self, x: ArrayView2<f32>) -> Result<Array1<f32>> {
        if x.ncols() != self.n_features {
            return Err(MlErr::SizeMismatch {
                what: "input features",
                got: x.ncols(),
                expected: self.n_features,
            });
        }

        Ok(x.dot(&self.coef()) + self.intercept())
    }

    /// Returns the probability of each sample belonging to class 1.
    pub fn predict_proba(&self, x: ArrayView2<f32>) -> Result<Array1<f32>> {
        Ok(self.decision_function(x)?.mapv_into(|z| Sigmoid.f(z)))
    }

    /// Predicts the class of each sample, 1 when its probability is above one half.
    pub fn predict(&self, x: ArrayView2<f32>) -> Result<Array1<usize>> {
        Ok(self
            .decision_function(x)?
            .mapv(|z| usize::from(z > 0.0)))
    }

    /// Returns the accuracy of the model's predictions on a labelled dataset.
    pub fn score(&self, dataset: &Dataset) -> Result<f32> {
        let y_pred = self.predict(dataset.x())?;
        accuracy_score(dataset.y(), y_pred.view())
    }

    /// Checks the parameter layout, needed for models that didn't come out of `fit`.
    pub(crate) fn check_layout(&self) -> Result<()> {
        if self.params.len() != self.n_features + 1 {
            return Err(MlErr::InvalidModelFile(format!(
                "{} parameters for {} features",
                self.params.len(),
                self.n_features
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ndarray::{Array2, array};

    use super::*;

    fn separable() -> Dataset {
        let x = array![
            [-2.0, 0.1],
            [-1.5, -0.3],
            [-1.0, 0.2],
            [1.0, -0.1],
            [1.5, 0.3],
            [2.0, -0.2]
        ];
        Dataset::new(x, array![0, 0, 0, 1, 1, 1]).unwrap()
    }

    #[test]
    fn fits_separable_data() {
        let data = separable();
        let model = LogisticRegressionParams::default().fit(&data).unwrap();

        assert_eq!(model.n_features(), 2);
        assert!(model.coef()[0] > 0.0);
        assert_eq!(model.score(&data).unwrap(), 1.0);
        assert_eq!(model.predict(data.x()).unwrap(), array![0, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn probabilities_and_logits_agree_with_predictions() {
        let data = separable();
        let model = LogisticRegressionParams::default().fit(&data).unwrap();

        let logits = model.decision_function(data.x()).unwrap();
        let proba = model.predict_proba(data.x()).unwrap();
        let labels = model.predict(data.x()).unwrap();

        for ((&z, &p), &label) in logits.iter().zip(&proba).zip(&labels) {
            assert!((0.0..=1.0).contains(&p));
            assert_eq!(label == 1, z > 0.0);
            assert_eq!(label == 1, p > 0.5);
        }
    }

    #[test]
    fn stronger_regularization_shrinks_coefficients() {
        let data = separable();

        let loose = LogisticRegressionParams::default().fit(&data).unwrap();
        let tight = LogisticRegressionParams {
            c: 0.01,
            ..Default::default()
        }
        .fit(&data)
        .unwrap();

        assert!(tight.coef()[0].abs() < loose.coef()[0].abs());
    }

    #[test]
    fn no_intercept_means_zero_intercept() {
        let model = LogisticRegressionParams {
            fit_intercept: false,
            ..Default::default()
        }
        .fit(&separable())
        .unwrap();

        assert_eq!(model.intercept(), 0.0);
    }

    #[test]
    fn fitting_is_deterministic() {
        let data = separable();
        let a = LogisticRegressionParams::default().fit(&data).unwrap();
        let b = LogisticRegressionParams::default().fit(&data).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn rejects_non_binary_labels() {
        let x = Array2::zeros((3, 1));
        let data = Dataset::new(x, array![0, 1, 2]).unwrap();

        assert!(matches!(
            LogisticRegressionParams::default().fit(&data),
            Err(MlErr::NonBinaryLabels { label: 2 })
        ));
    }

    #[test]
    fn rejects_invalid_hyperparameters() {
        let data = separable();

        for params in [
            LogisticRegressionParams {
                c: 0.0,
                ..Default::default()
            },
            LogisticRegressionParams {
                learning_rate: -1.0,
                ..Default::default()
            },
            LogisticRegressionParams {
                tol: f32::NAN,
                ..Default::default()
            },
        ] {
            assert!(matches!(
                params.fit(&data),
                Err(MlErr::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn prediction_checks_the_feature_count() {
        let model = LogisticRegressionParams::default().fit(&separable()).unwrap();
        let x = Array2::zeros((2, 3));

        assert!(matches!(
            model.predict(x.view()),
            Err(MlErr::SizeMismatch { got: 3, expected: 2, .. })
        ));
    }
}
