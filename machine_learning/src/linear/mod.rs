mod logistic;

pub use logistic::{LogisticRegression, LogisticRegressionParams};
