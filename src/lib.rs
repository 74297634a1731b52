mod config;
mod pipeline;

pub use config::ExperimentConfig;
pub use pipeline::{Outcome, run};
