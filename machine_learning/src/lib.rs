pub mod arch;
pub mod dataset;
pub mod error;
pub mod linear;
pub mod metrics;
pub mod optimization;
pub mod persistence;
mod random;
pub mod training;

pub use error::{MlErr, Result};
