mod log_loss;
mod loss_fn;

pub use log_loss::LogLoss;
pub use loss_fn::LossFn;
