mod model_trainer;
mod schedule;

pub use model_trainer::{ModelTrainer, TrainReport};
pub use schedule::TrainingSchedule;
