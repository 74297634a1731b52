pub mod activations;
pub mod layers;
pub mod loss;
mod model;

pub use model::Model;
