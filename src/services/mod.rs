// Service exports
pub mod model;

pub use model::{LinearModel, ModelArtifact, ModelError, ModelGateway, Predictor};
