//! Inference domain: scores encoded profiles with the loaded classifier.

pub mod domain;
pub mod model;
pub mod service;

pub use domain::{ChurnModel, ChurnOutcome, ChurnResult};
pub use model::MlpClassifier;
pub use service::Predictor;
