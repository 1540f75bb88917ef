//! Encoding domain: turns a customer profile into the classifier's input row.

pub mod domain;
pub mod service;

pub use domain::{FeatureVector, NormBounds, FEATURE_COUNT, FEATURE_NAMES};
pub use service::{encode, encode_profile};
