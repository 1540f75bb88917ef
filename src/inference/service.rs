//! Inference orchestration: one loaded model, one synchronous call per request.

use std::time::Instant;

use candle_core::Device;
use tracing::info;

use crate::common::config::AppCfg;
use crate::common::error::Result;
use crate::encoding::{self, FeatureVector};
use crate::profile::RawCustomerProfile;

use super::domain::{ChurnModel, ChurnResult};
use super::model::MlpClassifier;

/// Owns the classifier for the lifetime of the process.
pub struct Predictor {
    model: Box<dyn ChurnModel>,
}

impl Predictor {
    pub fn new(model: impl ChurnModel + 'static) -> Self {
        Self {
            model: Box::new(model),
        }
    }

    /// Load the configured artefact on the CPU.
    pub fn from_config(cfg: &AppCfg) -> Result<Self> {
        let model = MlpClassifier::load(&cfg.model_path, &Device::Cpu)?;
        Ok(Self::new(model))
    }

    /// Score an encoded vector. The vector is consumed by the call.
    pub fn predict_churn(&self, vector: FeatureVector) -> Result<ChurnResult> {
        let start = Instant::now();
        let p = self.model.churn_probability(&vector)?;
        let result = ChurnResult::from_probability(p)?;

        info!(
            outcome = result.outcome.as_str(),
            churn_probability = p,
            stay_pct = result.stay_likelihood_percent,
            dur_us = start.elapsed().as_micros() as u64,
            "churn prediction"
        );
        Ok(result)
    }

    /// Encode the form values and score them.
    pub fn predict(&self, raw: &RawCustomerProfile) -> Result<ChurnResult> {
        let vector = encoding::encode(raw)?;
        self.predict_churn(vector)
    }
}
