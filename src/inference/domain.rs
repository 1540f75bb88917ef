//! Domain definitions for churn scoring: the model seam, the decision rule
//! and the result handed back to the form.

use serde::Serialize;

use crate::common::error::{ChurnError, Result};
use crate::encoding::FeatureVector;

/// Probabilities at or above this mark the customer as at risk.
pub const CHURN_THRESHOLD: f64 = 0.5;

pub const AT_RISK_MESSAGE: &str =
    "🚨 Warning: Looks like they might be leaving. Let’s give them a reason to stay!";
pub const LIKELY_TO_STAY_MESSAGE: &str = "😊 Great news! This customer is likely to stick around!";

/// Interface to a loaded binary classifier.
///
/// Implementations score one encoded row and return the churn probability.
/// They are shared read-only for the process lifetime.
pub trait ChurnModel: Send + Sync {
    fn churn_probability(&self, features: &FeatureVector) -> Result<f64>;
}

/// Classification outcome.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChurnOutcome {
    AtRisk,
    LikelyToStay,
}

impl ChurnOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            ChurnOutcome::AtRisk => AT_RISK_MESSAGE,
            ChurnOutcome::LikelyToStay => LIKELY_TO_STAY_MESSAGE,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChurnOutcome::AtRisk => "at_risk",
            ChurnOutcome::LikelyToStay => "likely_to_stay",
        }
    }
}

/// Result of a single prediction.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChurnResult {
    pub outcome: ChurnOutcome,
    pub message: String,
    pub churn_probability: f64,
    pub stay_likelihood_percent: u8,
}

impl ChurnResult {
    /// Apply the decision rule to a model output.
    ///
    /// Anything that is not a probability is treated as a malformed model
    /// response.
    pub fn from_probability(p: f64) -> Result<Self> {
        if !p.is_finite() || !(0.0..=1.0).contains(&p) {
            return Err(ChurnError::Inference(format!(
                "model returned {p}, expected a probability in [0, 1]"
            )));
        }

        let outcome = if p >= CHURN_THRESHOLD {
            ChurnOutcome::AtRisk
        } else {
            ChurnOutcome::LikelyToStay
        };

        Ok(Self {
            outcome,
            message: outcome.message().to_string(),
            churn_probability: p,
            stay_likelihood_percent: stay_likelihood_percent(p),
        })
    }
}

/// `floor((1 - p) * 100)` for `p` in `[0, 1]`.
pub fn stay_likelihood_percent(p: f64) -> u8 {
    ((1.0 - p) * 100.0).floor().clamp(0.0, 100.0) as u8
}
