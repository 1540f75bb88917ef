//! Feature vector layout shared with the trained classifier.
//!
//! Column order and normalization bounds are fixed by the artefact. Changing
//! either silently corrupts predictions.

use serde::Serialize;

/// Number of columns the classifier expects.
pub const FEATURE_COUNT: usize = 26;

/// Column names in model order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "gender",
    "seniorCitizen",
    "partner",
    "dependents",
    "tenure",
    "phoneService",
    "multipleLines",
    "onlineSecurity",
    "onlineBackup",
    "deviceProtection",
    "techSupport",
    "streamingTV",
    "streamingMovies",
    "paperlessBilling",
    "monthlyCharges",
    "totalCharges",
    "internetService=DSL",
    "internetService=Fiber optic",
    "internetService=No Internet",
    "contract=Month-to-month",
    "contract=One year",
    "contract=Two year",
    "paymentMethod=Bank transfer",
    "paymentMethod=Credit card",
    "paymentMethod=Electronic check",
    "paymentMethod=Mailed check",
];

/// Offsets of the one-hot blocks within the vector.
pub const INTERNET_SERVICE_OFFSET: usize = 16;
pub const CONTRACT_OFFSET: usize = 19;
pub const PAYMENT_METHOD_OFFSET: usize = 22;

/// Min-max bounds taken from the training set.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NormBounds {
    pub min: f64,
    pub max: f64,
}

impl NormBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// `(value - min) / (max - min)`, unclamped.
    pub fn normalize(&self, value: f64) -> f64 {
        normalize(value, self.min, self.max)
    }
}

pub const TENURE_BOUNDS: NormBounds = NormBounds::new(1.0, 72.0);
pub const MONTHLY_CHARGES_BOUNDS: NormBounds = NormBounds::new(18.25, 118.75);
pub const TOTAL_CHARGES_BOUNDS: NormBounds = NormBounds::new(18.8, 8684.8);

/// Min-max rescale. Values outside `[min, max]` map outside `[0, 1]`.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    (value - min) / (max - min)
}

/// Encoded model input. Built once per request and handed to the adapter by
/// value.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub(crate) fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, idx: usize) -> Option<f64> {
        self.0.get(idx).copied()
    }

    /// Single-precision copy for the tensor runtime.
    pub fn to_f32(&self) -> Vec<f32> {
        self.0.iter().map(|v| *v as f32).collect()
    }

    /// `(name, value)` pairs in model order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}
