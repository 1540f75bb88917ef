//! Error handling primitives shared across the core.
//!
//! Every failure carries a stable [`ErrorCode`] so hosts embedding the C ABI
//! can branch on it without parsing messages.

/// Stable error codes that cross the FFI boundary.
#[repr(u32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorCode {
    /// Success code used as a sentinel.
    Ok = 0,
    /// A categorical field held a value outside its domain.
    InvalidCategory = 1,
    /// A numeric field was non-finite or outside the form range.
    InvalidValue = 2,
    /// The classifier artefact could not be loaded.
    ModelLoad = 3,
    /// The classifier call failed or produced a malformed output.
    Inference = 4,
    /// Configuration could not be read or parsed.
    Config = 5,
    /// Request payload could not be (de)serialized.
    Serialization = 6,
}

/// Canonical error type for the core.
#[derive(thiserror::Error, Debug)]
pub enum ChurnError {
    /// Raw categorical value not in the field's domain.
    #[error("invalid value {value:?} for {field}")]
    InvalidCategory {
        /// Form field name.
        field: &'static str,
        /// Offending raw value.
        value: String,
    },

    /// Numeric field rejected at the boundary.
    #[error("invalid {field}: {value} ({reason})")]
    InvalidValue {
        /// Form field name.
        field: &'static str,
        /// Offending value.
        value: f64,
        /// Which constraint was violated.
        reason: &'static str,
    },

    /// Model artefact missing, unreadable or with the wrong shape.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Forward pass failed or returned something other than one probability.
    #[error("inference failed: {0}")]
    Inference(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization / deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias for `std::result::Result<T, ChurnError>`.
pub type Result<T> = std::result::Result<T, ChurnError>;

impl ChurnError {
    /// Validation helper for categorical fields.
    pub fn invalid_category(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidCategory {
            field,
            value: value.into(),
        }
    }

    /// Validation helper for numeric fields.
    pub fn invalid_value(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidValue {
            field,
            value,
            reason,
        }
    }

    /// Stable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidCategory { .. } => ErrorCode::InvalidCategory,
            Self::InvalidValue { .. } => ErrorCode::InvalidValue,
            Self::ModelLoad(_) => ErrorCode::ModelLoad,
            Self::Inference(_) => ErrorCode::Inference,
            Self::Config(_) => ErrorCode::Config,
            Self::Serialization(_) => ErrorCode::Serialization,
        }
    }

    /// Message safe to show an end user.
    ///
    /// Input errors are specific enough to act on; runtime failures collapse
    /// into a generic line and the detail goes to the log.
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidCategory { .. } | Self::InvalidValue { .. } | Self::Serialization(_) => {
                self.to_string()
            }
            Self::Inference(_) => {
                "The prediction could not be computed. Please try again later.".to_string()
            }
            Self::ModelLoad(_) | Self::Config(_) => {
                "The churn model is not available.".to_string()
            }
        }
    }
}
