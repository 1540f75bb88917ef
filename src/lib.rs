//! Customer churn prediction core.
//!
//! Form values are validated and encoded into the classifier's fixed input
//! row (`encoding`), scored by a loaded model (`inference`) and rendered for
//! the host (`api`).
pub mod api;
pub mod common;
pub mod encoding;
pub mod inference;
pub mod profile;

pub use common::{ChurnError, ErrorCode, Result};
pub use encoding::{encode, FeatureVector};
pub use inference::{ChurnResult, Predictor};
pub use profile::RawCustomerProfile;
