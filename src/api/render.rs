//! Human-readable output for a prediction.

use crate::inference::ChurnResult;

/// The two result lines shown under the form.
pub fn render(result: &ChurnResult) -> String {
    format!(
        "The model predicts: {}\nThe likelihood of the customer staying: {}%",
        result.message, result.stay_likelihood_percent
    )
}
