//! Profile → feature vector encoding.

use tracing::debug;

use crate::common::error::Result;
use crate::profile::{Category, CustomerProfile, RawCustomerProfile};

use super::domain::{
    FeatureVector, CONTRACT_OFFSET, FEATURE_COUNT, INTERNET_SERVICE_OFFSET,
    MONTHLY_CHARGES_BOUNDS, PAYMENT_METHOD_OFFSET, TENURE_BOUNDS, TOTAL_CHARGES_BOUNDS,
};

/// Validate raw form values and encode them.
///
/// Fails with `InvalidCategory` when a label is outside its domain, or
/// `InvalidValue` when a charge is not finite.
pub fn encode(raw: &RawCustomerProfile) -> Result<FeatureVector> {
    let profile = raw.validate()?;
    Ok(encode_profile(&profile))
}

/// Encode an already validated profile. Total and side-effect free apart
/// from a debug event.
pub fn encode_profile(p: &CustomerProfile) -> FeatureVector {
    let tenure = TENURE_BOUNDS.normalize(f64::from(p.tenure_months));
    let monthly = MONTHLY_CHARGES_BOUNDS.normalize(p.monthly_charges);
    let total = TOTAL_CHARGES_BOUNDS.normalize(p.total_charges);

    debug!(tenure, monthly_charges = monthly, total_charges = total, "normalized numerics");

    let mut v = [0.0; FEATURE_COUNT];
    v[0] = p.gender.indicator();
    v[1] = p.senior_citizen.indicator();
    v[2] = p.partner.indicator();
    v[3] = p.dependents.indicator();
    v[4] = tenure;
    v[5] = p.phone_service.indicator();
    v[6] = p.multiple_lines.indicator();
    v[7] = p.online_security.indicator();
    v[8] = p.online_backup.indicator();
    v[9] = p.device_protection.indicator();
    v[10] = p.tech_support.indicator();
    v[11] = p.streaming_tv.indicator();
    v[12] = p.streaming_movies.indicator();
    v[13] = p.paperless_billing.indicator();
    v[14] = monthly;
    v[15] = total;
    set_one_hot(&mut v, INTERNET_SERVICE_OFFSET, p.internet_service);
    set_one_hot(&mut v, CONTRACT_OFFSET, p.contract);
    set_one_hot(&mut v, PAYMENT_METHOD_OFFSET, p.payment_method);

    FeatureVector::from_array(v)
}

/// Write the indicator block for `value` starting at `offset`. The block is
/// `C::ALL.len()` wide and already zeroed.
fn set_one_hot<C: Category>(v: &mut [f64; FEATURE_COUNT], offset: usize, value: C) {
    debug_assert!(offset + C::ALL.len() <= FEATURE_COUNT);
    v[offset + value.position()] = 1.0;
}
