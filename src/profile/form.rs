//! Interactive form conventions: initial values, slider ranges and the
//! grouping of fields into display sections.
//!
//! Slider ranges are what a person can enter. They are wider than the
//! training-set bounds used for normalization and are never applied by the
//! encoder.

use crate::common::error::{ChurnError, Result};

use super::domain::{
    field, Category, Contract, Gender, InternetService, PaymentMethod, RawCustomerProfile, YesNo,
};

/// Inclusive slider range.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FormRange {
    pub min: f64,
    pub max: f64,
}

impl FormRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    fn check(&self, name: &'static str, value: f64) -> Result<()> {
        if !value.is_finite() {
            Err(ChurnError::invalid_value(name, value, "not a finite number"))
        } else if value < self.min {
            Err(ChurnError::invalid_value(name, value, "below form range"))
        } else if value > self.max {
            Err(ChurnError::invalid_value(name, value, "above form range"))
        } else {
            Ok(())
        }
    }
}

pub const TENURE_RANGE: FormRange = FormRange::new(0.0, 72.0);
pub const MONTHLY_CHARGES_RANGE: FormRange = FormRange::new(0.0, 120.0);
pub const TOTAL_CHARGES_RANGE: FormRange = FormRange::new(0.0, 9000.0);

pub const DEFAULT_TENURE_MONTHS: u32 = 36;
pub const DEFAULT_MONTHLY_CHARGES: f64 = 50.0;
pub const DEFAULT_TOTAL_CHARGES: f64 = 500.0;

const SECTION_CUSTOMER: &str = "Customer";
const SECTION_CHARGES: &str = "Tenure & charges";
const SECTION_PHONE: &str = "Phone & security";
const SECTION_PROTECTION: &str = "Protection & streaming";
const SECTION_BILLING: &str = "Billing & services";

/// One display column of the form. The CLI uses `title` as the help
/// heading of every flag in `fields`.
#[derive(Copy, Clone, Debug)]
pub struct FormSection {
    pub title: &'static str,
    pub fields: &'static [&'static str],
}

/// The five display columns, left to right.
pub const FORM_LAYOUT: [FormSection; 5] = [
    FormSection {
        title: SECTION_CUSTOMER,
        fields: &[
            field::GENDER,
            field::SENIOR_CITIZEN,
            field::PARTNER,
            field::DEPENDENTS,
        ],
    },
    FormSection {
        title: SECTION_CHARGES,
        fields: &[
            field::TENURE_MONTHS,
            field::MONTHLY_CHARGES,
            field::TOTAL_CHARGES,
        ],
    },
    FormSection {
        title: SECTION_PHONE,
        fields: &[
            field::PHONE_SERVICE,
            field::MULTIPLE_LINES,
            field::ONLINE_SECURITY,
            field::ONLINE_BACKUP,
        ],
    },
    FormSection {
        title: SECTION_PROTECTION,
        fields: &[
            field::DEVICE_PROTECTION,
            field::TECH_SUPPORT,
            field::STREAMING_TV,
            field::STREAMING_MOVIES,
        ],
    },
    FormSection {
        title: SECTION_BILLING,
        fields: &[
            field::PAPERLESS_BILLING,
            field::INTERNET_SERVICE,
            field::CONTRACT,
            field::PAYMENT_METHOD,
        ],
    },
];

impl Default for RawCustomerProfile {
    /// The form as it first appears: each select on its first option and the
    /// sliders at their initial positions.
    fn default() -> Self {
        let yes = YesNo::ALL[0].label().to_string();
        Self {
            gender: Gender::ALL[0].label().to_string(),
            senior_citizen: yes.clone(),
            partner: yes.clone(),
            dependents: yes.clone(),
            tenure_months: DEFAULT_TENURE_MONTHS,
            phone_service: yes.clone(),
            multiple_lines: yes.clone(),
            online_security: yes.clone(),
            online_backup: yes.clone(),
            device_protection: yes.clone(),
            tech_support: yes.clone(),
            streaming_tv: yes.clone(),
            streaming_movies: yes.clone(),
            paperless_billing: yes,
            monthly_charges: DEFAULT_MONTHLY_CHARGES,
            total_charges: DEFAULT_TOTAL_CHARGES,
            internet_service: InternetService::ALL[0].label().to_string(),
            contract: Contract::ALL[0].label().to_string(),
            payment_method: PaymentMethod::ALL[0].label().to_string(),
        }
    }
}

impl RawCustomerProfile {
    /// Reject numerics a slider could not have produced.
    pub fn check_form_ranges(&self) -> Result<()> {
        TENURE_RANGE.check(field::TENURE_MONTHS, f64::from(self.tenure_months))?;
        MONTHLY_CHARGES_RANGE.check(field::MONTHLY_CHARGES, self.monthly_charges)?;
        TOTAL_CHARGES_RANGE.check(field::TOTAL_CHARGES, self.total_charges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn defaults_match_initial_form_state() {
        let raw = RawCustomerProfile::default();
        assert_eq!(raw.gender, "Male");
        assert_eq!(raw.senior_citizen, "Yes");
        assert_eq!(raw.tenure_months, 36);
        assert_eq!(raw.monthly_charges, 50.0);
        assert_eq!(raw.total_charges, 500.0);
        assert_eq!(raw.internet_service, "DSL");
        assert_eq!(raw.contract, "Month-to-month");
        assert_eq!(raw.payment_method, "Bank transfer (automatic)");
        assert!(raw.validate().is_ok());
        assert!(raw.check_form_ranges().is_ok());
    }

    #[test]
    fn layout_covers_every_field_once() {
        let all: Vec<&str> = FORM_LAYOUT.iter().flat_map(|s| s.fields.iter().copied()).collect();
        let unique: HashSet<&str> = all.iter().copied().collect();
        assert_eq!(all.len(), 19);
        assert_eq!(unique.len(), 19);
    }

    #[test]
    fn slider_edges_are_inclusive() {
        let mut raw = RawCustomerProfile::default();
        raw.tenure_months = 72;
        raw.monthly_charges = 0.0;
        raw.total_charges = 9000.0;
        assert!(raw.check_form_ranges().is_ok());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let mut raw = RawCustomerProfile::default();
        raw.tenure_months = 73;
        assert!(matches!(
            raw.check_form_ranges(),
            Err(ChurnError::InvalidValue { field: "tenureMonths", reason: "above form range", .. })
        ));

        let mut raw = RawCustomerProfile::default();
        raw.monthly_charges = -0.01;
        assert!(matches!(
            raw.check_form_ranges(),
            Err(ChurnError::InvalidValue { field: "monthlyCharges", reason: "below form range", .. })
        ));

        let mut raw = RawCustomerProfile::default();
        raw.total_charges = f64::INFINITY;
        assert!(raw.check_form_ranges().is_err());
    }
}
