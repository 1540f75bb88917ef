//! Customer profile types: closed categorical domains, the raw form payload
//! and its validated counterpart.

use serde::{Deserialize, Serialize};

use crate::common::error::{ChurnError, Result};

/// Wire names of the profile fields, shared by errors and feature names.
pub mod field {
    /// Gender select.
    pub const GENDER: &str = "gender";
    /// Senior citizen flag.
    pub const SENIOR_CITIZEN: &str = "seniorCitizen";
    /// Has a partner.
    pub const PARTNER: &str = "partner";
    /// Has dependents.
    pub const DEPENDENTS: &str = "dependents";
    /// Months with the company.
    pub const TENURE_MONTHS: &str = "tenureMonths";
    /// Phone service subscribed.
    pub const PHONE_SERVICE: &str = "phoneService";
    /// More than one phone line.
    pub const MULTIPLE_LINES: &str = "multipleLines";
    /// Online security add-on.
    pub const ONLINE_SECURITY: &str = "onlineSecurity";
    /// Online backup add-on.
    pub const ONLINE_BACKUP: &str = "onlineBackup";
    /// Device protection add-on.
    pub const DEVICE_PROTECTION: &str = "deviceProtection";
    /// Tech support add-on.
    pub const TECH_SUPPORT: &str = "techSupport";
    /// Streaming TV. The capitalised `TV` is part of the wire name.
    pub const STREAMING_TV: &str = "streamingTV";
    /// Streaming movies.
    pub const STREAMING_MOVIES: &str = "streamingMovies";
    /// Paperless billing.
    pub const PAPERLESS_BILLING: &str = "paperlessBilling";
    /// Monthly charges in dollars.
    pub const MONTHLY_CHARGES: &str = "monthlyCharges";
    /// Total charges in dollars.
    pub const TOTAL_CHARGES: &str = "totalCharges";
    /// Internet service kind.
    pub const INTERNET_SERVICE: &str = "internetService";
    /// Contract term.
    pub const CONTRACT: &str = "contract";
    /// Payment method.
    pub const PAYMENT_METHOD: &str = "paymentMethod";
}

/// A closed set of display labels with a fixed order.
///
/// `ALL` is the canonical order; `position` must agree with it because the
/// one-hot layouts are derived from it.
pub trait Category: Copy + Eq + Sized + 'static {
    /// Every member, in domain order.
    const ALL: &'static [Self];

    /// Label as shown on the form.
    fn label(self) -> &'static str;

    /// Index of this member inside `ALL`.
    fn position(self) -> usize;

    /// Parse a form label, failing with `InvalidCategory` for anything else.
    fn from_label(field: &'static str, raw: &str) -> Result<Self> {
        let needle = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|member| member.label() == needle)
            .ok_or_else(|| ChurnError::invalid_category(field, raw))
    }

    /// All labels in domain order.
    fn labels() -> Vec<&'static str> {
        Self::ALL.iter().map(|member| member.label()).collect()
    }
}

/// Customer gender as entered on the form.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Male→1, Female→0.
    pub fn indicator(self) -> f64 {
        match self {
            Gender::Male => 1.0,
            Gender::Female => 0.0,
        }
    }
}

impl Category for Gender {
    const ALL: &'static [Self] = &[Gender::Male, Gender::Female];

    fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    fn position(self) -> usize {
        match self {
            Gender::Male => 0,
            Gender::Female => 1,
        }
    }
}

/// Answer to any of the yes/no selects.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    /// Yes→1, No→0.
    pub fn indicator(self) -> f64 {
        match self {
            YesNo::Yes => 1.0,
            YesNo::No => 0.0,
        }
    }
}

impl Category for YesNo {
    const ALL: &'static [Self] = &[YesNo::Yes, YesNo::No];

    fn label(self) -> &'static str {
        match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
        }
    }

    fn position(self) -> usize {
        match self {
            YesNo::Yes => 0,
            YesNo::No => 1,
        }
    }
}

/// Internet service kind, one-hot encoded.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum InternetService {
    Dsl,
    FiberOptic,
    NoInternet,
}

impl Category for InternetService {
    const ALL: &'static [Self] = &[
        InternetService::Dsl,
        InternetService::FiberOptic,
        InternetService::NoInternet,
    ];

    fn label(self) -> &'static str {
        match self {
            InternetService::Dsl => "DSL",
            InternetService::FiberOptic => "Fiber optic",
            InternetService::NoInternet => "No Internet",
        }
    }

    fn position(self) -> usize {
        match self {
            InternetService::Dsl => 0,
            InternetService::FiberOptic => 1,
            InternetService::NoInternet => 2,
        }
    }
}

/// Contract term, one-hot encoded.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Contract {
    MonthToMonth,
    OneYear,
    TwoYear,
}

impl Category for Contract {
    const ALL: &'static [Self] = &[Contract::MonthToMonth, Contract::OneYear, Contract::TwoYear];

    fn label(self) -> &'static str {
        match self {
            Contract::MonthToMonth => "Month-to-month",
            Contract::OneYear => "One year",
            Contract::TwoYear => "Two year",
        }
    }

    fn position(self) -> usize {
        match self {
            Contract::MonthToMonth => 0,
            Contract::OneYear => 1,
            Contract::TwoYear => 2,
        }
    }
}

/// Payment method, one-hot encoded.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PaymentMethod {
    BankTransfer,
    CreditCard,
    ElectronicCheck,
    MailedCheck,
}

impl Category for PaymentMethod {
    const ALL: &'static [Self] = &[
        PaymentMethod::BankTransfer,
        PaymentMethod::CreditCard,
        PaymentMethod::ElectronicCheck,
        PaymentMethod::MailedCheck,
    ];

    fn label(self) -> &'static str {
        match self {
            PaymentMethod::BankTransfer => "Bank transfer (automatic)",
            PaymentMethod::CreditCard => "Credit card (automatic)",
            PaymentMethod::ElectronicCheck => "Electronic check",
            PaymentMethod::MailedCheck => "Mailed check",
        }
    }

    fn position(self) -> usize {
        match self {
            PaymentMethod::BankTransfer => 0,
            PaymentMethod::CreditCard => 1,
            PaymentMethod::ElectronicCheck => 2,
            PaymentMethod::MailedCheck => 3,
        }
    }
}

/// Form values exactly as the user selected them.
///
/// Categorical fields hold display labels and are only trusted after
/// [`RawCustomerProfile::validate`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RawCustomerProfile {
    pub gender: String,
    pub senior_citizen: String,
    pub partner: String,
    pub dependents: String,
    pub tenure_months: u32,
    pub phone_service: String,
    pub multiple_lines: String,
    pub online_security: String,
    pub online_backup: String,
    pub device_protection: String,
    pub tech_support: String,
    #[serde(rename = "streamingTV")]
    pub streaming_tv: String,
    pub streaming_movies: String,
    pub paperless_billing: String,
    pub monthly_charges: f64,
    pub total_charges: f64,
    pub internet_service: String,
    pub contract: String,
    pub payment_method: String,
}

/// A profile whose every categorical value is a member of its domain.
#[derive(Clone, Debug, PartialEq)]
pub struct CustomerProfile {
    pub gender: Gender,
    pub senior_citizen: YesNo,
    pub partner: YesNo,
    pub dependents: YesNo,
    pub tenure_months: u32,
    pub phone_service: YesNo,
    pub multiple_lines: YesNo,
    pub online_security: YesNo,
    pub online_backup: YesNo,
    pub device_protection: YesNo,
    pub tech_support: YesNo,
    pub streaming_tv: YesNo,
    pub streaming_movies: YesNo,
    pub paperless_billing: YesNo,
    pub monthly_charges: f64,
    pub total_charges: f64,
    pub internet_service: InternetService,
    pub contract: Contract,
    pub payment_method: PaymentMethod,
}

impl RawCustomerProfile {
    /// Resolve every label into its enum and reject non-finite charges.
    pub fn validate(&self) -> Result<CustomerProfile> {
        let yes_no = |name: &'static str, raw: &str| YesNo::from_label(name, raw);

        Ok(CustomerProfile {
            gender: Gender::from_label(field::GENDER, &self.gender)?,
            senior_citizen: yes_no(field::SENIOR_CITIZEN, &self.senior_citizen)?,
            partner: yes_no(field::PARTNER, &self.partner)?,
            dependents: yes_no(field::DEPENDENTS, &self.dependents)?,
            tenure_months: self.tenure_months,
            phone_service: yes_no(field::PHONE_SERVICE, &self.phone_service)?,
            multiple_lines: yes_no(field::MULTIPLE_LINES, &self.multiple_lines)?,
            online_security: yes_no(field::ONLINE_SECURITY, &self.online_security)?,
            online_backup: yes_no(field::ONLINE_BACKUP, &self.online_backup)?,
            device_protection: yes_no(field::DEVICE_PROTECTION, &self.device_protection)?,
            tech_support: yes_no(field::TECH_SUPPORT, &self.tech_support)?,
            streaming_tv: yes_no(field::STREAMING_TV, &self.streaming_tv)?,
            streaming_movies: yes_no(field::STREAMING_MOVIES, &self.streaming_movies)?,
            paperless_billing: yes_no(field::PAPERLESS_BILLING, &self.paperless_billing)?,
            monthly_charges: finite(field::MONTHLY_CHARGES, self.monthly_charges)?,
            total_charges: finite(field::TOTAL_CHARGES, self.total_charges)?,
            internet_service: InternetService::from_label(
                field::INTERNET_SERVICE,
                &self.internet_service,
            )?,
            contract: Contract::from_label(field::CONTRACT, &self.contract)?,
            payment_method: PaymentMethod::from_label(field::PAYMENT_METHOD, &self.payment_method)?,
        })
    }
}

impl From<&CustomerProfile> for RawCustomerProfile {
    fn from(p: &CustomerProfile) -> Self {
        Self {
            gender: p.gender.label().to_string(),
            senior_citizen: p.senior_citizen.label().to_string(),
            partner: p.partner.label().to_string(),
            dependents: p.dependents.label().to_string(),
            tenure_months: p.tenure_months,
            phone_service: p.phone_service.label().to_string(),
            multiple_lines: p.multiple_lines.label().to_string(),
            online_security: p.online_security.label().to_string(),
            online_backup: p.online_backup.label().to_string(),
            device_protection: p.device_protection.label().to_string(),
            tech_support: p.tech_support.label().to_string(),
            streaming_tv: p.streaming_tv.label().to_string(),
            streaming_movies: p.streaming_movies.label().to_string(),
            paperless_billing: p.paperless_billing.label().to_string(),
            monthly_charges: p.monthly_charges,
            total_charges: p.total_charges,
            internet_service: p.internet_service.label().to_string(),
            contract: p.contract.label().to_string(),
            payment_method: p.payment_method.label().to_string(),
        }
    }
}

fn finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ChurnError::invalid_value(name, value, "not a finite number"))
    }
}
