//! Profile domain: the customer attributes collected by the form.

pub mod domain;
pub mod form;

pub use domain::{
    field, Category, Contract, CustomerProfile, Gender, InternetService, PaymentMethod,
    RawCustomerProfile, YesNo,
};
pub use form::{FormSection, FORM_LAYOUT};
