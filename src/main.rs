//! `churn-predict`: fill in the customer form from the command line and
//! print the churn prediction.

use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::builder::PossibleValuesParser;
use clap::Parser;
use tracing::{error, info};

use churn_core::api::render;
use churn_core::common::{config::AppCfg, log};
use churn_core::profile::{
    Category, Contract, Gender, InternetService, PaymentMethod, YesNo, FORM_LAYOUT,
};
use churn_core::{ChurnError, Predictor, RawCustomerProfile};

// Help headings, one per form column.
const SECTION_CUSTOMER: &str = FORM_LAYOUT[0].title;
const SECTION_CHARGES: &str = FORM_LAYOUT[1].title;
const SECTION_PHONE: &str = FORM_LAYOUT[2].title;
const SECTION_PROTECTION: &str = FORM_LAYOUT[3].title;
const SECTION_BILLING: &str = FORM_LAYOUT[4].title;

#[derive(Parser, Debug)]
#[command(author, version, about = "Customer churn prediction", long_about = None)]
struct Cli {
    /// TOML configuration file (defaults to $CHURN_CONFIG)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Classifier artefact, overriding the configured path
    #[arg(long)]
    model: Option<PathBuf>,
    /// Read the profile from a JSON file instead of the field flags
    #[arg(long)]
    profile: Option<PathBuf>,
    /// Print the result as JSON
    #[arg(long)]
    json: bool,
    #[command(flatten)]
    form: FormArgs,
}

#[derive(clap::Args, Debug)]
struct FormArgs {
    #[arg(long, default_value = "Male", value_parser = choices::<Gender>(), help_heading = SECTION_CUSTOMER)]
    gender: String,
    #[arg(long, default_value = "Yes", value_parser = choices::<YesNo>(), help_heading = SECTION_CUSTOMER)]
    senior_citizen: String,
    #[arg(long, default_value = "Yes", value_parser = choices::<YesNo>(), help_heading = SECTION_CUSTOMER)]
    partner: String,
    #[arg(long, default_value = "Yes", value_parser = choices::<YesNo>(), help_heading = SECTION_CUSTOMER)]
    dependents: String,

    /// Tenure in months
    #[arg(long, default_value_t = 36, value_parser = clap::value_parser!(u32).range(0..=72), help_heading = SECTION_CHARGES)]
    tenure_months: u32,
    /// Monthly charges in dollars (0-120)
    #[arg(long, default_value_t = 50.0, help_heading = SECTION_CHARGES)]
    monthly_charges: f64,
    /// Total charges in dollars (0-9000)
    #[arg(long, default_value_t = 500.0, help_heading = SECTION_CHARGES)]
    total_charges: f64,

    #[arg(long, default_value = "Yes", value_parser = choices::<YesNo>(), help_heading = SECTION_PHONE)]
    phone_service: String,
    #[arg(long, default_value = "Yes", value_parser = choices::<YesNo>(), help_heading = SECTION_PHONE)]
    multiple_lines: String,
    #[arg(long, default_value = "Yes", value_parser = choices::<YesNo>(), help_heading = SECTION_PHONE)]
    online_security: String,
    #[arg(long, default_value = "Yes", value_parser = choices::<YesNo>(), help_heading = SECTION_PHONE)]
    online_backup: String,

    #[arg(long, default_value = "Yes", value_parser = choices::<YesNo>(), help_heading = SECTION_PROTECTION)]
    device_protection: String,
    #[arg(long, default_value = "Yes", value_parser = choices::<YesNo>(), help_heading = SECTION_PROTECTION)]
    tech_support: String,
    #[arg(long, default_value = "Yes", value_parser = choices::<YesNo>(), help_heading = SECTION_PROTECTION)]
    streaming_tv: String,
    #[arg(long, default_value = "Yes", value_parser = choices::<YesNo>(), help_heading = SECTION_PROTECTION)]
    streaming_movies: String,

    #[arg(long, default_value = "Yes", value_parser = choices::<YesNo>(), help_heading = SECTION_BILLING)]
    paperless_billing: String,
    #[arg(long, default_value = "DSL", value_parser = choices::<InternetService>(), help_heading = SECTION_BILLING)]
    internet_service: String,
    #[arg(long, default_value = "Month-to-month", value_parser = choices::<Contract>(), help_heading = SECTION_BILLING)]
    contract: String,
    #[arg(long, default_value = "Bank transfer (automatic)", value_parser = choices::<PaymentMethod>(), help_heading = SECTION_BILLING)]
    payment_method: String,
}

fn choices<C: Category>() -> PossibleValuesParser {
    PossibleValuesParser::new(C::labels())
}

impl From<FormArgs> for RawCustomerProfile {
    fn from(f: FormArgs) -> Self {
        Self {
            gender: f.gender,
            senior_citizen: f.senior_citizen,
            partner: f.partner,
            dependents: f.dependents,
            tenure_months: f.tenure_months,
            phone_service: f.phone_service,
            multiple_lines: f.multiple_lines,
            online_security: f.online_security,
            online_backup: f.online_backup,
            device_protection: f.device_protection,
            tech_support: f.tech_support,
            streaming_tv: f.streaming_tv,
            streaming_movies: f.streaming_movies,
            paperless_billing: f.paperless_billing,
            monthly_charges: f.monthly_charges,
            total_charges: f.total_charges,
            internet_service: f.internet_service,
            contract: f.contract,
            payment_method: f.payment_method,
        }
    }
}

/// Log the full error and keep only what the user should see.
fn surface(err: ChurnError) -> anyhow::Error {
    let code = err.code() as u32;
    error!(error = %err, code, "prediction failed");
    anyhow!(err.user_message())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut cfg = AppCfg::load(cli.config.as_deref())?;
    if let Some(model) = cli.model {
        cfg.model_path = model;
    }
    log::init(&cfg.logging);

    info!(model = %cfg.model_path.display(), "loading churn classifier");
    let predictor = Predictor::from_config(&cfg)
        .with_context(|| format!("cannot serve predictions without {}", cfg.model_path.display()))?;

    let raw = match cli.profile {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed reading profile {}", path.display()))?;
            serde_json::from_str::<RawCustomerProfile>(&text)
                .with_context(|| format!("failed parsing profile {}", path.display()))?
        }
        None => RawCustomerProfile::from(cli.form),
    };
    raw.check_form_ranges().map_err(surface)?;

    let result = predictor.predict(&raw).map_err(surface)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", render(&result));
    }
    Ok(())
}
