//! C-compatible API for hosts that render the form themselves.
//!
//! The host calls `churn_init` once at startup, then `churn_predict_json`
//! for every button press. Every string returned by this module must be
//! released with `churn_free_str`.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};

use serde_json::{json, Value};
use tracing::{error, warn};

use crate::common::config::{AppCfg, LoggingCfg};
use crate::common::error::{ChurnError, ErrorCode, Result};
use crate::common::log;
use crate::inference::Predictor;
use crate::profile::RawCustomerProfile;

static PREDICTOR: OnceLock<Predictor> = OnceLock::new();
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// ABI version to coordinate with the host.
#[no_mangle]
pub extern "C" fn churn_api_version() -> u32 {
    1
}

/// Install logging and load the classifier once for the process. Returns an
/// [`ErrorCode`].
///
/// A null path falls back to the configured artefact. Later calls are no-ops
/// that report success; the first loaded model stays in place.
///
/// # Safety
///
/// `model_path` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn churn_init(model_path: *const c_char) -> u32 {
    let model_path = if model_path.is_null() {
        None
    } else {
        Some(PathBuf::from(
            CStr::from_ptr(model_path).to_string_lossy().into_owned(),
        ))
    };
    match init_predictor(model_path) {
        Ok(()) => ErrorCode::Ok as u32,
        Err(err) => err.code() as u32,
    }
}

/// Load the process-wide predictor. Concurrent callers are serialized, so
/// the artefact is read at most once.
fn init_predictor(model_path: Option<PathBuf>) -> Result<()> {
    let _guard = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    if PREDICTOR.get().is_some() {
        warn!("churn_init called again; keeping the loaded model");
        return Ok(());
    }

    let mut cfg = match AppCfg::load(None) {
        Ok(cfg) => cfg,
        Err(err) => {
            log::init(&LoggingCfg::default());
            error!(error = %err, "configuration failed");
            return Err(err);
        }
    };
    log::init(&cfg.logging);
    if let Some(path) = model_path {
        cfg.model_path = path;
    }

    let predictor = Predictor::from_config(&cfg).inspect_err(|err| {
        error!(error = %err, model = %cfg.model_path.display(), "model load failed");
    })?;
    if PREDICTOR.set(predictor).is_err() {
        warn!("predictor was installed concurrently; dropping the duplicate");
    }
    Ok(())
}

/// Predict churn for a JSON-encoded profile and return a JSON envelope.
///
/// # Safety
///
/// `profile_json` must be null or a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn churn_predict_json(profile_json: *const c_char) -> *mut c_char {
    if profile_json.is_null() {
        return string_to_raw(failure(ErrorCode::Serialization, "null input").to_string());
    }
    let input = CStr::from_ptr(profile_json).to_string_lossy();

    let response = match PREDICTOR.get() {
        Some(predictor) => handle_request(predictor, &input),
        None => failure(ErrorCode::ModelLoad, "churn_init has not loaded a model"),
    };
    string_to_raw(response.to_string())
}

/// Free strings allocated by this library.
///
/// # Safety
///
/// `ptr` must be null or a pointer previously returned by this module.
#[no_mangle]
pub unsafe extern "C" fn churn_free_str(ptr: *mut c_char) {
    if ptr.is_null() {
        return;
    }
    drop(CString::from_raw(ptr));
}

/// Decode, range-check and score one request, wrapping the outcome.
pub fn handle_request(predictor: &Predictor, input: &str) -> Value {
    let outcome = serde_json::from_str::<RawCustomerProfile>(input)
        .map_err(ChurnError::from)
        .and_then(|raw| {
            raw.check_form_ranges()?;
            predictor.predict(&raw)
        });

    match outcome {
        Ok(result) => json!({ "ok": true, "result": result }),
        Err(err) => {
            if matches!(err, ChurnError::Inference(_)) {
                error!(error = %err, "prediction failed");
            }
            failure(err.code(), &err.user_message())
        }
    }
}

fn failure(code: ErrorCode, message: &str) -> Value {
    json!({ "ok": false, "code": code as u32, "error": message })
}

fn string_to_raw(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(cstring) => cstring.into_raw(),
        Err(_) => CString::from(c"{\"ok\":false}").into_raw(),
    }
}
