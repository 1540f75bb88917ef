//! End-to-end: safetensors artefact on disk → config → encode → predict → render.

use std::collections::HashMap;
use std::path::Path;

use candle_core::{Device, Tensor};
use churn_core::api::ffi::handle_request;
use churn_core::api::render;
use churn_core::common::config::AppCfg;
use churn_core::encoding::FEATURE_COUNT;
use churn_core::inference::ChurnOutcome;
use churn_core::{encode, ChurnError, Predictor, RawCustomerProfile};

/// Logistic model whose logit is `4 * contract=Month-to-month - 2`.
fn write_model(path: &Path) {
    let device = Device::Cpu;
    let mut weight = vec![0f32; FEATURE_COUNT];
    weight[19] = 4.0;
    let mut tensors = HashMap::new();
    tensors.insert(
        "layers.0.weight".to_string(),
        Tensor::from_vec(weight, (1, FEATURE_COUNT), &device).unwrap(),
    );
    tensors.insert(
        "layers.0.bias".to_string(),
        Tensor::from_vec(vec![-2f32], 1, &device).unwrap(),
    );
    candle_core::safetensors::save(&tensors, path).unwrap();
}

fn predictor_in(dir: &Path) -> Predictor {
    let model_path = dir.join("churn_model.safetensors");
    write_model(&model_path);
    let cfg = AppCfg::from_toml(&format!("model_path = {:?}", model_path.display().to_string()))
        .unwrap();
    Predictor::from_config(&cfg).unwrap()
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

#[test]
fn month_to_month_customer_is_at_risk() {
    let dir = tempfile::tempdir().unwrap();
    let predictor = predictor_in(dir.path());

    let raw = RawCustomerProfile::default();
    let result = predictor.predict(&raw).unwrap();

    assert_eq!(result.outcome, ChurnOutcome::AtRisk);
    assert!((result.churn_probability - sigmoid(2.0)).abs() < 1e-5);
    assert_eq!(result.stay_likelihood_percent, 11);

    let text = render(&result);
    assert!(text.starts_with("The model predicts: 🚨 Warning"));
    assert!(text.ends_with("staying: 11%"));
}

#[test]
fn two_year_customer_is_likely_to_stay() {
    let dir = tempfile::tempdir().unwrap();
    let predictor = predictor_in(dir.path());

    let mut raw = RawCustomerProfile::default();
    raw.contract = "Two year".into();
    let vector = encode(&raw).unwrap();
    let result = predictor.predict_churn(vector).unwrap();

    assert_eq!(result.outcome, ChurnOutcome::LikelyToStay);
    assert_eq!(result.stay_likelihood_percent, 88);
}

#[test]
fn json_request_through_host_entry_point() {
    let dir = tempfile::tempdir().unwrap();
    let predictor = predictor_in(dir.path());

    let mut raw = RawCustomerProfile::default();
    raw.contract = "One year".into();
    let response = handle_request(&predictor, &serde_json::to_string(&raw).unwrap());

    assert_eq!(response["ok"], true);
    assert_eq!(response["result"]["outcome"], "likelyToStay");
}

#[test]
fn model_with_wrong_width_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("old_model.safetensors");
    let device = Device::Cpu;
    let mut tensors = HashMap::new();
    tensors.insert(
        "layers.0.weight".to_string(),
        Tensor::zeros((1, 23), candle_core::DType::F32, &device).unwrap(),
    );
    tensors.insert(
        "layers.0.bias".to_string(),
        Tensor::zeros(1, candle_core::DType::F32, &device).unwrap(),
    );
    candle_core::safetensors::save(&tensors, &path).unwrap();

    let cfg = AppCfg {
        model_path: path,
        ..AppCfg::default()
    };
    assert!(matches!(
        Predictor::from_config(&cfg),
        Err(ChurnError::ModelLoad(_))
    ));
}
