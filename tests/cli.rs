//! Runs the `churn-predict` binary and checks what a user sees on failure.

use std::collections::HashMap;
use std::path::Path;
use std::process::{Command, Output};

use candle_core::{Device, Tensor};
use churn_core::encoding::FEATURE_COUNT;
use churn_core::ChurnError;

fn write_model(path: &Path, bias: f32) {
    let device = Device::Cpu;
    let mut tensors = HashMap::new();
    tensors.insert(
        "layers.0.weight".to_string(),
        Tensor::zeros((1, FEATURE_COUNT), candle_core::DType::F32, &device).unwrap(),
    );
    tensors.insert(
        "layers.0.bias".to_string(),
        Tensor::from_vec(vec![bias], 1, &device).unwrap(),
    );
    candle_core::safetensors::save(&tensors, path).unwrap();
}

fn run(model: &Path, log_filter: &str) -> Output {
    Command::new(env!("CARGO_BIN_EXE_churn-predict"))
        .arg("--model")
        .arg(model)
        .env_remove("CHURN_CONFIG")
        .env_remove("CHURN_MODEL_PATH")
        .env("RUST_LOG", log_filter)
        .output()
        .unwrap()
}

#[test]
fn prints_both_result_lines() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("churn_model.safetensors");
    write_model(&model, 0.0);

    let out = run(&model, "off");
    assert!(out.status.success());
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert!(stdout.contains("The model predicts: 🚨 Warning"));
    assert!(stdout.contains("The likelihood of the customer staying: 50%"));
}

#[test]
fn inference_failure_shows_only_the_generic_message() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("nan_model.safetensors");
    write_model(&model, f32::NAN);

    let out = run(&model, "off");
    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    let generic = ChurnError::Inference(String::new()).user_message();
    assert!(stderr.contains(&generic), "stderr: {stderr}");
    assert!(!stderr.contains("NaN"), "stderr: {stderr}");
    assert!(!stderr.contains("inference failed"), "stderr: {stderr}");
}

#[test]
fn inference_failure_detail_goes_to_the_log() {
    let dir = tempfile::tempdir().unwrap();
    let model = dir.path().join("nan_model.safetensors");
    write_model(&model, f32::NAN);

    let out = run(&model, "error");
    assert!(!out.status.success());
    let stderr = String::from_utf8(out.stderr).unwrap();
    assert!(stderr.contains("prediction failed"), "stderr: {stderr}");
    assert!(stderr.contains("NaN"), "stderr: {stderr}");
}
