//! Feed-forward churn classifier executed with candle.
//!
//! The artefact is a safetensors file holding dense layers as
//! `layers.{i}.weight` (`[out, in]`) and `layers.{i}.bias` (`[out]`).
//! Hidden layers use ReLU and the last layer a sigmoid:
//!
//! ```text
//! Input (26) → Linear → ReLU → … → Linear(1) → Sigmoid
//! ```
//!
//! Layer widths are read from the file; only the input width and the single
//! output unit are fixed.

use std::collections::HashMap;
use std::path::Path;

use candle_core::{DType, Device, Module, Tensor};
use candle_nn::Linear;
use tracing::{info, warn};

use crate::common::error::{ChurnError, Result};
use crate::encoding::{FeatureVector, FEATURE_COUNT};

use super::domain::ChurnModel;

/// Dense classifier loaded from a safetensors artefact.
pub struct MlpClassifier {
    layers: Vec<Linear>,
    device: Device,
}

impl std::fmt::Debug for MlpClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MlpClassifier")
            .field("layers", &self.layers.len())
            .field("device", &self.device)
            .finish()
    }
}

impl MlpClassifier {
    /// Load the classifier from a safetensors file.
    ///
    /// Returns `ModelLoad` if the file cannot be read or the layer chain does
    /// not map 26 inputs to one output.
    pub fn load(path: &Path, device: &Device) -> Result<Self> {
        let tensors = candle_core::safetensors::load(path, device).map_err(|e| {
            ChurnError::ModelLoad(format!("cannot read {}: {e}", path.display()))
        })?;
        let model = Self::from_tensors(tensors, device)?;
        info!(
            path = %path.display(),
            layers = model.layers.len(),
            "churn classifier loaded"
        );
        Ok(model)
    }

    /// Assemble the classifier from named tensors.
    pub fn from_tensors(mut tensors: HashMap<String, Tensor>, device: &Device) -> Result<Self> {
        let mut layers = Vec::new();
        let mut width = FEATURE_COUNT;

        for idx in 0.. {
            let Some(weight) = tensors.remove(&format!("layers.{idx}.weight")) else {
                break;
            };
            let bias = tensors
                .remove(&format!("layers.{idx}.bias"))
                .ok_or_else(|| ChurnError::ModelLoad(format!("layers.{idx}.bias is missing")))?;

            let (out_dim, in_dim) = weight.dims2().map_err(|e| {
                ChurnError::ModelLoad(format!("layers.{idx}.weight must be 2-D: {e}"))
            })?;
            if in_dim != width {
                return Err(ChurnError::ModelLoad(format!(
                    "layers.{idx}.weight expects {in_dim} inputs, previous layer yields {width}"
                )));
            }
            let bias_dim = bias.dims1().map_err(|e| {
                ChurnError::ModelLoad(format!("layers.{idx}.bias must be 1-D: {e}"))
            })?;
            if bias_dim != out_dim {
                return Err(ChurnError::ModelLoad(format!(
                    "layers.{idx}.bias has {bias_dim} entries, weight has {out_dim} rows"
                )));
            }

            let weight = to_f32(weight, idx)?;
            let bias = to_f32(bias, idx)?;
            layers.push(Linear::new(weight, Some(bias)));
            width = out_dim;
        }

        if layers.is_empty() {
            return Err(ChurnError::ModelLoad("no layers.0.weight tensor found".into()));
        }
        if width != 1 {
            return Err(ChurnError::ModelLoad(format!(
                "final layer yields {width} outputs, expected 1"
            )));
        }
        if !tensors.is_empty() {
            let mut extra: Vec<_> = tensors.into_keys().collect();
            extra.sort();
            warn!(tensors = ?extra, "ignoring tensors outside the layer chain");
        }

        Ok(Self {
            layers,
            device: device.clone(),
        })
    }

    /// Score one row, reshaped to a `[1, 26]` batch.
    pub fn forward(&self, row: &[f32]) -> Result<f64> {
        let infer_err = |stage: &str, e: candle_core::Error| {
            ChurnError::Inference(format!("{stage}: {e}"))
        };

        let mut xs = Tensor::from_slice(row, (1, row.len()), &self.device)
            .map_err(|e| infer_err("input tensor", e))?;

        let last = self.layers.len() - 1;
        for (idx, layer) in self.layers.iter().enumerate() {
            xs = layer.forward(&xs).map_err(|e| infer_err("linear", e))?;
            if idx < last {
                xs = xs.relu().map_err(|e| infer_err("relu", e))?;
            }
        }
        let probs = candle_nn::ops::sigmoid(&xs).map_err(|e| infer_err("sigmoid", e))?;

        let shape = probs.dims().to_vec();
        if shape != [1, 1] {
            return Err(ChurnError::Inference(format!(
                "output shape {shape:?}, expected [1, 1]"
            )));
        }
        let rows = probs
            .to_vec2::<f32>()
            .map_err(|e| infer_err("read output", e))?;
        rows.first()
            .and_then(|row| row.first())
            .map(|p| f64::from(*p))
            .ok_or_else(|| ChurnError::Inference("empty output".into()))
    }
}

impl ChurnModel for MlpClassifier {
    fn churn_probability(&self, features: &FeatureVector) -> Result<f64> {
        self.forward(&features.to_f32())
    }
}

fn to_f32(t: Tensor, idx: usize) -> Result<Tensor> {
    t.to_dtype(DType::F32)
        .map_err(|e| ChurnError::ModelLoad(format!("layers.{idx}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dense(
        tensors: &mut HashMap<String, Tensor>,
        idx: usize,
        weight: Vec<f32>,
        shape: (usize, usize),
        bias: Vec<f32>,
    ) {
        let device = Device::Cpu;
        tensors.insert(
            format!("layers.{idx}.weight"),
            Tensor::from_vec(weight, shape, &device).unwrap(),
        );
        let len = bias.len();
        tensors.insert(
            format!("layers.{idx}.bias"),
            Tensor::from_vec(bias, len, &device).unwrap(),
        );
    }

    fn logistic(bias: f32) -> HashMap<String, Tensor> {
        let mut t = HashMap::new();
        dense(&mut t, 0, vec![0.0; FEATURE_COUNT], (1, FEATURE_COUNT), vec![bias]);
        t
    }

    #[test]
    fn test_zero_logit_is_even_odds() {
        let model = MlpClassifier::from_tensors(logistic(0.0), &Device::Cpu).unwrap();
        let p = model.forward(&[0.0; FEATURE_COUNT]).unwrap();
        assert!((p - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_bias_sets_probability() {
        let model = MlpClassifier::from_tensors(logistic(3f32.ln()), &Device::Cpu).unwrap();
        let p = model.forward(&[1.0; FEATURE_COUNT]).unwrap();
        assert!((p - 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_hidden_layer_uses_relu() {
        // hidden unit copies the gender column; output = 2h - 1
        let mut weight = vec![0.0; FEATURE_COUNT];
        weight[0] = 1.0;
        let mut t = HashMap::new();
        dense(&mut t, 0, weight, (1, FEATURE_COUNT), vec![0.0]);
        dense(&mut t, 1, vec![2.0], (1, 1), vec![-1.0]);
        let model = MlpClassifier::from_tensors(t, &Device::Cpu).unwrap();

        let mut row = [0.0; FEATURE_COUNT];
        let female = model.forward(&row).unwrap();
        row[0] = 1.0;
        let male = model.forward(&row).unwrap();
        row[0] = -5.0;
        let clipped = model.forward(&row).unwrap();

        let sigmoid = |x: f64| 1.0 / (1.0 + (-x).exp());
        assert!((male - sigmoid(1.0)).abs() < 1e-5);
        assert!((female - sigmoid(-1.0)).abs() < 1e-5);
        assert!((clipped - female).abs() < 1e-6);
    }

    #[test]
    fn test_rejects_wrong_input_width() {
        let mut t = HashMap::new();
        dense(&mut t, 0, vec![0.0; 23], (1, 23), vec![0.0]);
        let err = MlpClassifier::from_tensors(t, &Device::Cpu).unwrap_err();
        assert!(matches!(err, ChurnError::ModelLoad(_)));
    }

    #[test]
    fn test_rejects_multi_output_head() {
        let mut t = HashMap::new();
        dense(&mut t, 0, vec![0.0; 2 * FEATURE_COUNT], (2, FEATURE_COUNT), vec![0.0, 0.0]);
        assert!(matches!(
            MlpClassifier::from_tensors(t, &Device::Cpu),
            Err(ChurnError::ModelLoad(_))
        ));
    }

    #[test]
    fn test_rejects_missing_bias_and_empty_file() {
        let mut t = logistic(0.0);
        t.remove("layers.0.bias");
        assert!(matches!(
            MlpClassifier::from_tensors(t, &Device::Cpu),
            Err(ChurnError::ModelLoad(_))
        ));
        assert!(matches!(
            MlpClassifier::from_tensors(HashMap::new(), &Device::Cpu),
            Err(ChurnError::ModelLoad(_))
        ));
    }

    #[test]
    fn test_wrong_row_width_is_inference_error() {
        let model = MlpClassifier::from_tensors(logistic(0.0), &Device::Cpu).unwrap();
        assert!(matches!(
            model.forward(&[0.0; 5]),
            Err(ChurnError::Inference(_))
        ));
    }

    #[test]
    fn test_load_nonexistent_path_fails() {
        let result = MlpClassifier::load(Path::new("/nonexistent/churn.safetensors"), &Device::Cpu);
        assert!(matches!(result, Err(ChurnError::ModelLoad(_))));
    }

    #[test]
    fn test_load_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("churn.safetensors");
        candle_core::safetensors::save(&logistic(3f32.ln()), &path).unwrap();

        let model = MlpClassifier::load(&path, &Device::Cpu).unwrap();
        let p = model.forward(&[0.0; FEATURE_COUNT]).unwrap();
        assert!((p - 0.75).abs() < 1e-5);
    }
}
