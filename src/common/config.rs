//! Runtime configuration loaded from an optional TOML file and the environment.
//!
//! Precedence, lowest first: built-in defaults, the file named by `--config`
//! or `CHURN_CONFIG`, then `CHURN_*` environment overrides.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::common::error::{ChurnError, Result};

/// Environment variable naming the TOML config file.
pub const CONFIG_ENV: &str = "CHURN_CONFIG";

/// Snapshot of configuration values consumed by the core.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppCfg {
    /// Path to the safetensors classifier artefact.
    pub model_path: PathBuf,
    pub logging: LoggingCfg,
}

/// Logging configuration.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingCfg {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
    /// Output format: `text` (human-readable) or `json` (structured).
    pub format: String,
}

impl Default for AppCfg {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("./models/churn_model.safetensors"),
            logging: LoggingCfg::default(),
        }
    }
}

impl Default for LoggingCfg {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

impl AppCfg {
    /// Build a configuration snapshot: defaults, then the file (explicit path
    /// or `CHURN_CONFIG`), then environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| env_non_empty(CONFIG_ENV).map(PathBuf::from));

        let mut cfg = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    /// Read and parse a TOML config file; unspecified keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            ChurnError::Config(format!("failed reading {}: {e}", path.display()))
        })?;
        toml::from_str(&raw).map_err(|e| {
            ChurnError::Config(format!("invalid TOML in {}: {e}", path.display()))
        })
    }

    /// Parse a TOML document.
    pub fn from_toml(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| ChurnError::Config(format!("invalid TOML: {e}")))
    }

    /// Apply `CHURN_*` overrides from the process environment.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(env_non_empty);
    }

    /// Apply overrides from an arbitrary lookup; empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("CHURN_MODEL_PATH") {
            self.model_path = PathBuf::from(v);
        }
        if let Some(v) = lookup("CHURN_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = lookup("CHURN_LOG_FORMAT") {
            self.logging.format = v;
        }
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_toml(body: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(body.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_defaults() {
        let cfg = AppCfg::default();
        assert_eq!(cfg.model_path, PathBuf::from("./models/churn_model.safetensors"));
        assert_eq!(cfg.logging.level, "info");
        assert_eq!(cfg.logging.format, "text");
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let f = write_toml(
            r#"
model_path = "/srv/churn/model.safetensors"

[logging]
format = "json"
"#,
        );
        let cfg = AppCfg::from_file(f.path()).unwrap();
        assert_eq!(cfg.model_path, PathBuf::from("/srv/churn/model.safetensors"));
        assert_eq!(cfg.logging.format, "json");
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = AppCfg::from_file(Path::new("/nonexistent/churn.toml")).unwrap_err();
        assert!(matches!(err, ChurnError::Config(_)));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let f = write_toml("model_path = [unterminated");
        assert!(matches!(
            AppCfg::from_file(f.path()),
            Err(ChurnError::Config(_))
        ));
    }

    #[test]
    fn test_overrides_win_over_file_values() {
        let mut cfg = AppCfg::from_toml("model_path = \"a.safetensors\"").unwrap();
        let env: HashMap<&str, &str> = [
            ("CHURN_MODEL_PATH", "b.safetensors"),
            ("CHURN_LOG_LEVEL", "debug"),
        ]
        .into_iter()
        .collect();
        cfg.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(cfg.model_path, PathBuf::from("b.safetensors"));
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.logging.format, "text");
    }
}
