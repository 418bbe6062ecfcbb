//! Configuration management for the churn prediction pipeline

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub artifacts: ArtifactsConfig,
    pub decision: DecisionConfig,
    pub logging: LoggingConfig,
}

/// Persisted artifact locations
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactsConfig {
    /// Directory containing the fitted artifacts
    pub dir: String,
    /// ONNX model file name
    #[serde(default = "default_model_file")]
    pub model_file: String,
    /// Gender label encoder file name
    #[serde(default = "default_gender_encoder_file")]
    pub gender_encoder_file: String,
    /// Geography one-hot encoder file name
    #[serde(default = "default_geography_encoder_file")]
    pub geography_encoder_file: String,
    /// Feature scaler file name
    #[serde(default = "default_scaler_file")]
    pub scaler_file: String,
    /// Number of threads for ONNX inference (default: 1)
    #[serde(default = "default_onnx_threads")]
    pub onnx_threads: usize,
}

fn default_model_file() -> String {
    "model.onnx".to_string()
}

fn default_gender_encoder_file() -> String {
    "gender_encoder.json".to_string()
}

fn default_geography_encoder_file() -> String {
    "geography_encoder.json".to_string()
}

fn default_scaler_file() -> String {
    "scaler.json".to_string()
}

fn default_onnx_threads() -> usize {
    1
}

impl ArtifactsConfig {
    pub fn model_path(&self) -> PathBuf {
        Path::new(&self.dir).join(&self.model_file)
    }

    pub fn gender_encoder_path(&self) -> PathBuf {
        Path::new(&self.dir).join(&self.gender_encoder_file)
    }

    pub fn geography_encoder_path(&self) -> PathBuf {
        Path::new(&self.dir).join(&self.geography_encoder_file)
    }

    pub fn scaler_path(&self) -> PathBuf {
        Path::new(&self.dir).join(&self.scaler_file)
    }
}

/// Decision configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DecisionConfig {
    /// Probability threshold for the churn verdict (strict greater-than)
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    0.5
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl AppConfig {
    /// Load configuration from the default file
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            artifacts: ArtifactsConfig {
                dir: "artifacts".to_string(),
                model_file: default_model_file(),
                gender_encoder_file: default_gender_encoder_file(),
                geography_encoder_file: default_geography_encoder_file(),
                scaler_file: default_scaler_file(),
                onnx_threads: 1,
            },
            decision: DecisionConfig {
                threshold: default_threshold(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.decision.threshold, 0.5);
        assert_eq!(config.artifacts.dir, "artifacts");
        assert_eq!(config.artifacts.model_file, "model.onnx");
        assert_eq!(config.artifacts.onnx_threads, 1);
    }

    #[test]
    fn test_artifact_paths() {
        let config = AppConfig::default();
        assert_eq!(
            config.artifacts.scaler_path(),
            PathBuf::from("artifacts/scaler.json")
        );
        assert_eq!(
            config.artifacts.model_path(),
            PathBuf::from("artifacts/model.onnx")
        );
    }

    #[test]
    fn test_load_from_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[artifacts]
dir = "fitted"

[decision]
threshold = 0.6

[logging]
level = "debug"
format = "pretty"
"#,
        )
        .unwrap();

        let config = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(config.artifacts.dir, "fitted");
        // File name defaults apply when omitted
        assert_eq!(config.artifacts.gender_encoder_file, "gender_encoder.json");
        assert_eq!(config.decision.threshold, 0.6);
    }
}
