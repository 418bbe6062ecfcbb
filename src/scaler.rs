//! Fitted standardization of assembled feature vectors.

use crate::error::PipelineError;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// Per-column mean and standard deviation fitted at training time, applied
/// as `(x - mean) / std`. On-disk format of `scaler.json`.
#[derive(Debug, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f32>,
    std: Vec<f32>,
}

impl StandardScaler {
    /// Load scaler parameters from the JSON artifact.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, PipelineError> {
        let path = path.as_ref();
        let artifact = path.display().to_string();

        let contents =
            fs::read_to_string(path).map_err(|e| PipelineError::artifact(&artifact, e))?;
        let scaler: StandardScaler =
            serde_json::from_str(&contents).map_err(|e| PipelineError::artifact(&artifact, e))?;
        scaler.check_params(&artifact)?;

        info!(columns = scaler.mean.len(), "Scaler parameters loaded");

        Ok(scaler)
    }

    /// Build a scaler from in-memory parameters.
    pub fn new(mean: Vec<f32>, std: Vec<f32>) -> Result<Self, PipelineError> {
        let scaler = Self { mean, std };
        scaler.check_params("scaler")?;
        Ok(scaler)
    }

    fn check_params(&self, artifact: &str) -> Result<(), PipelineError> {
        if self.mean.is_empty() {
            return Err(PipelineError::artifact(artifact, "empty mean vector"));
        }
        if self.mean.len() != self.std.len() {
            return Err(PipelineError::artifact(
                artifact,
                format!(
                    "mean has {} columns but std has {}",
                    self.mean.len(),
                    self.std.len()
                ),
            ));
        }
        if self.std.iter().any(|&s| s == 0.0 || !s.is_finite()) {
            return Err(PipelineError::artifact(
                artifact,
                "std contains a zero or non-finite value",
            ));
        }
        Ok(())
    }

    /// Standardize a feature vector column by column.
    pub fn transform(&self, features: &[f32]) -> Result<Vec<f32>, PipelineError> {
        if features.len() != self.mean.len() {
            return Err(PipelineError::DimensionMismatch {
                expected: self.mean.len(),
                actual: features.len(),
            });
        }

        Ok(features
            .iter()
            .zip(self.mean.iter().zip(self.std.iter()))
            .map(|(&x, (&mean, &std))| (x - mean) / std)
            .collect())
    }

    /// Number of columns the scaler was fitted on.
    pub fn column_count(&self) -> usize {
        self.mean.len()
    }
}
