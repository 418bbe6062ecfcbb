//! Error taxonomy for the churn prediction pipeline.
//!
//! Startup errors (`ArtifactLoad`) are fatal: the pipeline refuses to exist
//! until all artifacts load. Everything else is per-request and recoverable.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    /// A persisted artifact (model, encoder, scaler) is missing or unreadable.
    #[error("failed to load artifact \"{artifact}\": {reason}")]
    ArtifactLoad { artifact: String, reason: String },

    /// A raw input field is outside its declared domain.
    #[error("invalid value for field \"{field}\": {reason}")]
    Validation { field: &'static str, reason: String },

    /// A categorical value not seen during training.
    #[error("unknown {field} category \"{value}\"")]
    UnknownCategory { field: &'static str, value: String },

    /// Feature vector length does not match the fitted scaler columns.
    /// Unreachable if the assembler is correct; a programming-error signal.
    #[error("feature vector has {actual} columns, scaler expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The opaque model call failed.
    #[error("model inference failed: {0}")]
    Inference(String),
}

impl PipelineError {
    pub fn artifact(artifact: &str, reason: impl ToString) -> Self {
        Self::ArtifactLoad {
            artifact: artifact.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn validation(field: &'static str, reason: impl ToString) -> Self {
        Self::Validation {
            field,
            reason: reason.to_string(),
        }
    }

    /// True for errors that end the process rather than the request.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ArtifactLoad { .. })
    }
}
