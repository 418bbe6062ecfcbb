//! ONNX churn model loader

use crate::error::PipelineError;
use ort::session::{builder::GraphOptimizationLevel, Session};
use std::path::Path;
use tracing::info;

/// Loaded ONNX model with resolved input/output names.
#[derive(Debug)]
pub struct LoadedModel {
    /// ONNX Runtime session
    pub session: Session,
    /// Input name for the model
    pub input_name: String,
    /// Output name for the churn probability
    pub output_name: String,
}

/// Loader for the churn model artifact.
pub struct ModelLoader {
    /// Number of intra-op threads for ONNX inference
    intra_threads: usize,
}

impl ModelLoader {
    /// Create a new model loader with default settings (1 thread).
    pub fn new() -> Result<Self, PipelineError> {
        Self::with_threads(1)
    }

    /// Create a new model loader with the specified number of threads.
    pub fn with_threads(intra_threads: usize) -> Result<Self, PipelineError> {
        ort::init().commit();
        info!(intra_threads = intra_threads, "ONNX Runtime initialized");
        Ok(Self { intra_threads })
    }

    /// Load the churn model from an ONNX file.
    pub fn load_model<P: AsRef<Path>>(&self, path: P) -> Result<LoadedModel, PipelineError> {
        let path = path.as_ref();
        let artifact = path.display().to_string();

        if !path.exists() {
            return Err(PipelineError::artifact(&artifact, "file not found"));
        }

        info!(path = %path.display(), threads = self.intra_threads, "Loading ONNX model");

        let session = Session::builder()
            .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
            .and_then(|b| b.with_intra_threads(self.intra_threads))
            .and_then(|b| b.commit_from_file(path))
            .map_err(|e| PipelineError::artifact(&artifact, e))?;

        let input_name = session
            .inputs()
            .first()
            .map(|i| i.name().to_string())
            .unwrap_or_else(|| "input".to_string());

        let output_name = session
            .outputs()
            .iter()
            .find(|o| o.name().contains("prob") || o.name().contains("output"))
            .map(|o| o.name().to_string())
            .unwrap_or_else(|| {
                session
                    .outputs()
                    .last()
                    .map(|o| o.name().to_string())
                    .unwrap_or_else(|| "probabilities".to_string())
            });

        info!(
            input = %input_name,
            output = %output_name,
            "Churn model loaded"
        );

        Ok(LoadedModel {
            session,
            input_name,
            output_name,
        })
    }
}
