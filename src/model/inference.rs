//! Opaque scored-inference client for the churn model.

use crate::error::PipelineError;
use crate::model::loader::LoadedModel;
use std::sync::RwLock;
use tracing::debug;

/// Wraps the loaded ONNX session and returns a single churn probability per
/// call. No retries, no fallback: a failing model call fails the request.
///
/// The session requires exclusive access to run, so it sits behind a lock;
/// the model weights themselves are immutable after load.
#[derive(Debug)]
pub struct InferenceClient {
    model: RwLock<LoadedModel>,
}

impl InferenceClient {
    pub fn new(model: LoadedModel) -> Self {
        Self {
            model: RwLock::new(model),
        }
    }

    /// Run the model on a scaled feature vector.
    ///
    /// Returns the churn probability in [0, 1].
    pub fn predict(&self, features: &[f32]) -> Result<f64, PipelineError> {
        use ort::value::Tensor;

        // Input tensor shape [1, num_features]
        let shape = vec![1_i64, features.len() as i64];
        let input_tensor = Tensor::from_array((shape, features.to_vec()))
            .map_err(|e| PipelineError::Inference(format!("failed to create input tensor: {e}")))?;

        let mut model = self
            .model
            .write()
            .map_err(|e| PipelineError::Inference(format!("model lock poisoned: {e}")))?;

        let input_name = model.input_name.clone();
        let output_name = model.output_name.clone();

        let outputs = model
            .session
            .run(ort::inputs![input_name.as_str() => input_tensor])
            .map_err(|e| PipelineError::Inference(e.to_string()))?;

        // Prefer the resolved probability output, fall back to any tensor
        // output the model exposes
        if let Some(output) = outputs.get(&output_name) {
            if let Ok((shape, data)) = output.try_extract_tensor::<f32>() {
                return finish(&shape, data);
            }
        }

        for (_, output) in outputs.iter() {
            if let Ok((shape, data)) = output.try_extract_tensor::<f32>() {
                return finish(&shape, data);
            }
        }

        Err(PipelineError::Inference(
            "model produced no float tensor output".to_string(),
        ))
    }
}

fn finish(shape: &ort::tensor::Shape, data: &[f32]) -> Result<f64, PipelineError> {
    let dims: Vec<i64> = shape.iter().copied().collect();
    let probability = probability_from_tensor(&dims, data)
        .ok_or_else(|| PipelineError::Inference("empty output tensor".to_string()))?;

    debug!(probability = probability, "Model inference complete");

    Ok(probability.clamp(0.0, 1.0))
}

/// Extract the churn probability from a model output tensor.
///
/// Handles the two layouts exported churn classifiers produce: `[batch, 1]`
/// with a single sigmoid probability, and `[batch, 2]` with per-class
/// probabilities where class 1 is churn.
fn probability_from_tensor(dims: &[i64], data: &[f32]) -> Option<f64> {
    let classes = match dims {
        [_, n] => *n as usize,
        [n] => *n as usize,
        _ => data.len(),
    };

    match classes {
        0 => None,
        1 => data.first().map(|&p| p as f64),
        _ => data.get(1).map(|&p| p as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sigmoid_output_layout() {
        // Keras-style [1, 1] sigmoid output
        assert_eq!(probability_from_tensor(&[1, 1], &[0.73]), Some(0.73f32 as f64));
    }

    #[test]
    fn test_two_class_output_layout() {
        // [1, 2] softmax output, churn is class 1
        assert_eq!(
            probability_from_tensor(&[1, 2], &[0.2, 0.8]),
            Some(0.8f32 as f64)
        );
    }

    #[test]
    fn test_flat_output_layout() {
        assert_eq!(probability_from_tensor(&[1], &[0.4]), Some(0.4f32 as f64));
    }

    #[test]
    fn test_empty_output() {
        assert_eq!(probability_from_tensor(&[1, 0], &[]), None);
    }
}
