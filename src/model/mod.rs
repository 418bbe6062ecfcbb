//! ONNX model loading and inference

pub mod inference;
pub mod loader;

pub use inference::InferenceClient;
pub use loader::ModelLoader;
