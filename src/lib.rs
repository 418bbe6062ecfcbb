//! Customer Churn Prediction Pipeline
//!
//! Scores bank customer profiles for churn risk with a pre-trained neural
//! network. The core is the input-to-feature-vector transform: category
//! encoding, fixed-order assembly, and standard scaling must reproduce
//! exactly the preprocessing fitted at training time before the single
//! forward inference call.

pub mod config;
pub mod encoding;
pub mod error;
pub mod features;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod scaler;
pub mod types;

pub use config::AppConfig;
pub use encoding::CategoryEncoder;
pub use error::PipelineError;
pub use features::FeatureAssembler;
pub use model::InferenceClient;
pub use pipeline::ChurnPipeline;
pub use scaler::StandardScaler;
pub use types::{customer::CustomerProfile, prediction::ChurnPrediction};
