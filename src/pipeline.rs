//! Prediction pipeline: validation, encoding, assembly, scaling, inference.
//!
//! A `ChurnPipeline` only exists once every artifact has loaded and the
//! column contract between assembler and scaler has been checked, so holding
//! an instance IS the ready state. Construction fails loudly otherwise; there
//! is no half-loaded pipeline to call.

use crate::config::AppConfig;
use crate::encoding::CategoryEncoder;
use crate::error::PipelineError;
use crate::features::FeatureAssembler;
use crate::model::{InferenceClient, ModelLoader};
use crate::scaler::StandardScaler;
use crate::types::customer::CustomerProfile;
use crate::types::prediction::ChurnPrediction;
use tracing::{debug, info};

/// The deterministic front half of the pipeline: validation, category
/// encoding, feature assembly, and scaling. Everything up to the model call.
#[derive(Debug)]
pub struct Preprocessor {
    encoder: CategoryEncoder,
    assembler: FeatureAssembler,
    scaler: StandardScaler,
}

impl Preprocessor {
    /// Combine fitted encoder and scaler, checking the column contract.
    ///
    /// The assembler's column count must equal the scaler's fitted columns;
    /// a mismatch means the artifacts do not belong to the same training
    /// run and is fatal at load, not a silent per-request corruption.
    pub fn new(encoder: CategoryEncoder, scaler: StandardScaler) -> Result<Self, PipelineError> {
        let assembler = FeatureAssembler::new(encoder.geography_categories().to_vec());

        if scaler.column_count() != assembler.feature_count() {
            return Err(PipelineError::artifact(
                "scaler",
                format!(
                    "fitted on {} columns but assembler produces {}",
                    scaler.column_count(),
                    assembler.feature_count()
                ),
            ));
        }

        Ok(Self {
            encoder,
            assembler,
            scaler,
        })
    }

    /// Validate a profile and produce its scaled feature vector.
    pub fn features(&self, profile: &CustomerProfile) -> Result<Vec<f32>, PipelineError> {
        profile.validate()?;

        let gender_code = self.encoder.encode_gender(&profile.gender)?;
        let geography_one_hot = self.encoder.encode_geography(&profile.geography)?;

        let assembled = self
            .assembler
            .assemble(profile, gender_code, &geography_one_hot);
        self.scaler.transform(&assembled)
    }

    pub fn encoder(&self) -> &CategoryEncoder {
        &self.encoder
    }

    pub fn feature_count(&self) -> usize {
        self.assembler.feature_count()
    }
}

/// Fully loaded churn prediction pipeline.
#[derive(Debug)]
pub struct ChurnPipeline {
    preprocessor: Preprocessor,
    inference: InferenceClient,
    threshold: f64,
}

impl ChurnPipeline {
    /// Load all four artifacts and assemble the pipeline.
    ///
    /// Any missing or corrupt artifact fails the whole load; no predictions
    /// are served from a partially loaded state.
    pub fn load(config: &AppConfig) -> Result<Self, PipelineError> {
        let artifacts = &config.artifacts;

        let encoder = CategoryEncoder::load(
            artifacts.gender_encoder_path(),
            artifacts.geography_encoder_path(),
        )?;
        let scaler = StandardScaler::load(artifacts.scaler_path())?;
        let preprocessor = Preprocessor::new(encoder, scaler)?;

        let loader = ModelLoader::with_threads(artifacts.onnx_threads)?;
        let model = loader.load_model(artifacts.model_path())?;
        let inference = InferenceClient::new(model);

        info!(
            features = preprocessor.feature_count(),
            threshold = config.decision.threshold,
            "Churn pipeline ready"
        );

        Ok(Self {
            preprocessor,
            inference,
            threshold: config.decision.threshold,
        })
    }

    /// Score one customer profile.
    pub fn predict(&self, profile: &CustomerProfile) -> Result<ChurnPrediction, PipelineError> {
        let scaled = self.preprocessor.features(profile)?;
        let probability = self.inference.predict(&scaled)?;

        debug!(
            probability = probability,
            threshold = self.threshold,
            "Profile scored"
        );

        Ok(ChurnPrediction::new(probability, self.threshold))
    }

    /// Trained gender classes, for the form's select options.
    pub fn gender_options(&self) -> &[String] {
        self.preprocessor.encoder().gender_classes()
    }

    /// Trained geography categories, for the form's select options.
    pub fn geography_options(&self) -> &[String] {
        self.preprocessor.encoder().geography_categories()
    }
}
