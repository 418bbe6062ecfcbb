//! Categorical encoders fitted at training time.
//!
//! Two read-only tables: an ordered gender class list (label encoding, the
//! encoded value is the index) and an ordered geography category list
//! (one-hot encoding). Both must reproduce exactly the category universe the
//! model was trained on; anything outside it is rejected.

use crate::error::PipelineError;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// On-disk format of `gender_encoder.json`.
#[derive(Debug, Deserialize)]
struct GenderTable {
    classes: Vec<String>,
}

/// On-disk format of `geography_encoder.json`.
#[derive(Debug, Deserialize)]
struct GeographyTable {
    categories: Vec<String>,
}

/// Encoder for the two categorical fields, pure function of the fitted
/// tables.
#[derive(Debug)]
pub struct CategoryEncoder {
    gender_classes: Vec<String>,
    geography_categories: Vec<String>,
}

impl CategoryEncoder {
    /// Load both encoding tables from their JSON artifacts.
    pub fn load<P: AsRef<Path>>(gender_path: P, geography_path: P) -> Result<Self, PipelineError> {
        let gender: GenderTable = read_artifact(gender_path.as_ref())?;
        let geography: GeographyTable = read_artifact(geography_path.as_ref())?;

        let encoder = Self::from_tables(gender.classes, geography.categories)?;

        info!(
            gender_classes = encoder.gender_classes.len(),
            geography_categories = encoder.geography_categories.len(),
            "Encoding tables loaded"
        );

        Ok(encoder)
    }

    /// Build an encoder from in-memory tables.
    pub fn from_tables(
        gender_classes: Vec<String>,
        geography_categories: Vec<String>,
    ) -> Result<Self, PipelineError> {
        if gender_classes.is_empty() {
            return Err(PipelineError::artifact(
                "gender encoder",
                "empty class list",
            ));
        }
        if geography_categories.is_empty() {
            return Err(PipelineError::artifact(
                "geography encoder",
                "empty category list",
            ));
        }

        Ok(Self {
            gender_classes,
            geography_categories,
        })
    }

    /// Label-encode a gender value to its trained index.
    pub fn encode_gender(&self, value: &str) -> Result<usize, PipelineError> {
        self.gender_classes
            .iter()
            .position(|c| c == value)
            .ok_or_else(|| PipelineError::UnknownCategory {
                field: "gender",
                value: value.to_string(),
            })
    }

    /// One-hot encode a geography value in the trained category order.
    pub fn encode_geography(&self, value: &str) -> Result<Vec<f32>, PipelineError> {
        let index = self
            .geography_categories
            .iter()
            .position(|c| c == value)
            .ok_or_else(|| PipelineError::UnknownCategory {
                field: "geography",
                value: value.to_string(),
            })?;

        let mut one_hot = vec![0.0; self.geography_categories.len()];
        one_hot[index] = 1.0;
        Ok(one_hot)
    }

    /// Trained gender classes, in encoding order.
    pub fn gender_classes(&self) -> &[String] {
        &self.gender_classes
    }

    /// Trained geography categories, in one-hot column order.
    pub fn geography_categories(&self) -> &[String] {
        &self.geography_categories
    }

    /// Number of one-hot geography columns.
    pub fn geography_count(&self) -> usize {
        self.geography_categories.len()
    }
}

fn read_artifact<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, PipelineError> {
    let artifact = path.display().to_string();
    let contents =
        fs::read_to_string(path).map_err(|e| PipelineError::artifact(&artifact, e))?;
    serde_json::from_str(&contents).map_err(|e| PipelineError::artifact(&artifact, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder() -> CategoryEncoder {
        CategoryEncoder::from_tables(
            vec!["Female".to_string(), "Male".to_string()],
            vec![
                "France".to_string(),
                "Germany".to_string(),
                "Spain".to_string(),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_gender_encoding_is_deterministic() {
        let enc = encoder();
        assert_eq!(enc.encode_gender("Female").unwrap(), 0);
        assert_eq!(enc.encode_gender("Male").unwrap(), 1);
        // Same input, same code, every time
        assert_eq!(
            enc.encode_gender("Female").unwrap(),
            enc.encode_gender("Female").unwrap()
        );
    }

    #[test]
    fn test_geography_one_hot_order() {
        let enc = encoder();
        assert_eq!(enc.encode_geography("France").unwrap(), vec![1.0, 0.0, 0.0]);
        assert_eq!(
            enc.encode_geography("Germany").unwrap(),
            vec![0.0, 1.0, 0.0]
        );
        assert_eq!(enc.encode_geography("Spain").unwrap(), vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_unknown_categories_rejected() {
        let enc = encoder();

        let err = enc.encode_gender("Unknown").unwrap_err();
        assert!(matches!(
            err,
            PipelineError::UnknownCategory { field: "gender", .. }
        ));

        let err = enc.encode_geography("Atlantis").unwrap_err();
        assert!(matches!(
            err,
            PipelineError::UnknownCategory {
                field: "geography",
                ..
            }
        ));
    }

    #[test]
    fn test_empty_tables_rejected() {
        let err = CategoryEncoder::from_tables(vec![], vec!["France".to_string()]).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_missing_artifact_file() {
        let err = CategoryEncoder::load(
            Path::new("/nonexistent/gender_encoder.json"),
            Path::new("/nonexistent/geography_encoder.json"),
        )
        .unwrap_err();
        assert!(matches!(err, PipelineError::ArtifactLoad { .. }));
    }

    #[test]
    fn test_load_from_json_files() {
        let dir = tempfile::tempdir().unwrap();
        let gender_path = dir.path().join("gender_encoder.json");
        let geography_path = dir.path().join("geography_encoder.json");
        std::fs::write(&gender_path, r#"{"classes": ["Female", "Male"]}"#).unwrap();
        std::fs::write(
            &geography_path,
            r#"{"categories": ["France", "Germany", "Spain"]}"#,
        )
        .unwrap();

        let enc = CategoryEncoder::load(&gender_path, &geography_path).unwrap();
        assert_eq!(enc.geography_count(), 3);
        assert_eq!(enc.encode_gender("Male").unwrap(), 1);
    }
}
