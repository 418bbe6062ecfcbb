//! Prediction result types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Binary churn verdict derived from the model probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChurnLabel {
    Churn,
    NoChurn,
}

impl ChurnLabel {
    /// Classify a probability against a decision threshold.
    ///
    /// Strict greater-than: a probability exactly at the threshold is
    /// `NoChurn`.
    pub fn from_probability(probability: f64, threshold: f64) -> Self {
        if probability > threshold {
            ChurnLabel::Churn
        } else {
            ChurnLabel::NoChurn
        }
    }

    /// Verdict text shown to the user.
    pub fn verdict(&self) -> &'static str {
        match self {
            ChurnLabel::Churn => "likely to churn",
            ChurnLabel::NoChurn => "not likely to churn",
        }
    }
}

/// Result of scoring one customer profile. Derived per request, never
/// persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChurnPrediction {
    /// Model probability of churn (0.0 - 1.0)
    pub probability: f64,

    /// Verdict at the configured threshold
    pub label: ChurnLabel,

    /// When the prediction was produced
    pub timestamp: DateTime<Utc>,
}

impl ChurnPrediction {
    pub fn new(probability: f64, threshold: f64) -> Self {
        Self {
            probability,
            label: ChurnLabel::from_probability(probability, threshold),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_strict() {
        assert_eq!(
            ChurnLabel::from_probability(0.51, 0.5),
            ChurnLabel::Churn
        );
        assert_eq!(
            ChurnLabel::from_probability(0.5, 0.5),
            ChurnLabel::NoChurn
        );
        assert_eq!(
            ChurnLabel::from_probability(0.49, 0.5),
            ChurnLabel::NoChurn
        );
    }

    #[test]
    fn test_label_consistent_with_probability() {
        for p in [0.0, 0.25, 0.5, 0.500001, 0.75, 1.0] {
            let prediction = ChurnPrediction::new(p, 0.5);
            assert_eq!(prediction.label == ChurnLabel::Churn, p > 0.5);
        }
    }

    #[test]
    fn test_prediction_serialization() {
        let prediction = ChurnPrediction::new(0.73, 0.5);

        let json = serde_json::to_string(&prediction).unwrap();
        let deserialized: ChurnPrediction = serde_json::from_str(&json).unwrap();

        assert_eq!(prediction.probability, deserialized.probability);
        assert_eq!(prediction.label, deserialized.label);
        assert!(json.contains("\"churn\""));
    }

    #[test]
    fn test_verdict_text() {
        assert_eq!(ChurnLabel::Churn.verdict(), "likely to churn");
        assert_eq!(ChurnLabel::NoChurn.verdict(), "not likely to churn");
    }
}
