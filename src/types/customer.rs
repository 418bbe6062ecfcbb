//! Customer profile submitted for churn scoring.

use crate::error::PipelineError;
use serde::{Deserialize, Serialize};

/// Raw inputs for one prediction request, one instance per request.
///
/// Field aliases match the column names of the training dataset so profiles
/// exported from it deserialize directly. The two membership flags are kept
/// as 0/1 integers, matching the numeric encoding the model was trained on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerProfile {
    /// Credit score, 300-850
    #[serde(alias = "CreditScore")]
    pub credit_score: i64,

    /// Gender, one of the trained categories
    #[serde(alias = "Gender")]
    pub gender: String,

    /// Age in years, 18-92
    #[serde(alias = "Age")]
    pub age: i64,

    /// Years with the bank, 0-10
    #[serde(alias = "Tenure")]
    pub tenure: i64,

    /// Account balance
    #[serde(alias = "Balance")]
    pub balance: f64,

    /// Number of bank products held, 1-4
    #[serde(alias = "NumOfProducts")]
    pub num_of_products: i64,

    /// Holds a credit card (0 or 1)
    #[serde(alias = "HasCrCard")]
    pub has_credit_card: i64,

    /// Active member flag (0 or 1)
    #[serde(alias = "IsActiveMember")]
    pub is_active_member: i64,

    /// Estimated yearly salary
    #[serde(alias = "EstimatedSalary")]
    pub estimated_salary: f64,

    /// Country of residence, one of the trained categories
    #[serde(alias = "Geography")]
    pub geography: String,
}

impl CustomerProfile {
    /// Check every numeric field against its declared domain.
    ///
    /// Categorical membership (gender, geography) is checked by the encoder
    /// against the fitted tables, not here.
    pub fn validate(&self) -> Result<(), PipelineError> {
        range_check("credit_score", self.credit_score, 300, 850)?;
        range_check("age", self.age, 18, 92)?;
        range_check("tenure", self.tenure, 0, 10)?;
        range_check("num_of_products", self.num_of_products, 1, 4)?;
        flag_check("has_credit_card", self.has_credit_card)?;
        flag_check("is_active_member", self.is_active_member)?;
        non_negative("balance", self.balance)?;
        non_negative("estimated_salary", self.estimated_salary)?;
        Ok(())
    }
}

fn range_check(field: &'static str, value: i64, min: i64, max: i64) -> Result<(), PipelineError> {
    if value < min || value > max {
        return Err(PipelineError::validation(
            field,
            format!("{} is outside [{}, {}]", value, min, max),
        ));
    }
    Ok(())
}

fn flag_check(field: &'static str, value: i64) -> Result<(), PipelineError> {
    if value != 0 && value != 1 {
        return Err(PipelineError::validation(
            field,
            format!("{} is not 0 or 1", value),
        ));
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f64) -> Result<(), PipelineError> {
    if !value.is_finite() || value < 0.0 {
        return Err(PipelineError::validation(
            field,
            format!("{} is not a non-negative number", value),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> CustomerProfile {
        CustomerProfile {
            credit_score: 650,
            gender: "Female".to_string(),
            age: 40,
            tenure: 5,
            balance: 50000.0,
            num_of_products: 2,
            has_credit_card: 1,
            is_active_member: 1,
            estimated_salary: 60000.0,
            geography: "France".to_string(),
        }
    }

    #[test]
    fn test_valid_profile_passes() {
        assert!(baseline().validate().is_ok());
    }

    #[test]
    fn test_age_boundaries() {
        let mut profile = baseline();

        profile.age = 18;
        assert!(profile.validate().is_ok());
        profile.age = 92;
        assert!(profile.validate().is_ok());

        profile.age = 17;
        let err = profile.validate().unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Validation { field: "age", .. }
        ));

        profile.age = 93;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_flags_must_be_binary() {
        let mut profile = baseline();
        profile.has_credit_card = 2;
        let err = profile.validate().unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Validation {
                field: "has_credit_card",
                ..
            }
        ));
    }

    #[test]
    fn test_negative_balance_rejected() {
        let mut profile = baseline();
        profile.balance = -1.0;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_deserializes_training_column_names() {
        let json = r#"{
            "CreditScore": 700,
            "Gender": "Male",
            "Age": 35,
            "Tenure": 3,
            "Balance": 120000.5,
            "NumOfProducts": 1,
            "HasCrCard": 0,
            "IsActiveMember": 1,
            "EstimatedSalary": 85000.0,
            "Geography": "Spain"
        }"#;

        let profile: CustomerProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.credit_score, 700);
        assert_eq!(profile.geography, "Spain");
        assert!(profile.validate().is_ok());
    }
}
