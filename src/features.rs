//! Feature assembly for churn model inference.
//!
//! Builds the numeric vector the model was trained on. The column order
//! declared here is a contract shared with the fitted scaler and the model's
//! input layout; the scaler checks the length, but a reordering would go
//! unnoticed at runtime, so the order is pinned by tests instead.

use crate::types::customer::CustomerProfile;

/// Number of scalar columns before the one-hot geography block.
pub const BASE_FEATURE_COUNT: usize = 9;

/// Assembles fixed-order feature vectors from validated profiles.
#[derive(Debug)]
pub struct FeatureAssembler {
    geography_categories: Vec<String>,
}

impl FeatureAssembler {
    /// Create an assembler for the given geography one-hot columns, in
    /// trained order.
    pub fn new(geography_categories: Vec<String>) -> Self {
        Self {
            geography_categories,
        }
    }

    /// Assemble the feature vector for one profile.
    ///
    /// `gender_code` and `geography_one_hot` come from the
    /// [`CategoryEncoder`](crate::encoding::CategoryEncoder); the profile is
    /// assumed already validated. Order matches the training pipeline:
    /// the nine scalar columns, then the geography one-hot block.
    pub fn assemble(
        &self,
        profile: &CustomerProfile,
        gender_code: usize,
        geography_one_hot: &[f32],
    ) -> Vec<f32> {
        let mut features = Vec::with_capacity(self.feature_count());

        features.push(profile.credit_score as f32);
        features.push(gender_code as f32);
        features.push(profile.age as f32);
        features.push(profile.tenure as f32);
        features.push(profile.balance as f32);
        features.push(profile.num_of_products as f32);
        features.push(profile.has_credit_card as f32);
        features.push(profile.is_active_member as f32);
        features.push(profile.estimated_salary as f32);

        features.extend_from_slice(geography_one_hot);

        features
    }

    /// Total number of columns produced.
    pub fn feature_count(&self) -> usize {
        BASE_FEATURE_COUNT + self.geography_categories.len()
    }

    /// Column names in assembly order, matching the training data format.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names: Vec<String> = [
            "CreditScore",
            "Gender",
            "Age",
            "Tenure",
            "Balance",
            "NumOfProducts",
            "HasCrCard",
            "IsActiveMember",
            "EstimatedSalary",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        for category in &self.geography_categories {
            names.push(format!("Geography_{}", category));
        }

        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assembler() -> FeatureAssembler {
        FeatureAssembler::new(vec![
            "France".to_string(),
            "Germany".to_string(),
            "Spain".to_string(),
        ])
    }

    fn profile() -> CustomerProfile {
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
    fn test_column_order_contract() {
        // The exact order frozen into the scaler and the model input layout.
        let features = assembler().assemble(&profile(), 0, &[1.0, 0.0, 0.0]);

        assert_eq!(
            features,
            vec![650.0, 0.0, 40.0, 5.0, 50000.0, 2.0, 1.0, 1.0, 60000.0, 1.0, 0.0, 0.0]
        );
    }

    #[test]
    fn test_feature_count() {
        let asm = assembler();
        assert_eq!(asm.feature_count(), 12);
        assert_eq!(asm.feature_names().len(), 12);

        let features = asm.assemble(&profile(), 0, &[1.0, 0.0, 0.0]);
        assert_eq!(features.len(), asm.feature_count());
    }

    #[test]
    fn test_feature_names_match_training_columns() {
        let names = assembler().feature_names();
        assert_eq!(names[0], "CreditScore");
        assert_eq!(names[8], "EstimatedSalary");
        assert_eq!(names[9], "Geography_France");
        assert_eq!(names[11], "Geography_Spain");
    }

    #[test]
    fn test_flags_pass_through_as_zero_one() {
        let mut p = profile();
        p.has_credit_card = 0;
        p.is_active_member = 0;

        let features = assembler().assemble(&p, 1, &[0.0, 1.0, 0.0]);
        assert_eq!(features[6], 0.0);
        assert_eq!(features[7], 0.0);
        assert_eq!(features[1], 1.0);
    }
}
