//! Pipeline configuration

use serde::{Deserialize, Serialize};

/// Configuration for the preparation pipeline.
///
/// The defaults reproduce the reference survival dataset: drop the
/// identifier-like columns, fill missing embarkation with the most frequent
/// port, map sex to {male: 0, female: 1}, and split 80/20 with seed 42.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepConfig {
    /// Columns removed by `drop_irrelevant_columns`; all must exist
    pub columns_to_drop: Vec<String>,

    /// Constant used to fill missing embarkation values
    pub embarked_fill_value: String,

    /// Ordered category-to-integer pairs for the sex column
    pub sex_encoding: Vec<(String, i64)>,

    /// Fraction of rows assigned to the test set, in (0, 1)
    pub test_fraction: f64,

    /// Seed for the deterministic split
    pub random_seed: u64,

    /// Label column, excluded from scaling and never dropped
    pub target_column: String,
}

impl Default for PrepConfig {
    fn default() -> Self {
        Self {
            columns_to_drop: vec![
                "PassengerId".to_string(),
                "Name".to_string(),
                "Ticket".to_string(),
                "Cabin".to_string(),
            ],
            embarked_fill_value: "S".to_string(),
            sex_encoding: vec![("male".to_string(), 0), ("female".to_string(), 1)],
            test_fraction: 0.2,
            random_seed: 42,
            target_column: "Survived".to_string(),
        }
    }
}

impl PrepConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the columns removed as irrelevant
    pub fn with_columns_to_drop(mut self, columns: Vec<String>) -> Self {
        self.columns_to_drop = columns;
        self
    }

    /// Builder method to set the embarkation fill constant
    pub fn with_embarked_fill(mut self, value: impl Into<String>) -> Self {
        self.embarked_fill_value = value.into();
        self
    }

    /// Builder method to set the sex encoding pairs
    pub fn with_sex_encoding(mut self, pairs: Vec<(String, i64)>) -> Self {
        self.sex_encoding = pairs;
        self
    }

    /// Builder method to set the test fraction
    pub fn with_test_fraction(mut self, fraction: f64) -> Self {
        self.test_fraction = fraction;
        self
    }

    /// Builder method to set the split seed
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Builder method to set the target column
    pub fn with_target_column(mut self, name: impl Into<String>) -> Self {
        self.target_column = name.into();
        self
    }
}
