//! Error types for the preparation pipeline

use thiserror::Error;

/// Result type alias for preparation operations
pub type Result<T> = std::result::Result<T, PrepError>;

/// Main error type for the preparation pipeline
#[derive(Error, Debug)]
pub enum PrepError {
    #[error("column not found: {0}")]
    MissingColumn(String),

    #[error("unknown category '{value}' in column '{column}'")]
    UnknownCategory { column: String, value: String },

    #[error("column '{0}' has zero range, min-max scaling is undefined")]
    DegenerateColumn(String),

    #[error("no observed values in group '{group}' of column '{column}'")]
    EmptyGroup { column: String, group: String },

    #[error("step '{step}' called at stage {actual}, expected {expected}")]
    InvalidStage {
        step: String,
        expected: String,
        actual: String,
    },

    #[error("invalid parameter: {name} = {value}, {reason}")]
    InvalidParameter {
        name: String,
        value: String,
        reason: String,
    },

    #[error("transformer not fitted")]
    NotFitted,

    #[error("data error: {0}")]
    Data(String),
}

impl From<polars::error::PolarsError> for PrepError {
    fn from(err: polars::error::PolarsError) -> Self {
        PrepError::Data(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PrepError::MissingColumn("Cabin".to_string());
        assert_eq!(err.to_string(), "column not found: Cabin");
    }

    #[test]
    fn test_unknown_category_display() {
        let err = PrepError::UnknownCategory {
            column: "Sex".to_string(),
            value: "other".to_string(),
        };
        assert_eq!(err.to_string(), "unknown category 'other' in column 'Sex'");
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::error::PolarsError::NoData("empty frame".into());
        let err: PrepError = polars_err.into();
        assert!(matches!(err, PrepError::Data(_)));
    }
}
