//! Titanic Prep - Tabular cleaning and feature preparation
//!
//! This crate prepares a passenger-survival dataset for binary
//! classification:
//! - Missing value imputation (group-wise median, constant fill)
//! - Categorical encoding (fixed label map, one-hot expansion)
//! - Feature engineering (family size)
//! - Min-max scaling of non-target columns
//! - Deterministic, seeded train/test split
//!
//! # Modules
//!
//! - [`preprocessing`] - Imputation, encoding, scaling, the staged pipeline
//! - [`split`] - Seeded train/test partitioning
//! - [`error`] - Error types and the crate `Result` alias
//!
//! The dataset is a [`polars`] `DataFrame` constructed by the caller;
//! loading it from disk is out of scope. [`preprocessing::PrepPipeline`]
//! owns the frame for the duration of the run and enforces the step order
//! at runtime, so out-of-order invocation is a typed error rather than a
//! silent bug.

pub mod error;
pub mod preprocessing;
pub mod split;

pub use error::{PrepError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::{PrepError, Result};
    pub use crate::preprocessing::{
        family_size, Encoder, FeatureStats, ImputeStrategy, Imputer, MinMaxScaler, PrepConfig,
        PrepPipeline, Stage,
    };
    pub use crate::split::train_test_split;
}
