//! Data preparation module
//!
//! Provides the cleaning and feature-preparation steps for the survival
//! dataset:
//! - Missing value imputation (group-wise median, constant fill)
//! - Categorical encoding (fixed label map, one-hot expansion)
//! - Min-max scaling
//! - Family-size feature derivation
//! - Staged pipeline orchestration with enforced step order

mod config;
mod encoder;
mod features;
mod imputer;
mod pipeline;
mod scaler;

pub use config::PrepConfig;
pub use encoder::Encoder;
pub use features::family_size;
pub use imputer::{ImputeStrategy, Imputer};
pub use pipeline::{PrepPipeline, Stage};
pub use scaler::MinMaxScaler;

use crate::error::Result;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-column snapshot computed on demand, used for stage logging and
/// inspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureStats {
    pub name: String,
    pub count: usize,
    pub null_count: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub median: Option<f64>,
    pub categories: Option<Vec<String>>,
}

impl FeatureStats {
    /// Compute statistics from a numeric series
    pub fn from_numeric_series(name: &str, series: &Series) -> Result<Self> {
        let ca = series.cast(&DataType::Float64)?;
        let ca = ca.f64()?;
        Ok(Self {
            name: name.to_string(),
            count: series.len(),
            null_count: series.null_count(),
            min: ca.min(),
            max: ca.max(),
            median: ca.median(),
            categories: None,
        })
    }

    /// Compute statistics from a categorical series
    pub fn from_categorical_series(name: &str, series: &Series) -> Result<Self> {
        let ca = series.str()?;
        let categories: Vec<String> = ca
            .into_iter()
            .flatten()
            .map(|s| s.to_string())
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();
        Ok(Self {
            name: name.to_string(),
            count: series.len(),
            null_count: series.null_count(),
            min: None,
            max: None,
            median: None,
            categories: Some(categories),
        })
    }
}
