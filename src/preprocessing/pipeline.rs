//! Staged preparation pipeline

use crate::error::{PrepError, Result};
use crate::split::train_test_split;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info};

use super::{family_size, Encoder, FeatureStats, ImputeStrategy, Imputer, MinMaxScaler, PrepConfig};

const PCLASS: &str = "Pclass";
const SEX: &str = "Sex";
const AGE: &str = "Age";
const SIBSP: &str = "SibSp";
const PARCH: &str = "Parch";
const EMBARKED: &str = "Embarked";
const FAMILY_SIZE: &str = "FamilySize";

/// Progress of a pipeline through its fixed step order.
///
/// Every public step checks the current stage and advances it, so invoking
/// a step out of order is a typed error instead of silently corrupting the
/// frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Raw,
    Imputed,
    Encoded,
    Engineered,
    Reduced,
    Scaled,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Raw => "Raw",
            Stage::Imputed => "Imputed",
            Stage::Encoded => "Encoded",
            Stage::Engineered => "Engineered",
            Stage::Reduced => "Reduced",
            Stage::Scaled => "Scaled",
        };
        write!(f, "{}", name)
    }
}

/// Preparation pipeline owning one dataset.
///
/// Each step is a pure frame-to-frame transformation; the pipeline stores
/// the returned frame and advances its [`Stage`]. `prepare_and_split` runs
/// the full fixed order and is the intended entry point.
#[derive(Debug)]
pub struct PrepPipeline {
    config: PrepConfig,
    data: DataFrame,
    stage: Stage,
}

impl PrepPipeline {
    /// Create a pipeline with the default configuration
    pub fn new(data: DataFrame) -> Self {
        Self::with_config(data, PrepConfig::default())
    }

    /// Create a pipeline with a custom configuration
    pub fn with_config(data: DataFrame, config: PrepConfig) -> Self {
        Self {
            config,
            data,
            stage: Stage::Raw,
        }
    }

    /// Current frame
    pub fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Current stage
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Per-column statistics of the current frame
    pub fn summarize(&self) -> Result<Vec<FeatureStats>> {
        self.data
            .get_columns()
            .iter()
            .map(|column| {
                let series = column.as_materialized_series();
                if series.dtype() == &DataType::String {
                    FeatureStats::from_categorical_series(series.name().as_str(), series)
                } else {
                    FeatureStats::from_numeric_series(series.name().as_str(), series)
                }
            })
            .collect()
    }

    fn expect_stage(&self, expected: Stage, step: &str) -> Result<()> {
        if self.stage != expected {
            return Err(PrepError::InvalidStage {
                step: step.to_string(),
                expected: expected.to_string(),
                actual: self.stage.to_string(),
            });
        }
        Ok(())
    }

    /// Fill missing ages with the median of the (class, sex) subgroup and
    /// missing embarkation with the configured constant.
    pub fn impute_missing_values(&mut self) -> Result<&mut Self> {
        self.expect_stage(Stage::Raw, "impute_missing_values")?;

        let age_nulls = self.data.column(AGE).map(|c| c.null_count()).unwrap_or(0);
        let embarked_nulls = self
            .data
            .column(EMBARKED)
            .map(|c| c.null_count())
            .unwrap_or(0);

        let mut age_imputer = Imputer::new(ImputeStrategy::GroupMedian {
            group_by: vec![PCLASS.to_string(), SEX.to_string()],
        });
        let imputed = age_imputer.fit_transform(&self.data, &[AGE])?;

        let mut embarked_imputer = Imputer::new(ImputeStrategy::ConstantString(
            self.config.embarked_fill_value.clone(),
        ));
        let imputed = embarked_imputer.fit_transform(&imputed, &[EMBARKED])?;

        debug!(age_nulls, embarked_nulls, "imputed missing values");
        self.data = imputed;
        self.stage = Stage::Imputed;
        Ok(self)
    }

    /// Label-encode sex through the configured mapping and one-hot expand
    /// embarkation.
    pub fn encode_categoricals(&mut self) -> Result<&mut Self> {
        self.expect_stage(Stage::Imputed, "encode_categoricals")?;

        let sex_mapping: HashMap<String, i64> = self.config.sex_encoding.iter().cloned().collect();
        let mut label_mappings = HashMap::new();
        label_mappings.insert(SEX.to_string(), sex_mapping);

        let mut encoder = Encoder::new(label_mappings, vec![EMBARKED.to_string()]);
        let encoded = encoder.fit_transform(&self.data)?;

        debug!(columns = encoded.width(), "encoded categorical columns");
        self.data = encoded;
        self.stage = Stage::Encoded;
        Ok(self)
    }

    /// Derive the family-size column
    pub fn engineer_family_size(&mut self) -> Result<&mut Self> {
        self.expect_stage(Stage::Encoded, "engineer_family_size")?;

        self.data = family_size(&self.data, SIBSP, PARCH, FAMILY_SIZE)?;
        self.stage = Stage::Engineered;
        Ok(self)
    }

    /// Remove the configured irrelevant columns; each must exist
    pub fn drop_irrelevant_columns(&mut self) -> Result<&mut Self> {
        self.expect_stage(Stage::Engineered, "drop_irrelevant_columns")?;

        let mut result = self.data.clone();
        for col in &self.config.columns_to_drop {
            if result.column(col).is_err() {
                return Err(PrepError::MissingColumn(col.clone()));
            }
            result = result.drop(col)?;
        }

        debug!(
            dropped = self.config.columns_to_drop.len(),
            "dropped irrelevant columns"
        );
        self.data = result;
        self.stage = Stage::Reduced;
        Ok(self)
    }

    /// Min-max scale every non-target column onto [0, 1]
    pub fn scale_numeric_features(&mut self) -> Result<&mut Self> {
        self.expect_stage(Stage::Reduced, "scale_numeric_features")?;

        let target = &self.config.target_column;
        if self.data.column(target).is_err() {
            return Err(PrepError::MissingColumn(target.clone()));
        }

        let feature_cols: Vec<String> = self
            .data
            .get_columns()
            .iter()
            .map(|c| c.name().to_string())
            .filter(|name| name != target)
            .collect();

        let mut result = self.data.clone();
        for name in &feature_cols {
            let casted = result
                .column(name)?
                .as_materialized_series()
                .cast(&DataType::Float64)?;
            result = result.with_column(casted)?.clone();
        }

        let refs: Vec<&str> = feature_cols.iter().map(|s| s.as_str()).collect();
        let mut scaler = MinMaxScaler::new();
        let scaled = scaler.fit_transform(&result, &refs)?;

        debug!(features = refs.len(), "scaled numeric features");
        self.data = scaled;
        self.stage = Stage::Scaled;
        Ok(self)
    }

    /// Terminal split of a fully prepared frame
    pub fn split(self) -> Result<(DataFrame, DataFrame)> {
        self.expect_stage(Stage::Scaled, "split")?;
        train_test_split(
            &self.data,
            self.config.test_fraction,
            self.config.random_seed,
        )
    }

    /// Run the full fixed step order, then split.
    ///
    /// This is the intended entry point: impute, encode, engineer the
    /// family-size feature, drop irrelevant columns, scale, split.
    pub fn prepare_and_split(mut self) -> Result<(DataFrame, DataFrame)> {
        self.impute_missing_values()?;
        self.encode_categoricals()?;
        self.engineer_family_size()?;
        self.drop_irrelevant_columns()?;
        self.scale_numeric_features()?;

        let (train, test) = self.split()?;
        info!(
            train_rows = train.height(),
            test_rows = test.height(),
            columns = train.width(),
            "prepared and split dataset"
        );
        Ok((train, test))
    }
}
