//! Missing value imputation strategies

use crate::error::{PrepError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Strategy for imputing missing values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ImputeStrategy {
    /// Replace with the median of the subgroup sharing the same values in
    /// the group columns (numeric only)
    GroupMedian { group_by: Vec<String> },
    /// Replace with a constant string (categorical)
    ConstantString(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum FillValue {
    ByGroup(HashMap<String, f64>),
    Text(String),
}

/// Imputer for handling missing values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Imputer {
    strategy: ImputeStrategy,
    fill_values: HashMap<String, FillValue>,
    is_fitted: bool,
}

impl Imputer {
    /// Create a new imputer with the specified strategy
    pub fn new(strategy: ImputeStrategy) -> Self {
        Self {
            strategy,
            fill_values: HashMap::new(),
            is_fitted: false,
        }
    }

    /// Fit the imputer to the data
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        for col_name in columns {
            if df.column(col_name).is_err() {
                return Err(PrepError::MissingColumn(col_name.to_string()));
            }

            let fill_value = match &self.strategy {
                ImputeStrategy::GroupMedian { group_by } => {
                    Self::fit_group_median(df, group_by, col_name)?
                }
                ImputeStrategy::ConstantString(val) => FillValue::Text(val.clone()),
            };
            self.fill_values.insert(col_name.to_string(), fill_value);
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Transform the data by imputing missing values
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(PrepError::NotFitted);
        }

        let mut result = df.clone();

        for (col_name, fill_value) in &self.fill_values {
            let column = result
                .column(col_name)
                .map_err(|_| PrepError::MissingColumn(col_name.clone()))?;
            let series = column.as_materialized_series().clone();

            let filled = match (&self.strategy, fill_value) {
                (ImputeStrategy::GroupMedian { group_by }, FillValue::ByGroup(medians)) => {
                    Self::fill_by_group(&result, group_by, &series, col_name, medians)?
                }
                (_, FillValue::Text(val)) => Self::fill_text(&series, val)?,
                _ => return Err(PrepError::Data("strategy/fill mismatch".to_string())),
            };

            result = result.with_column(filled)?.clone();
        }

        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
        self.fit(df, columns)?;
        self.transform(df)
    }

    /// Render per-row group keys, poisoning rows with a null key part
    fn group_keys(df: &DataFrame, group_by: &[String]) -> Result<Vec<Option<String>>> {
        let mut keys: Vec<Option<String>> = vec![Some(String::new()); df.height()];

        for (pos, name) in group_by.iter().enumerate() {
            let column = df
                .column(name)
                .map_err(|_| PrepError::MissingColumn(name.clone()))?;
            let series = column.as_materialized_series();

            let rendered: Vec<Option<String>> = match series.dtype() {
                DataType::String => series
                    .str()?
                    .into_iter()
                    .map(|v| v.map(|s| s.to_string()))
                    .collect(),
                _ => {
                    let casted = series.cast(&DataType::Int64).map_err(|_| {
                        PrepError::Data(format!("group column '{}' is not groupable", name))
                    })?;
                    casted
                        .i64()?
                        .into_iter()
                        .map(|v| v.map(|i| i.to_string()))
                        .collect()
                }
            };

            for (key, part) in keys.iter_mut().zip(rendered) {
                *key = match (key.take(), part) {
                    (Some(mut k), Some(p)) => {
                        if pos > 0 {
                            k.push('|');
                        }
                        k.push_str(&p);
                        Some(k)
                    }
                    _ => None,
                };
            }
        }

        Ok(keys)
    }

    /// Compute per-subgroup medians for one numeric column.
    ///
    /// A subgroup that needs filling but has no observed values is an error.
    fn fit_group_median(df: &DataFrame, group_by: &[String], col_name: &str) -> Result<FillValue> {
        let keys = Self::group_keys(df, group_by)?;
        let values = df
            .column(col_name)
            .map_err(|_| PrepError::MissingColumn(col_name.to_string()))?
            .as_materialized_series()
            .cast(&DataType::Float64)?;
        let ca = values.f64()?;

        let mut observed: HashMap<String, Vec<f64>> = HashMap::new();
        let mut needs_fill: Vec<String> = Vec::new();

        for (key, value) in keys.iter().zip(ca) {
            match (key, value) {
                (Some(k), Some(v)) => observed.entry(k.clone()).or_default().push(v),
                (Some(k), None) => needs_fill.push(k.clone()),
                (None, None) => {
                    return Err(PrepError::Data(format!(
                        "null group key while imputing column '{}'",
                        col_name
                    )))
                }
                (None, Some(_)) => {}
            }
        }

        let mut medians: HashMap<String, f64> = HashMap::new();
        for (key, vals) in observed {
            let group_ca = Float64Chunked::from_vec("".into(), vals);
            if let Some(median) = group_ca.median() {
                medians.insert(key, median);
            }
        }

        for key in needs_fill {
            if !medians.contains_key(&key) {
                return Err(PrepError::EmptyGroup {
                    column: col_name.to_string(),
                    group: key,
                });
            }
        }

        Ok(FillValue::ByGroup(medians))
    }

    fn fill_by_group(
        df: &DataFrame,
        group_by: &[String],
        series: &Series,
        col_name: &str,
        medians: &HashMap<String, f64>,
    ) -> Result<Series> {
        let keys = Self::group_keys(df, group_by)?;
        let values = series.cast(&DataType::Float64)?;
        let ca = values.f64()?;

        let filled: Float64Chunked = keys
            .iter()
            .zip(ca)
            .map(|(key, value)| match value {
                Some(v) => Ok(Some(v)),
                None => {
                    let k = key.as_ref().ok_or_else(|| {
                        PrepError::Data(format!(
                            "null group key while imputing column '{}'",
                            col_name
                        ))
                    })?;
                    let median = medians.get(k).ok_or_else(|| PrepError::EmptyGroup {
                        column: col_name.to_string(),
                        group: k.clone(),
                    })?;
                    Ok(Some(*median))
                }
            })
            .collect::<Result<_>>()?;

        Ok(filled.with_name(series.name().clone()).into_series())
    }

    fn fill_text(series: &Series, val: &str) -> Result<Series> {
        let ca = series.str()?;

        let filled: StringChunked = ca
            .into_iter()
            .map(|opt| Some(opt.unwrap_or(val).to_string()))
            .collect();

        Ok(filled.with_name(series.name().clone()).into_series())
    }
}
