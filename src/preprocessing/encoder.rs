//! Categorical encoding implementations

use crate::error::{PrepError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Categorical encoder.
///
/// Label columns are mapped through fixed category-to-integer mappings
/// supplied at construction; they are never fitted, and a value outside the
/// mapping is an error. One-hot columns have their categories discovered at
/// fit time and are expanded into one indicator column per category, named
/// `{column}_{category}`, in sorted category order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Encoder {
    // Maps column name -> (category -> encoded value)
    label_mappings: HashMap<String, HashMap<String, i64>>,
    onehot_columns: Vec<String>,
    // Maps column name -> sorted observed categories
    categories: HashMap<String, Vec<String>>,
    is_fitted: bool,
}

impl Encoder {
    /// Create a new encoder
    pub fn new(
        label_mappings: HashMap<String, HashMap<String, i64>>,
        onehot_columns: Vec<String>,
    ) -> Self {
        Self {
            label_mappings,
            onehot_columns,
            categories: HashMap::new(),
            is_fitted: false,
        }
    }

    /// Fit the encoder: discover the distinct categories of every one-hot
    /// column, stored sorted so the output column order is reproducible
    pub fn fit(&mut self, df: &DataFrame) -> Result<&mut Self> {
        for col_name in &self.onehot_columns {
            let column = df
                .column(col_name)
                .map_err(|_| PrepError::MissingColumn(col_name.clone()))?;
            let ca = column.as_materialized_series().str()?;

            let distinct: BTreeSet<String> =
                ca.into_iter().flatten().map(|s| s.to_string()).collect();
            self.categories
                .insert(col_name.clone(), distinct.into_iter().collect());
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Transform the data
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(PrepError::NotFitted);
        }

        let mut result = self.transform_label(df)?;
        result = self.transform_onehot(&result)?;
        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame) -> Result<DataFrame> {
        self.fit(df)?;
        self.transform(df)
    }

    fn transform_label(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut result = df.clone();

        for (col_name, mapping) in &self.label_mappings {
            let column = df
                .column(col_name)
                .map_err(|_| PrepError::MissingColumn(col_name.clone()))?;
            let ca = column.as_materialized_series().str()?;

            let values: Vec<Option<i64>> = ca
                .into_iter()
                .map(|v| match v {
                    Some(s) => mapping
                        .get(s)
                        .copied()
                        .map(Some)
                        .ok_or_else(|| PrepError::UnknownCategory {
                            column: col_name.clone(),
                            value: s.to_string(),
                        }),
                    None => Ok(None),
                })
                .collect::<Result<_>>()?;

            let new_series = Series::new(col_name.as_str().into(), values);
            result = result.with_column(new_series)?.clone();
        }

        Ok(result)
    }

    fn transform_onehot(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut result = df.clone();

        for col_name in &self.onehot_columns {
            let categories = self
                .categories
                .get(col_name)
                .ok_or(PrepError::NotFitted)?;
            let column = df
                .column(col_name)
                .map_err(|_| PrepError::MissingColumn(col_name.clone()))?;
            let ca = column.as_materialized_series().str()?;

            if ca.null_count() > 0 {
                return Err(PrepError::Data(format!(
                    "column '{}' still has nulls, impute before encoding",
                    col_name
                )));
            }

            // Create a binary indicator column per category
            for category in categories {
                let new_col_name = format!("{}_{}", col_name, category);
                let values: Vec<i32> = ca
                    .into_iter()
                    .map(|v| if v == Some(category.as_str()) { 1 } else { 0 })
                    .collect();

                let new_series = Series::new(new_col_name.into(), values);
                result = result.with_column(new_series)?.clone();
            }

            // Drop original column
            result = result.drop(col_name)?;
        }

        Ok(result)
    }
}
