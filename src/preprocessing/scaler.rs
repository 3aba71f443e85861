//! Feature scaling implementation

use crate::error::{PrepError, Result};
use polars::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Parameters for a fitted column
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScalerParams {
    min: f64,
    max: f64,
}

/// Min-max scaler: (x - min) / (max - min), mapping each fitted column
/// onto [0, 1].
///
/// A column with zero range cannot be normalized and fails fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinMaxScaler {
    params: HashMap<String, ScalerParams>,
    is_fitted: bool,
}

impl Default for MinMaxScaler {
    fn default() -> Self {
        Self::new()
    }
}

impl MinMaxScaler {
    /// Create a new scaler
    pub fn new() -> Self {
        Self {
            params: HashMap::new(),
            is_fitted: false,
        }
    }

    /// Fit the scaler to the data
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        for col_name in columns {
            let column = df
                .column(col_name)
                .map_err(|_| PrepError::MissingColumn(col_name.to_string()))?;
            let series = column.as_materialized_series();

            let params = Self::compute_params(series, col_name)?;
            self.params.insert(col_name.to_string(), params);
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Transform the data.
    /// Builds all replacement columns in parallel, then applies them in a
    /// single pass.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(PrepError::NotFitted);
        }

        let replacements: Vec<Series> = self
            .params
            .par_iter()
            .map(|(col_name, params)| {
                let column = df
                    .column(col_name)
                    .map_err(|_| PrepError::MissingColumn(col_name.clone()))?;
                let series = column.as_materialized_series();
                Self::scale_series(series, params)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut result = df.clone();
        for scaled in replacements {
            result = result.with_column(scaled)?.clone();
        }

        Ok(result)
    }

    /// Fit and transform in one step
    pub fn fit_transform(&mut self, df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
        self.fit(df, columns)?;
        self.transform(df)
    }

    /// Reverse the transformation, recovering original units
    pub fn inverse_transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(PrepError::NotFitted);
        }

        let replacements: Vec<Series> = self
            .params
            .par_iter()
            .map(|(col_name, params)| {
                let column = df
                    .column(col_name)
                    .map_err(|_| PrepError::MissingColumn(col_name.clone()))?;
                let series = column.as_materialized_series();
                Self::unscale_series(series, params)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut result = df.clone();
        for unscaled in replacements {
            result = result.with_column(unscaled)?.clone();
        }

        Ok(result)
    }

    fn compute_params(series: &Series, col_name: &str) -> Result<ScalerParams> {
        let casted = series.cast(&DataType::Float64)?;
        let ca = casted.f64()?;

        let min = ca
            .min()
            .ok_or_else(|| PrepError::Data(format!("column '{}' has no values", col_name)))?;
        let max = ca
            .max()
            .ok_or_else(|| PrepError::Data(format!("column '{}' has no values", col_name)))?;

        if max == min {
            return Err(PrepError::DegenerateColumn(col_name.to_string()));
        }

        Ok(ScalerParams { min, max })
    }

    fn scale_series(series: &Series, params: &ScalerParams) -> Result<Series> {
        let casted = series.cast(&DataType::Float64)?;
        let ca = casted.f64()?;
        let range = params.max - params.min;

        let scaled: Float64Chunked = ca
            .into_iter()
            .map(|opt| opt.map(|v| (v - params.min) / range))
            .collect();

        Ok(scaled.with_name(series.name().clone()).into_series())
    }

    fn unscale_series(series: &Series, params: &ScalerParams) -> Result<Series> {
        let casted = series.cast(&DataType::Float64)?;
        let ca = casted.f64()?;
        let range = params.max - params.min;

        let unscaled: Float64Chunked = ca
            .into_iter()
            .map(|opt| opt.map(|v| v * range + params.min))
            .collect();

        Ok(unscaled.with_name(series.name().clone()).into_series())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minmax_range() {
        let df = df!(
            "a" => &[10.0, 20.0, 30.0, 40.0, 50.0],
        )
        .unwrap();

        let mut scaler = MinMaxScaler::new();
        let result = scaler.fit_transform(&df, &["a"]).unwrap();

        let col = result.column("a").unwrap().f64().unwrap();
        assert_eq!(col.min(), Some(0.0));
        assert_eq!(col.max(), Some(1.0));
        assert!((col.get(2).unwrap() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_column_errors() {
        let df = df!(
            "a" => &[7.0, 7.0, 7.0],
        )
        .unwrap();

        let mut scaler = MinMaxScaler::new();
        let err = scaler.fit(&df, &["a"]).unwrap_err();
        assert!(matches!(err, PrepError::DegenerateColumn(_)));
    }

    #[test]
    fn test_inverse_transform() {
        let df = df!(
            "a" => &[1.0, 2.0, 3.0, 4.0, 5.0],
        )
        .unwrap();

        let mut scaler = MinMaxScaler::new();
        let scaled = scaler.fit_transform(&df, &["a"]).unwrap();
        let unscaled = scaler.inverse_transform(&scaled).unwrap();

        let original = df.column("a").unwrap().f64().unwrap();
        let restored = unscaled.column("a").unwrap().f64().unwrap();

        for (o, r) in original.into_iter().zip(restored.into_iter()) {
            assert!((o.unwrap() - r.unwrap()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_transform_before_fit() {
        let df = df!("a" => &[1.0, 2.0]).unwrap();
        let scaler = MinMaxScaler::new();
        assert!(matches!(scaler.transform(&df), Err(PrepError::NotFitted)));
    }

    #[test]
    fn test_integer_columns_scaled() {
        let df = df!(
            "a" => &[0i64, 1, 0, 1],
        )
        .unwrap();

        let mut scaler = MinMaxScaler::new();
        let result = scaler.fit_transform(&df, &["a"]).unwrap();

        let col = result.column("a").unwrap().f64().unwrap();
        assert_eq!(col.get(0), Some(0.0));
        assert_eq!(col.get(1), Some(1.0));
    }
}
