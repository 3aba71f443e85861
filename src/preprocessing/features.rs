//! Derived feature construction

use crate::error::{PrepError, Result};
use polars::prelude::*;

/// Append a family-size column: siblings/spouses + parents/children + 1
/// for the passenger itself. Nulls in either input propagate to the output.
pub fn family_size(
    df: &DataFrame,
    sibsp_col: &str,
    parch_col: &str,
    out_col: &str,
) -> Result<DataFrame> {
    let sibsp = df
        .column(sibsp_col)
        .map_err(|_| PrepError::MissingColumn(sibsp_col.to_string()))?
        .as_materialized_series()
        .cast(&DataType::Int64)?;
    let parch = df
        .column(parch_col)
        .map_err(|_| PrepError::MissingColumn(parch_col.to_string()))?
        .as_materialized_series()
        .cast(&DataType::Int64)?;

    let values: Vec<Option<i64>> = sibsp
        .i64()?
        .into_iter()
        .zip(parch.i64()?)
        .map(|(s, p)| match (s, p) {
            (Some(s), Some(p)) => Some(s + p + 1),
            _ => None,
        })
        .collect();

    let mut result = df.clone();
    result = result
        .with_column(Series::new(out_col.into(), values))?
        .clone();
    Ok(result)
}
