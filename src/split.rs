//! Deterministic train/test partitioning

use crate::error::{PrepError, Result};
use polars::prelude::*;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Partition a frame into disjoint train and test sets.
///
/// Rows are shuffled with a ChaCha8 generator seeded from `seed`, so the
/// same input and seed always produce the same partition. The test set
/// takes `ceil(n * test_fraction)` rows, clamped so neither side is empty
/// when the input has at least two rows.
pub fn train_test_split(
    df: &DataFrame,
    test_fraction: f64,
    seed: u64,
) -> Result<(DataFrame, DataFrame)> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(PrepError::InvalidParameter {
            name: "test_fraction".to_string(),
            value: test_fraction.to_string(),
            reason: "must be strictly between 0 and 1".to_string(),
        });
    }

    let n = df.height();
    if n == 0 {
        return Err(PrepError::Data("cannot split an empty frame".to_string()));
    }

    let mut indices: Vec<IdxSize> = (0..n as IdxSize).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let mut n_test = (n as f64 * test_fraction).ceil() as usize;
    if n >= 2 {
        n_test = n_test.clamp(1, n - 1);
    }

    let test_idx = IdxCa::from_vec("idx".into(), indices[..n_test].to_vec());
    let train_idx = IdxCa::from_vec("idx".into(), indices[n_test..].to_vec());

    let test = df.take(&test_idx)?;
    let train = df.take(&train_idx)?;

    Ok((train, test))
}
