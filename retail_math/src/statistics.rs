//! Summary statistics over plain `f64` slices
//!
//! Contains the aggregate functions used by feature synthesis and reporting:
//! - Sum
//! - Mean
//! - Median

use crate::{MathError, Result};
use statrs::statistics::{Data, Median, Statistics};

fn ensure_usable(values: &[f64], what: &str) -> Result<()> {
    if values.is_empty() {
        return Err(MathError::InsufficientData(format!(
            "Cannot compute {} of an empty series",
            what
        )));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(MathError::InvalidInput(format!(
            "Cannot compute {} of a series containing non-finite values",
            what
        )));
    }
    Ok(())
}

/// Sum of all values. An empty slice sums to zero.
pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Arithmetic mean of the values
pub fn mean(values: &[f64]) -> Result<f64> {
    ensure_usable(values, "mean")?;
    Ok(values.iter().mean())
}

/// Median of the values.
///
/// For an even number of values this is the midpoint of the two central
/// order statistics.
pub fn median(values: &[f64]) -> Result<f64> {
    ensure_usable(values, "median")?;
    let data = Data::new(values.to_vec());
    let value = data.median();
    if value.is_nan() {
        return Err(MathError::CalculationError(
            "Median evaluated to NaN".to_string(),
        ));
    }
    Ok(value)
}
