//! Regression error metrics
//!
//! Used to score predicted against actual quantities on a held-out partition.

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

fn check_pair(actual: &[f64], predicted: &[f64]) -> Result<()> {
    if actual.len() != predicted.len() {
        return Err(MathError::InvalidInput(format!(
            "Actual length ({}) doesn't match predicted length ({})",
            actual.len(),
            predicted.len()
        )));
    }
    if actual.is_empty() {
        return Err(MathError::InsufficientData(
            "Need at least one actual/predicted pair".to_string(),
        ));
    }
    Ok(())
}

/// Mean absolute error between actual and predicted values
pub fn mean_absolute_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_pair(actual, predicted)?;
    let total: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum();
    Ok(total / actual.len() as f64)
}

/// Mean squared error between actual and predicted values
pub fn mean_squared_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    check_pair(actual, predicted)?;
    let total: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    Ok(total / actual.len() as f64)
}

/// Root mean squared error, in the units of the target
pub fn root_mean_squared_error(actual: &[f64], predicted: &[f64]) -> Result<f64> {
    Ok(mean_squared_error(actual, predicted)?.sqrt())
}

/// Accuracy metrics for a set of predictions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Accuracy {
    /// Mean Absolute Error
    pub mae: f64,
    /// Mean Squared Error
    pub mse: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
}

impl Accuracy {
    /// Compute all metrics at once
    pub fn evaluate(actual: &[f64], predicted: &[f64]) -> Result<Self> {
        let mse = mean_squared_error(actual, predicted)?;
        Ok(Self {
            mae: mean_absolute_error(actual, predicted)?,
            mse,
            rmse: mse.sqrt(),
        })
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Accuracy Metrics:")?;
        writeln!(f, "  MAE:  {:.4}", self.mae)?;
        writeln!(f, "  MSE:  {:.4}", self.mse)?;
        writeln!(f, "  RMSE: {:.4}", self.rmse)?;
        Ok(())
    }
}
