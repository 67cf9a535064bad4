//! Regression models for demand forecasting

use crate::error::{ForecastError, Result};
use std::fmt::Debug;

/// A trained model that maps feature rows to predicted quantities
pub trait TrainedForecastModel: Debug {
    /// Predict the target for one feature row
    fn predict_row(&self, row: &[f64]) -> f64;

    /// Predict the target for every row, in order
    fn predict(&self, rows: &[Vec<f64>]) -> Vec<f64> {
        rows.iter().map(|row| self.predict_row(row)).collect()
    }

    /// Name of the model
    fn name(&self) -> &str;
}

/// Forecast model that can be trained on a feature matrix
pub trait ForecastModel: Debug + Clone {
    /// The type of trained model produced
    type Trained: TrainedForecastModel;

    /// Train the model on feature rows and their targets
    fn train(&self, features: &[Vec<f64>], targets: &[f64]) -> Result<Self::Trained>;

    /// Get the name of the model
    fn name(&self) -> &str;
}

/// Reject feature matrices no model can be fitted on
pub(crate) fn check_training_set(features: &[Vec<f64>], targets: &[f64]) -> Result<usize> {
    if features.is_empty() {
        return Err(ForecastError::ModelFit(
            "Training partition is empty".to_string(),
        ));
    }
    if features.len() != targets.len() {
        return Err(ForecastError::ModelFit(format!(
            "Feature rows ({}) don't match targets ({})",
            features.len(),
            targets.len()
        )));
    }

    let width = features[0].len();
    if width == 0 {
        return Err(ForecastError::ModelFit(
            "Feature rows have no columns".to_string(),
        ));
    }
    if let Some(row) = features.iter().position(|r| r.len() != width) {
        return Err(ForecastError::ModelFit(format!(
            "Feature row {} has {} columns, expected {}",
            row,
            features[row].len(),
            width
        )));
    }
    if features.iter().flatten().any(|v| !v.is_finite()) {
        return Err(ForecastError::ModelFit(
            "Feature matrix contains non-finite values".to_string(),
        ));
    }
    if targets.iter().any(|v| !v.is_finite()) {
        return Err(ForecastError::ModelFit(
            "Targets contain non-finite values".to_string(),
        ));
    }
    Ok(width)
}

pub mod gradient_boosting;
