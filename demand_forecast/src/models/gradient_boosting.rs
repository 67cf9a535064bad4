//! Gradient-boosted regression trees backed by the `gbdt` crate
//!
//! Squared-error boosting: the ensemble starts from the mean target and each
//! stage fits a depth-limited tree to the current residuals, scaled by the
//! learning rate. Feature rows are converted to `gbdt`'s single-precision
//! [`DataVec`] on the way in and predictions widened back to `f64`.

use crate::config::ForecastConfig;
use crate::error::{ForecastError, Result};
use crate::models::{check_training_set, ForecastModel, TrainedForecastModel};
use gbdt::config::Config as GbdtConfig;
use gbdt::decision_tree::{Data, DataVec, ValueType};
use gbdt::gradient_boost::GBDT;
use std::fmt;
use tracing::debug;

const LOSS: &str = "SquaredError";

/// Gradient boosting regressor
#[derive(Debug, Clone)]
pub struct GradientBoostingRegressor {
    /// Name of the model
    name: String,
    /// Number of boosting stages
    n_estimators: usize,
    /// Shrinkage per stage
    learning_rate: f64,
    /// Maximum depth of each tree
    max_depth: u32,
    /// Minimum rows per leaf
    min_samples_leaf: usize,
    /// Fraction of rows per stage
    subsample: f64,
}

/// Trained gradient boosting ensemble
pub struct TrainedGradientBoosting {
    name: String,
    model: GBDT,
    n_estimators: usize,
    n_features: usize,
    train_mse: f64,
}

impl GradientBoostingRegressor {
    /// Create a new regressor with depth-3 trees and no subsampling
    pub fn new(n_estimators: usize, learning_rate: f64) -> Result<Self> {
        if n_estimators == 0 {
            return Err(ForecastError::InvalidParameter(
                "Number of estimators must be positive".to_string(),
            ));
        }
        if !(learning_rate > 0.0 && learning_rate.is_finite()) {
            return Err(ForecastError::InvalidParameter(
                "Learning rate must be positive".to_string(),
            ));
        }

        Ok(Self {
            name: format!(
                "Gradient Boosting (n_estimators={}, learning_rate={})",
                n_estimators, learning_rate
            ),
            n_estimators,
            learning_rate,
            max_depth: 3,
            min_samples_leaf: 1,
            subsample: 1.0,
        })
    }

    /// Build a regressor from the model section of a forecast config
    pub fn from_config(config: &ForecastConfig) -> Result<Self> {
        config.validate()?;
        Self::new(config.n_estimators, config.learning_rate)?
            .with_max_depth(config.max_depth)?
            .with_min_samples_leaf(config.min_samples_leaf)?
            .with_subsample(config.subsample)
    }

    /// Set the maximum depth of each tree
    pub fn with_max_depth(mut self, max_depth: usize) -> Result<Self> {
        self.max_depth = u32::try_from(max_depth)
            .ok()
            .filter(|d| *d > 0)
            .ok_or_else(|| {
                ForecastError::InvalidParameter(format!("Invalid max depth: {}", max_depth))
            })?;
        Ok(self)
    }

    /// Set the minimum number of rows in a leaf
    pub fn with_min_samples_leaf(mut self, min_samples_leaf: usize) -> Result<Self> {
        if min_samples_leaf == 0 {
            return Err(ForecastError::InvalidParameter(
                "Minimum leaf size must be at least 1".to_string(),
            ));
        }
        self.min_samples_leaf = min_samples_leaf;
        Ok(self)
    }

    /// Set the row fraction used by each stage
    pub fn with_subsample(mut self, subsample: f64) -> Result<Self> {
        if !(subsample > 0.0 && subsample <= 1.0) {
            return Err(ForecastError::InvalidParameter(
                "Subsample must be in (0, 1]".to_string(),
            ));
        }
        self.subsample = subsample;
        Ok(self)
    }

    fn gbdt_config(&self, n_features: usize) -> GbdtConfig {
        let mut config = GbdtConfig::new();
        config.set_feature_size(n_features);
        config.set_max_depth(self.max_depth);
        config.set_min_leaf_size(self.min_samples_leaf);
        config.set_iterations(self.n_estimators);
        config.set_shrinkage(self.learning_rate as ValueType);
        config.set_loss(LOSS);
        config.set_debug(false);
        config.set_data_sample_ratio(self.subsample);
        config.set_feature_sample_ratio(1.0);
        config
    }
}

fn to_test_data(rows: &[Vec<f64>]) -> DataVec {
    rows.iter()
        .map(|row| Data::new_test_data(row.iter().map(|&v| v as ValueType).collect(), None))
        .collect()
}

impl ForecastModel for GradientBoostingRegressor {
    type Trained = TrainedGradientBoosting;

    fn train(&self, features: &[Vec<f64>], targets: &[f64]) -> Result<Self::Trained> {
        let n_features = check_training_set(features, targets)?;

        let mut training: DataVec = features
            .iter()
            .zip(targets)
            .map(|(row, &target)| {
                Data::new_training_data(
                    row.iter().map(|&v| v as ValueType).collect(),
                    1.0,
                    target as ValueType,
                    None,
                )
            })
            .collect();

        let mut model = GBDT::new(&self.gbdt_config(n_features));
        model.fit(&mut training);

        let mut trained = TrainedGradientBoosting {
            name: self.name.clone(),
            model,
            n_estimators: self.n_estimators,
            n_features,
            train_mse: f64::NAN,
        };
        let predicted = trained.predict(features);
        trained.train_mse = retail_math::mean_squared_error(targets, &predicted)?;

        debug!(
            rows = targets.len(),
            stages = self.n_estimators,
            train_mse = trained.train_mse,
            "gradient boosting fitted"
        );
        Ok(trained)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl TrainedGradientBoosting {
    /// Number of fitted stages
    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }

    /// Mean squared error of the fitted ensemble on its training rows
    pub fn train_mse(&self) -> f64 {
        self.train_mse
    }

    /// Feature width expected by `predict_row`
    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

impl fmt::Debug for TrainedGradientBoosting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrainedGradientBoosting")
            .field("name", &self.name)
            .field("n_estimators", &self.n_estimators)
            .field("n_features", &self.n_features)
            .field("train_mse", &self.train_mse)
            .finish()
    }
}

impl TrainedForecastModel for TrainedGradientBoosting {
    fn predict_row(&self, row: &[f64]) -> f64 {
        self.predict(&[row.to_vec()])
            .first()
            .copied()
            .unwrap_or(f64::NAN)
    }

    fn predict(&self, rows: &[Vec<f64>]) -> Vec<f64> {
        if rows.is_empty() {
            return Vec::new();
        }
        self.model
            .predict(&to_test_data(rows))
            .into_iter()
            .map(|v| v as f64)
            .collect()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step_data() -> (Vec<Vec<f64>>, Vec<f64>) {
        let features: Vec<Vec<f64>> = (0..20).map(|i| vec![i as f64, (i % 2) as f64]).collect();
        let targets: Vec<f64> = (0..20).map(|i| if i < 10 { 5.0 } else { 25.0 }).collect();
        (features, targets)
    }

    #[test]
    fn test_fits_step_function() {
        let (features, targets) = step_data();
        let model = GradientBoostingRegressor::new(100, 0.1).unwrap();
        let trained = model.train(&features, &targets).unwrap();

        assert_eq!(trained.n_estimators(), 100);
        assert!((trained.predict_row(&[2.0, 0.0]) - 5.0).abs() < 0.1);
        assert!((trained.predict_row(&[15.0, 1.0]) - 25.0).abs() < 0.1);
    }

    #[test]
    fn test_single_split_separates_groups() {
        let features = vec![vec![0.0], vec![1.0], vec![2.0], vec![3.0]];
        let targets = vec![10.0, 10.0, 30.0, 30.0];
        let trained = GradientBoostingRegressor::new(100, 0.1)
            .unwrap()
            .with_max_depth(1)
            .unwrap()
            .train(&features, &targets)
            .unwrap();

        assert!((trained.predict_row(&[0.0]) - 10.0).abs() < 0.1);
        assert!((trained.predict_row(&[3.0]) - 30.0).abs() < 0.1);
        assert!(trained.predict_row(&[0.5]) < trained.predict_row(&[2.5]));
    }

    #[test]
    fn test_constant_feature_predicts_mean() {
        let features = vec![vec![1.0], vec![1.0], vec![1.0]];
        let targets = vec![1.0, 2.0, 3.0];
        let trained = GradientBoostingRegressor::new(10, 0.1)
            .unwrap()
            .train(&features, &targets)
            .unwrap();

        assert!((trained.predict_row(&[1.0]) - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(GradientBoostingRegressor::new(0, 0.1).is_err());
        assert!(GradientBoostingRegressor::new(10, 0.0).is_err());
        let model = GradientBoostingRegressor::new(10, 0.1).unwrap();
        assert!(model.clone().with_subsample(1.5).is_err());
        assert!(model.clone().with_max_depth(0).is_err());
        assert!(model.with_min_samples_leaf(0).is_err());
    }

    #[test]
    fn test_degenerate_training_set() {
        let model = GradientBoostingRegressor::new(10, 0.1).unwrap();
        assert!(matches!(
            model.train(&[], &[]),
            Err(ForecastError::ModelFit(_))
        ));
        assert!(matches!(
            model.train(&[vec![f64::NAN]], &[1.0]),
            Err(ForecastError::ModelFit(_))
        ));
        assert!(matches!(
            model.train(&[vec![1.0], vec![2.0, 3.0]], &[1.0, 2.0]),
            Err(ForecastError::ModelFit(_))
        ));
    }
}
