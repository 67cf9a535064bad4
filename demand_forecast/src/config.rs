//! Forecast pipeline configuration

use crate::error::{ForecastError, Result};
use serde::{Deserialize, Serialize};

/// Parameters for one forecast request.
///
/// The seed drives the train/test permutation. With the default `subsample`
/// of 1.0 the ensemble is deterministic too, so two runs with the same config
/// and the same history produce identical results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Seed for the train/test split
    pub seed: u64,
    /// Number of boosting stages
    pub n_estimators: usize,
    /// Shrinkage applied to every tree
    pub learning_rate: f64,
    /// Maximum depth of each regression tree
    pub max_depth: usize,
    /// Minimum rows in each leaf
    pub min_samples_leaf: usize,
    /// Fraction of training rows sampled per stage; below 1.0 the sampler
    /// is not seeded
    pub subsample: f64,
    /// Fraction of the series held out for evaluation
    pub test_ratio: f64,
    /// Number of future calendar days to project
    pub horizon_days: usize,
    /// Minimum matching records before a model is fitted
    pub min_records: usize,
    /// Predicted quantity above which the high-demand advisory fires
    pub high_demand_threshold: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            n_estimators: 100,
            learning_rate: 0.1,
            max_depth: 3,
            min_samples_leaf: 1,
            subsample: 1.0,
            test_ratio: 0.2,
            horizon_days: 7,
            min_records: 20,
            high_demand_threshold: 50.0,
        }
    }
}

impl ForecastConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_n_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators;
        self
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_subsample(mut self, subsample: f64) -> Self {
        self.subsample = subsample;
        self
    }

    pub fn with_test_ratio(mut self, test_ratio: f64) -> Self {
        self.test_ratio = test_ratio;
        self
    }

    pub fn with_min_records(mut self, min_records: usize) -> Self {
        self.min_records = min_records;
        self
    }

    pub fn with_high_demand_threshold(mut self, threshold: f64) -> Self {
        self.high_demand_threshold = threshold;
        self
    }

    /// Check every parameter, reporting the first invalid one
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(ForecastError::InvalidParameter(
                "n_estimators must be positive".to_string(),
            ));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(ForecastError::InvalidParameter(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if self.max_depth == 0 || u32::try_from(self.max_depth).is_err() {
            return Err(ForecastError::InvalidParameter(
                "max_depth must be between 1 and u32::MAX".to_string(),
            ));
        }
        if self.min_samples_leaf == 0 {
            return Err(ForecastError::InvalidParameter(
                "min_samples_leaf must be at least 1".to_string(),
            ));
        }
        if !(self.subsample > 0.0 && self.subsample <= 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "subsample must be in (0, 1], got {}",
                self.subsample
            )));
        }
        if !(self.test_ratio > 0.0 && self.test_ratio < 1.0) {
            return Err(ForecastError::InvalidParameter(format!(
                "test_ratio must be in (0, 1), got {}",
                self.test_ratio
            )));
        }
        if self.horizon_days == 0 {
            return Err(ForecastError::InvalidParameter(
                "horizon_days must be positive".to_string(),
            ));
        }
        if self.min_records < 2 {
            return Err(ForecastError::InvalidParameter(
                "min_records must be at least 2".to_string(),
            ));
        }
        if !self.high_demand_threshold.is_finite() {
            return Err(ForecastError::InvalidParameter(
                "high_demand_threshold must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ForecastConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.seed, 42);
        assert_eq!(config.n_estimators, 100);
        assert_eq!(config.horizon_days, 7);
        assert_eq!(config.min_records, 20);
    }

    #[test]
    fn test_invalid_parameters() {
        assert!(ForecastConfig::default()
            .with_n_estimators(0)
            .validate()
            .is_err());
        assert!(ForecastConfig::default()
            .with_test_ratio(1.0)
            .validate()
            .is_err());
        assert!(ForecastConfig::default()
            .with_subsample(0.0)
            .validate()
            .is_err());
        assert!(ForecastConfig::default()
            .with_learning_rate(-0.1)
            .validate()
            .is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ForecastConfig = serde_json::from_str(r#"{"seed": 7}"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.n_estimators, 100);
    }
}
