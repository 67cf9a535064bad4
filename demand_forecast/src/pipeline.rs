//! End-to-end demand forecasting for one (supermarket, product) pair
//!
//! Extract the pair's series, encode it, fit a gradient-boosted ensemble on
//! a seeded random split, score the held-out rows and project the next days.
//! Every call builds and drops its own model; the forecaster itself only
//! holds configuration.

use crate::config::ForecastConfig;
use crate::data::{SaleRecord, SalesSnapshot, SeriesKey};
use crate::encoding::{EncodingTables, FeatureEncoder};
use crate::error::Result;
use crate::models::gradient_boosting::GradientBoostingRegressor;
use crate::models::{ForecastModel, TrainedForecastModel};
use crate::utils::{future_dates, train_test_split};
use chrono::NaiveDate;
use retail_math::Accuracy;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Predicted quantity for one future day
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub date: NaiveDate,
    pub predicted_quantity: f64,
}

/// Actual against predicted quantity for one held-out day
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvaluationPoint {
    pub date: NaiveDate,
    pub actual: f64,
    pub predicted: f64,
}

/// Everything a caller renders for one forecast request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastReport {
    /// Pair the report is about
    pub key: SeriesKey,
    /// Rows used for training
    pub train_rows: usize,
    /// RMSE on the held-out rows
    pub rmse: f64,
    /// MAE, MSE and RMSE on the held-out rows
    pub accuracy: Accuracy,
    /// Held-out rows, sorted by date
    pub evaluation: Vec<EvaluationPoint>,
    /// Future days, ascending
    pub forecast: Vec<ForecastPoint>,
    /// Median historical discount used for the future days
    pub assumed_discount: f64,
    /// Threshold the advisory was checked against
    pub high_demand_threshold: f64,
    /// Whether any future prediction exceeds the threshold
    pub high_demand: bool,
}

impl ForecastReport {
    /// Largest prediction over the horizon
    pub fn peak_demand(&self) -> Option<ForecastPoint> {
        self.forecast
            .iter()
            .copied()
            .max_by(|a, b| a.predicted_quantity.total_cmp(&b.predicted_quantity))
    }

    /// Rows held out for evaluation
    pub fn test_rows(&self) -> usize {
        self.evaluation.len()
    }
}

/// Result of a forecast request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ForecastOutcome {
    /// A model was fitted and the horizon projected
    Forecast(ForecastReport),
    /// Too few records to fit a model; nothing was trained
    InsufficientData {
        key: SeriesKey,
        available: usize,
        required: usize,
    },
}

impl ForecastOutcome {
    pub fn report(&self) -> Option<&ForecastReport> {
        match self {
            ForecastOutcome::Forecast(report) => Some(report),
            ForecastOutcome::InsufficientData { .. } => None,
        }
    }

    pub fn into_report(self) -> Option<ForecastReport> {
        match self {
            ForecastOutcome::Forecast(report) => Some(report),
            ForecastOutcome::InsufficientData { .. } => None,
        }
    }

    /// Forecast series, empty when no model was fitted
    pub fn forecast(&self) -> &[ForecastPoint] {
        self.report().map(|r| r.forecast.as_slice()).unwrap_or(&[])
    }

    pub fn is_insufficient(&self) -> bool {
        matches!(self, ForecastOutcome::InsufficientData { .. })
    }
}

/// Runs the forecasting pipeline with a fixed configuration
#[derive(Debug, Clone, Default)]
pub struct DemandForecaster {
    config: ForecastConfig,
}

impl DemandForecaster {
    /// Create a forecaster, validating the configuration
    pub fn new(config: ForecastConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ForecastConfig {
        &self.config
    }

    /// Forecast one pair, building encoding tables from the whole snapshot
    pub fn run(&self, snapshot: &SalesSnapshot, key: &SeriesKey) -> Result<ForecastOutcome> {
        let series = snapshot.series(key);
        if let Some(outcome) = self.check_history(key, series.len()) {
            return Ok(outcome);
        }
        let tables = EncodingTables::from_records(snapshot.records());
        self.forecast_checked(key, &series, &tables)
    }

    /// Forecast one pair against tables built earlier for this snapshot
    pub fn run_with_tables(
        &self,
        snapshot: &SalesSnapshot,
        tables: &EncodingTables,
        key: &SeriesKey,
    ) -> Result<ForecastOutcome> {
        let series = snapshot.series(key);
        if let Some(outcome) = self.check_history(key, series.len()) {
            return Ok(outcome);
        }
        self.forecast_checked(key, &series, tables)
    }

    /// The insufficient-data outcome when a series is below the record gate
    fn check_history(&self, key: &SeriesKey, available: usize) -> Option<ForecastOutcome> {
        if available >= self.config.min_records {
            return None;
        }
        warn!(
            %key,
            available,
            required = self.config.min_records,
            "not enough history to forecast"
        );
        Some(ForecastOutcome::InsufficientData {
            key: key.clone(),
            available,
            required: self.config.min_records,
        })
    }

    fn forecast_checked(
        &self,
        key: &SeriesKey,
        series: &[&SaleRecord],
        tables: &EncodingTables,
    ) -> Result<ForecastOutcome> {
        let report = self.forecast_series(key, series, tables)?;
        info!(
            %key,
            rmse = report.rmse,
            train_rows = report.train_rows,
            test_rows = report.test_rows(),
            "forecast complete"
        );
        if report.high_demand {
            if let Some(peak) = report.peak_demand() {
                warn!(
                    %key,
                    date = %peak.date,
                    predicted = peak.predicted_quantity,
                    threshold = report.high_demand_threshold,
                    "high demand expected"
                );
            }
        }
        Ok(ForecastOutcome::Forecast(report))
    }

    fn forecast_series(
        &self,
        key: &SeriesKey,
        series: &[&SaleRecord],
        tables: &EncodingTables,
    ) -> Result<ForecastReport> {
        let encoder = FeatureEncoder::new(tables);
        let features: Vec<Vec<f64>> = encoder
            .encode_all(series.iter().copied())?
            .iter()
            .map(|v| v.to_vec())
            .collect();
        let targets: Vec<f64> = series.iter().map(|r| r.quantity_sold).collect();

        let split = train_test_split(series.len(), self.config.test_ratio, self.config.seed)?;
        debug!(%key, train = split.train.len(), test = split.test.len(), "split series");

        let train_features: Vec<Vec<f64>> =
            split.train.iter().map(|&i| features[i].clone()).collect();
        let train_targets: Vec<f64> = split.train.iter().map(|&i| targets[i]).collect();

        let model = GradientBoostingRegressor::from_config(&self.config)?;
        let trained = model.train(&train_features, &train_targets)?;

        let mut evaluation: Vec<EvaluationPoint> = split
            .test
            .iter()
            .map(|&i| EvaluationPoint {
                date: series[i].date,
                actual: targets[i],
                predicted: trained.predict_row(&features[i]),
            })
            .collect();
        let actual: Vec<f64> = evaluation.iter().map(|p| p.actual).collect();
        let predicted: Vec<f64> = evaluation.iter().map(|p| p.predicted).collect();
        let accuracy = Accuracy::evaluate(&actual, &predicted)?;
        evaluation.sort_by_key(|p| p.date);

        let discounts: Vec<f64> = series.iter().map(|r| r.discount()).collect();
        let assumed_discount = retail_math::median(&discounts)?;

        // Non-empty: the length gate above guarantees at least two records.
        let last_date = series[series.len() - 1].date;
        let mut forecast = Vec::with_capacity(self.config.horizon_days);
        for date in future_dates(last_date, self.config.horizon_days)? {
            let row = encoder.future(date, assumed_discount)?.to_vec();
            forecast.push(ForecastPoint {
                date,
                predicted_quantity: trained.predict_row(&row),
            });
        }

        let high_demand = forecast
            .iter()
            .any(|p| p.predicted_quantity > self.config.high_demand_threshold);

        Ok(ForecastReport {
            key: key.clone(),
            train_rows: split.train.len(),
            rmse: accuracy.rmse,
            accuracy,
            evaluation,
            forecast,
            assumed_discount,
            high_demand_threshold: self.config.high_demand_threshold,
            high_demand,
        })
    }
}

/// Forecast every pair of a snapshot with shared encoding tables.
///
/// Each pair gets its own result, so a bad record only fails its own series.
pub fn forecast_all(
    forecaster: &DemandForecaster,
    snapshot: &SalesSnapshot,
) -> Vec<(SeriesKey, Result<ForecastOutcome>)> {
    let tables = EncodingTables::from_records(snapshot.records());
    snapshot
        .keys()
        .into_iter()
        .map(|key| {
            let outcome = forecaster.run_with_tables(snapshot, &tables, &key);
            (key, outcome)
        })
        .collect()
}
