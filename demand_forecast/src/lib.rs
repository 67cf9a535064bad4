//! # Demand Forecast
//!
//! Short-term demand forecasting for supermarket products.
//!
//! ## Features
//!
//! - Sales history loading from CSV (`SaleRecord`, `SalesSnapshot`)
//! - Per-snapshot categorical encoding tables (day of week, weather)
//! - Gradient-boosted regression trees (via `gbdt`) on a seeded, reproducible split
//! - Held-out RMSE evaluation and a 7-day projection with a high-demand advisory
//!
//! ## Pipeline
//!
//! Each request runs the same steps for one (supermarket, product) pair:
//!
//! 1. **Extract** the pair's records, ordered by date
//! 2. **Encode** them into feature vectors
//! 3. **Fit** the ensemble on a seeded 80/20 split and score the test rows
//! 4. **Project** the days after the last observation
//!
//! Pairs with fewer than `min_records` observations yield
//! [`ForecastOutcome::InsufficientData`] and no model is built.
//!
//! ## Quick Start
//!
//! ```no_run
//! use demand_forecast::data::{DataLoader, SeriesKey};
//! use demand_forecast::{DemandForecaster, ForecastConfig, ForecastOutcome};
//!
//! let snapshot = DataLoader::snapshot_from_csv("sales.csv")?;
//! let forecaster = DemandForecaster::new(ForecastConfig::default().with_seed(42))?;
//!
//! match forecaster.run(&snapshot, &SeriesKey::new("A", "Rice"))? {
//!     ForecastOutcome::Forecast(report) => {
//!         println!("RMSE: {:.2}", report.rmse);
//!         for point in &report.forecast {
//!             println!("{} {:.1}", point.date, point.predicted_quantity);
//!         }
//!     }
//!     ForecastOutcome::InsufficientData { available, required, .. } => {
//!         println!("need {} records, have {}", required, available);
//!     }
//! }
//! # Ok::<(), demand_forecast::ForecastError>(())
//! ```

pub mod config;
pub mod data;
pub mod encoding;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod utils;

// Re-export commonly used types
pub use crate::config::ForecastConfig;
pub use crate::data::{DataLoader, SaleRecord, SalesSnapshot, SeriesKey};
pub use crate::encoding::{CategoryTable, EncodingTables, FeatureEncoder, FeatureVector};
pub use crate::error::ForecastError;
pub use crate::models::{ForecastModel, TrainedForecastModel};
pub use crate::pipeline::{
    DemandForecaster, EvaluationPoint, ForecastOutcome, ForecastPoint, ForecastReport,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
