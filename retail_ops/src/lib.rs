//! # Retail Ops
//!
//! `retail_ops` hosts the session-side pieces around the demand forecaster:
//! supplier uploads, the buyer's stock view and sales reporting.
//!
//! ## Modules
//!
//! - **upload**: append-only log of supplier-submitted sale records, validated at entry
//! - **analytics**: totals per supermarket, per category and per day
//! - **buyer**: latest stock levels with low-stock flags and purchase simulation
//! - **demo**: seeded synthetic sales history for trying the tools out
//!
//! Uploaded rows live in an [`UploadLog`] owned by the caller and passed
//! explicitly to the functions that read it:
//!
//! ```
//! use retail_ops::analytics::sales_by_supermarket;
//! use retail_ops::demo::{generate_history, DemoSpec};
//! use retail_ops::UploadLog;
//!
//! let history = generate_history(&DemoSpec::default()).unwrap();
//! let uploads = UploadLog::new();
//! let totals = sales_by_supermarket(&uploads.combined(&history));
//! assert!(!totals.is_empty());
//! ```

use thiserror::Error;

pub mod analytics;
pub mod buyer;
pub mod config;
pub mod demo;
pub mod logging;
pub mod upload;

pub use analytics::{CategoryShare, DailyTotal, SalesSummary, SupermarketTotal};
pub use buyer::{PurchaseOutcome, StockLevel};
pub use config::AppConfig;
pub use upload::UploadLog;

/// Errors that can occur in retail operations
#[derive(Error, Debug)]
pub enum OpsError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error(transparent)]
    Forecast(#[from] demand_forecast::ForecastError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for retail operations
pub type Result<T> = std::result::Result<T, OpsError>;
