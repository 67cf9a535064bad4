//! # Retail Math
//!
//! Numeric helpers shared by the shelfcast crates.
//! This crate provides the summary statistics used for feature synthesis
//! and the regression error metrics used to evaluate demand forecasts.

use thiserror::Error;

pub mod accuracy;
pub mod statistics;

pub use accuracy::{mean_absolute_error, mean_squared_error, root_mean_squared_error, Accuracy};
pub use statistics::{mean, median, sum};

/// Errors that can occur in retail calculations
#[derive(Error, Debug)]
pub enum MathError {
    #[error("Insufficient data for calculation: {0}")]
    InsufficientData(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Calculation error: {0}")]
    CalculationError(String),
}

/// Result type for retail math operations
pub type Result<T> = std::result::Result<T, MathError>;
