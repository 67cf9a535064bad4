//! Error types for the demand_forecast crate

use thiserror::Error;

/// Custom error types for the demand_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Malformed or unknown categorical value in the sales history
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    /// Training could not proceed on the supplied feature matrix
    #[error("Model fit failure: {0}")]
    ModelFit(String),

    /// Error from invalid parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Error related to data loading or shape
    #[error("Data error: {0}")]
    Data(String),

    /// Error from mathematical operations
    #[error("Math error: {0}")]
    Math(#[from] retail_math::MathError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;
