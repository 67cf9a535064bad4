//! Application configuration
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML
//! file, then `SHELFCAST__*` environment variables (nested keys separated by
//! `__`, e.g. `SHELFCAST__FORECAST__SEED=7`).

use crate::Result;
use ::config::{Config, Environment, File};
use demand_forecast::ForecastConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_PREFIX: &str = "SHELFCAST";

/// Settings for the shelfcast tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Forecast pipeline parameters
    pub forecast: ForecastConfig,
    /// Stock below this level is flagged in the buyer view
    pub low_stock_threshold: f64,
    /// Default log filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            forecast: ForecastConfig::default(),
            low_stock_threshold: 10.0,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional file plus the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        let settings = builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.forecast.validate()?;
        Ok(config)
    }
}
