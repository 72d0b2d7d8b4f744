//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `RISK_INDEX` prefix and nested values use double underscores as separators.
//! Every value has a default, so an empty environment is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use risk_index::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Reading assessments from {}", config.input.directory.display());
//! ```

mod engine;
mod error;
mod input;
mod logging;

pub use engine::{EngineConfig, MAX_TOP_N};
pub use error::{ConfigError, ValidationError};
pub use input::InputConfig;
pub use logging::{LogFormat, LoggingConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Aggregation settings (mode, scoring, top-N, default ranking)
    #[serde(default)]
    pub engine: EngineConfig,

    /// Assessment input location
    #[serde(default)]
    pub input: InputConfig,

    /// Log filter and format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `RISK_INDEX` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `RISK_INDEX__ENGINE__TOP_N=10` -> `engine.top_n = 10`
    /// - `RISK_INDEX__INPUT__DIRECTORY=./data` -> `input.directory = ./data`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("RISK_INDEX")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.engine.validate()?;
        self.input.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::risk::{AggregationMode, RiskScoring};
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to clear environment variables after testing
    fn clear_env() {
        env::remove_var("RISK_INDEX__ENGINE__AGGREGATION");
        env::remove_var("RISK_INDEX__ENGINE__SCORING");
        env::remove_var("RISK_INDEX__ENGINE__TOP_N");
        env::remove_var("RISK_INDEX__ENGINE__DEFAULT_RANKING");
        env::remove_var("RISK_INDEX__INPUT__DIRECTORY");
        env::remove_var("RISK_INDEX__LOGGING__FORMAT");
    }

    #[test]
    fn test_defaults_without_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.engine.aggregation, AggregationMode::Sum);
        assert_eq!(config.engine.scoring, RiskScoring::Classified);
        assert_eq!(config.engine.top_n, 5);
        assert_eq!(config.input.directory.to_str(), Some("./assessments"));
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("RISK_INDEX__ENGINE__AGGREGATION", "mean");
        env::set_var("RISK_INDEX__ENGINE__SCORING", "status");
        env::set_var("RISK_INDEX__ENGINE__TOP_N", "10");
        env::set_var("RISK_INDEX__INPUT__DIRECTORY", "/tmp/risk");
        env::set_var("RISK_INDEX__LOGGING__FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.engine.aggregation, AggregationMode::Mean);
        assert_eq!(config.engine.scoring, RiskScoring::Status);
        assert_eq!(config.engine.top_n, 10);
        assert_eq!(config.input.directory.to_str(), Some("/tmp/risk"));
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_top_n_fails_validation() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("RISK_INDEX__ENGINE__TOP_N", "0");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidTopN { value: 0, .. })
        ));
    }

    #[test]
    fn test_unknown_aggregation_fails_to_load() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("RISK_INDEX__ENGINE__AGGREGATION", "median");
        let result = AppConfig::load();
        clear_env();

        assert!(matches!(result, Err(ConfigError::LoadError(_))));
    }
}
