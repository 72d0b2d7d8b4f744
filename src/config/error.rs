//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("top_n must be between 1 and {max}, got {value}")]
    InvalidTopN { value: usize, max: usize },

    #[error("default_ranking must be finite and at least 1, got {0}")]
    InvalidDefaultRanking(f64),

    #[error("Invalid log filter directive: {0}")]
    InvalidLogLevel(String),
}
