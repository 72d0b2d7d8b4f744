//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors raised by the risk engine.
///
/// Both variants are terminal for the operation that raised them: the
/// computation is deterministic, so retrying with the same input fails the
/// same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    #[error("Invalid input for '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    #[error(
        "Assessment '{source_label}'{} is missing required field(s): {}",
        row_suffix(.row),
        .missing.join(", ")
    )]
    Schema {
        source_label: String,
        row: Option<usize>,
        missing: Vec<String>,
    },
}

fn row_suffix(row: &Option<usize>) -> String {
    match row {
        Some(row) => format!(" row {}", row),
        None => String::new(),
    }
}

impl RiskError {
    /// Creates an invalid input error for a specific field.
    pub fn invalid_input(field: impl Into<String>, reason: impl Into<String>) -> Self {
        RiskError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a schema error listing every missing field of one record.
    pub fn schema(
        source_label: impl Into<String>,
        row: Option<usize>,
        missing: Vec<impl Into<String>>,
    ) -> Self {
        RiskError::Schema {
            source_label: source_label.into(),
            row,
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            RiskError::InvalidInput { .. } => ErrorCode::InvalidInput,
            RiskError::Schema { .. } => ErrorCode::SchemaViolation,
        }
    }
}

/// Error codes exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidInput,
    SchemaViolation,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::InvalidInput => "INVALID_INPUT",
            ErrorCode::SchemaViolation => "SCHEMA_VIOLATION",
        };
        write!(f, "{}", s)
    }
}
