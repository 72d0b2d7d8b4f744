//! Assessment Reader Port - Interface for loading raw assessment records.
//!
//! An assessment source is anything that yields one `RecordSet` per
//! independently sourced dataset: a directory of files, an in-memory
//! fixture, or a spreadsheet export.

use async_trait::async_trait;

use crate::domain::foundation::RiskError;
use crate::domain::risk::RecordSet;

/// Errors that can occur while reading assessments
#[derive(Debug, thiserror::Error)]
pub enum AssessmentReaderError {
    #[error("Assessment source not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Failed to deserialize assessment '{source_label}': {reason}")]
    Deserialization {
        source_label: String,
        reason: String,
    },

    #[error(transparent)]
    Risk(#[from] RiskError),
}

/// Port for loading assessment record sets
#[async_trait]
pub trait AssessmentReader: Send + Sync {
    /// List available sources, in a stable order
    ///
    /// # Errors
    /// Returns `AssessmentReaderError::Io` if the source cannot be listed
    async fn list_sources(&self) -> Result<Vec<String>, AssessmentReaderError>;

    /// Load the raw records of one source
    ///
    /// # Arguments
    /// * `source` - A label returned by `list_sources`
    ///
    /// # Errors
    /// Returns `AssessmentReaderError::NotFound` if the source does not exist
    async fn load(&self, source: &str) -> Result<RecordSet, AssessmentReaderError>;

    /// Load every source in `list_sources` order
    async fn load_all(&self) -> Result<Vec<RecordSet>, AssessmentReaderError> {
        let mut sets = Vec::new();
        for source in self.list_sources().await? {
            sets.push(self.load(&source).await?);
        }
        Ok(sets)
    }
}
