//! In-Memory Assessment Reader Adapter
//!
//! Holds record sets in memory. Useful for testing and for callers that
//! parse their own input.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::risk::{RecordSet, RiskRecord};
use crate::ports::{AssessmentReader, AssessmentReaderError};

/// In-memory store of assessment record sets, keyed by source label
#[derive(Debug, Clone)]
pub struct InMemoryAssessmentReader {
    sets: Arc<RwLock<BTreeMap<String, Vec<RiskRecord>>>>,
}

impl InMemoryAssessmentReader {
    /// Create an empty reader
    pub fn new() -> Self {
        Self {
            sets: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Store records under a source label, replacing any previous set
    pub async fn insert(&self, source: impl Into<String>, records: Vec<RiskRecord>) {
        self.sets.write().await.insert(source.into(), records);
    }

    /// Clear all stored sets (useful for tests)
    pub async fn clear(&self) {
        self.sets.write().await.clear();
    }

    /// Get the number of stored sets
    pub async fn count(&self) -> usize {
        self.sets.read().await.len()
    }
}

impl Default for InMemoryAssessmentReader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssessmentReader for InMemoryAssessmentReader {
    async fn list_sources(&self) -> Result<Vec<String>, AssessmentReaderError> {
        Ok(self.sets.read().await.keys().cloned().collect())
    }

    async fn load(&self, source: &str) -> Result<RecordSet, AssessmentReaderError> {
        let sets = self.sets.read().await;
        sets.get(source)
            .cloned()
            .map(|records| RecordSet::new(source, records))
            .ok_or_else(|| AssessmentReaderError::NotFound(source.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_load() {
        let reader = InMemoryAssessmentReader::new();
        reader
            .insert("alice", vec![RiskRecord::new("Process", "Cost Overruns", 100.0)])
            .await;

        let set = reader.load("alice").await.unwrap();
        assert_eq!(set.source.as_deref(), Some("alice"));
        assert_eq!(set.records.len(), 1);
    }

    #[tokio::test]
    async fn test_sources_are_sorted() {
        let reader = InMemoryAssessmentReader::new();
        reader.insert("carol", Vec::new()).await;
        reader.insert("alice", Vec::new()).await;

        let sources = reader.list_sources().await.unwrap();
        assert_eq!(sources, vec!["alice".to_string(), "carol".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_source_is_not_found() {
        let reader = InMemoryAssessmentReader::default();
        let result = reader.load("nobody").await;
        assert!(matches!(result, Err(AssessmentReaderError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_clear() {
        let reader = InMemoryAssessmentReader::new();
        reader.insert("alice", Vec::new()).await;
        reader.clear().await;
        assert_eq!(reader.count().await, 0);
    }
}
