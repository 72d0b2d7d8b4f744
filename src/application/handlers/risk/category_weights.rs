//! CategoryWeightsHandler - Query handler for the priority weights of one source.
//!
//! Weights depend only on rankings, so statuses are not required.

use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::RiskError;
use crate::domain::risk::{Assessment, CategoryWeights, RiskAggregator, DEFAULT_RANKING};
use crate::ports::{AssessmentReader, AssessmentReaderError};

/// Query for the category weights of one assessment source.
#[derive(Debug, Clone)]
pub struct CategoryWeightsQuery {
    pub source: String,
    /// Ranking assumed for records that do not carry one.
    pub default_ranking: f64,
}

impl CategoryWeightsQuery {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            default_ranking: DEFAULT_RANKING,
        }
    }
}

/// Errors from computing category weights.
#[derive(Debug, thiserror::Error)]
pub enum CategoryWeightsError {
    #[error(transparent)]
    Reader(#[from] AssessmentReaderError),

    #[error(transparent)]
    Risk(#[from] RiskError),
}

/// Handler for computing category weights.
pub struct CategoryWeightsHandler {
    reader: Arc<dyn AssessmentReader>,
}

impl CategoryWeightsHandler {
    pub fn new(reader: Arc<dyn AssessmentReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        query: CategoryWeightsQuery,
    ) -> Result<Vec<CategoryWeights>, CategoryWeightsError> {
        let set = self.reader.load(&query.source).await?;
        let assessment = Assessment::from_records(set, query.default_ranking)?;
        let weights = RiskAggregator::category_weights(&assessment)?;

        debug!(
            source = %query.source,
            categories = weights.len(),
            "Computed category weights"
        );
        Ok(weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryAssessmentReader;
    use crate::domain::risk::{RiskRecord, WeightSource};

    async fn reader_with(records: Vec<RiskRecord>) -> Arc<InMemoryAssessmentReader> {
        let reader = InMemoryAssessmentReader::new();
        reader.insert("alice", records).await;
        Arc::new(reader)
    }

    #[tokio::test]
    async fn weights_follow_rankings_without_statuses() {
        let reader = reader_with(vec![
            RiskRecord::new("Process", "A", 10.0).with_ranking(1.0),
            RiskRecord::new("Process", "B", 10.0).with_ranking(3.0),
            RiskRecord::new("Environment", "C", 10.0),
        ])
        .await;

        let weights = CategoryWeightsHandler::new(reader)
            .handle(CategoryWeightsQuery::new("alice"))
            .await
            .unwrap();

        assert_eq!(weights.len(), 2);
        assert_eq!(weights[0].source, WeightSource::Derived);
        assert!((weights[0].weights[0] - 0.25).abs() < 1e-9);
        assert!((weights[0].weights[1] - 0.75).abs() < 1e-9);
        assert_eq!(weights[0].most_important().map(|(n, _)| n), Some("B"));
        assert_eq!(weights[1].weights, vec![1.0]);
    }

    #[tokio::test]
    async fn missing_source_is_reader_error() {
        let reader = reader_with(Vec::new()).await;
        let result = CategoryWeightsHandler::new(reader)
            .handle(CategoryWeightsQuery::new("bob"))
            .await;
        assert!(matches!(result, Err(CategoryWeightsError::Reader(_))));
    }
}
