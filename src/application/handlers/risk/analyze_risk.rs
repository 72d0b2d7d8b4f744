//! AnalyzeRiskHandler - Command handler for scoring a set of assessments.
//!
//! Loads record sets through the `AssessmentReader` port, validates them at
//! the ingestion boundary, and aggregates weighted risk across them.

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::foundation::RiskError;
use crate::domain::risk::{AggregateOptions, AggregateResult, RiskAggregator};
use crate::ports::{AssessmentReader, AssessmentReaderError};

/// Command to analyze assessments.
#[derive(Debug, Clone, Default)]
pub struct AnalyzeRiskCommand {
    /// Sources to analyze; every listed source when `None`.
    pub sources: Option<Vec<String>>,
    pub options: AggregateOptions,
}

impl AnalyzeRiskCommand {
    /// Analyze every available source with the given options.
    pub fn all(options: AggregateOptions) -> Self {
        Self {
            sources: None,
            options,
        }
    }
}

/// Result of a successful analysis.
pub type AnalyzeRiskResult = AggregateResult;

/// Errors from analyzing assessments.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeRiskError {
    #[error("No assessments to analyze")]
    NoAssessments,

    #[error(transparent)]
    Reader(#[from] AssessmentReaderError),

    #[error(transparent)]
    Risk(#[from] RiskError),
}

/// Handler for analyzing assessments.
pub struct AnalyzeRiskHandler {
    reader: Arc<dyn AssessmentReader>,
}

impl AnalyzeRiskHandler {
    pub fn new(reader: Arc<dyn AssessmentReader>) -> Self {
        Self { reader }
    }

    pub async fn handle(
        &self,
        command: AnalyzeRiskCommand,
    ) -> Result<AnalyzeRiskResult, AnalyzeRiskError> {
        let sources = match command.sources {
            Some(sources) => sources,
            None => self.reader.list_sources().await?,
        };

        if sources.is_empty() {
            return Err(AnalyzeRiskError::NoAssessments);
        }

        let mut record_sets = Vec::with_capacity(sources.len());
        for source in &sources {
            let set = self.reader.load(source).await?;
            debug!(
                source = %source,
                records = set.records.len(),
                "Loaded assessment records"
            );
            record_sets.push(set);
        }

        let result = RiskAggregator::aggregate_records(record_sets, &command.options)?;

        info!(
            assessments = result.assessments.len(),
            items = result.items.len(),
            overall_dispersion = result.overall_dispersion,
            dispersion_tier = result.dispersion_tier.label(),
            "Risk analysis complete"
        );

        Ok(result)
    }
}
