//! Risk Module - Pure domain services for weighted risk scoring.
//!
//! Turns pairwise item rankings into priority weights, classifies status
//! measurements against thresholds, and aggregates weighted risk within
//! categories and across independently sourced assessments.
//!
//! # Components
//!
//! - `ComparisonMatrix` - Positive pairwise-comparison matrix built from rankings
//! - `PriorityVectorResolver` - Dominant eigenvector, lambda max, consistency ratio
//! - `RiskClassifier` - Status vs. threshold → Low / Approaching / AtRisk
//! - `Assessment` - Validated items from one source, grouped by category
//! - `RiskAggregator` - Per-category weighted risk and cross-assessment statistics
//!
//! # Design Philosophy
//!
//! All functions are pure and stateless. Loading assessments is left to
//! the `AssessmentReader` port; nothing here performs I/O or logs.

mod aggregate_result;
mod assessment;
mod comparison_matrix;
mod priority_vector;
mod record;
mod risk_aggregator;
mod risk_classifier;
mod risk_item;
pub mod statistics;

// Re-export all public types
pub use aggregate_result::{
    AggregateOptions, AggregateResult, AggregationMode, AssessmentRisk, CategoryRisk,
    CategorySummary, CategoryWeights, DispersionTier, ItemStatistics, LevelSummary, RiskScoring,
    WeightSource, WeightedItem, DEFAULT_TOP_N,
};
pub use assessment::{Assessment, AssessmentBuilder, CategoryGroup, UNLABELLED_SOURCE};
pub use comparison_matrix::ComparisonMatrix;
pub use priority_vector::{
    dominant_index, resolve_priority_vector, PriorityVector, PriorityVectorResolver, RANDOM_INDEX,
};
pub use record::{RecordSet, RiskRecord};
pub use risk_aggregator::{aggregate_risk, RiskAggregator};
pub use risk_classifier::{classify_risk, RiskClassifier, APPROACHING_BAND_FRACTION};
pub use risk_item::{RiskItem, DEFAULT_RANKING, MIN_RANKING};
