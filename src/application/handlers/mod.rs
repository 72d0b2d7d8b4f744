//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod risk;

pub use risk::{
    AnalyzeRiskCommand, AnalyzeRiskError, AnalyzeRiskHandler, AnalyzeRiskResult,
    CategoryWeightsError, CategoryWeightsHandler, CategoryWeightsQuery,
};
