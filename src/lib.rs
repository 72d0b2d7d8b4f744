//! Risk Index - Weighted risk scoring for supply-chain assessments
//!
//! This crate turns pairwise item rankings into priority weights, classifies
//! status measurements against thresholds, and aggregates weighted risk
//! within categories and across independently sourced assessments.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use domain::foundation::{ErrorCode, RiskError, RiskLevel};
pub use domain::risk::{
    aggregate_risk, classify_risk, resolve_priority_vector, AggregateOptions, AggregateResult,
    AggregationMode, Assessment, RiskItem, RiskRecord, RiskScoring,
};
