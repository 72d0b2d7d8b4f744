//! Domain layer containing risk scoring logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (canonical keys, risk levels, errors)
//! - `risk` - Pure domain services for priority weighting and risk aggregation

pub mod foundation;
pub mod risk;
