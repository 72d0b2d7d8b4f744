//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, keys, and error types that form the vocabulary
//! of the risk engine.

mod errors;
mod keys;
mod risk_level;

pub use errors::{ErrorCode, RiskError};
pub use keys::{CanonicalKey, ItemKey};
pub use risk_level::RiskLevel;
