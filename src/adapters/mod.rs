//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `assessment` - Assessment readers (directory of files, in-memory)

pub mod assessment;

pub use assessment::{FileAssessmentReader, InMemoryAssessmentReader};
