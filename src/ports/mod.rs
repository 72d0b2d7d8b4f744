//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AssessmentReader` - Loads raw assessment records from a source

mod assessment_reader;

pub use assessment_reader::{AssessmentReader, AssessmentReaderError};
