//! Assessment Adapters
//!
//! Implementations of the AssessmentReader port.
//!
//! ## Available Adapters
//!
//! - **FileAssessmentReader** - Reads JSON/YAML files from a directory
//! - **InMemoryAssessmentReader** - Holds record sets in memory (testing/embedding)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::assessment::{FileAssessmentReader, InMemoryAssessmentReader};
//!
//! // Production: one file per stakeholder
//! let reader = FileAssessmentReader::new("./assessments");
//!
//! // Testing: in-memory records
//! let reader = InMemoryAssessmentReader::new();
//! ```

mod file_assessment_reader;
mod in_memory_assessment_reader;

pub use file_assessment_reader::FileAssessmentReader;
pub use in_memory_assessment_reader::InMemoryAssessmentReader;
