//! Input configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where assessments are read from
#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Directory of JSON/YAML assessment files
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
}

impl InputConfig {
    /// Validate input configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.directory.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("input.directory"));
        }
        Ok(())
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
        }
    }
}

fn default_directory() -> PathBuf {
    PathBuf::from("./assessments")
}
