//! Risk level value object (1-3 ordinal scale).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordinal risk classification of a status measured against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RiskLevel {
    Low = 1,
    Approaching = 2,
    AtRisk = 3,
}

impl RiskLevel {
    /// All levels from most to least severe.
    pub const BY_SEVERITY: [RiskLevel; 3] =
        [RiskLevel::AtRisk, RiskLevel::Approaching, RiskLevel::Low];

    /// Returns the ordinal value.
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// Returns the ordinal as a score for weighting.
    pub fn score(&self) -> f64 {
        f64::from(self.ordinal())
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low Risk",
            RiskLevel::Approaching => "Approaching Risk",
            RiskLevel::AtRisk => "At Risk",
        }
    }

    /// Returns the summary heading used when listing items at this level.
    pub fn summary_heading(&self) -> &'static str {
        match self {
            RiskLevel::Low => {
                "The following sub risk drivers are in good standing with the project's requirements"
            }
            RiskLevel::Approaching => {
                "The following sub risk drivers are within bounds but should be monitored"
            }
            RiskLevel::AtRisk => "The following sub risk drivers offer the most risk",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
