//! Risk Classifier - Maps a status measurement onto an ordinal risk band.

use crate::domain::foundation::{RiskError, RiskLevel};

/// Width of the "approaching" band above the threshold, as a fraction of the threshold.
pub const APPROACHING_BAND_FRACTION: f64 = 0.10;

/// Classifies status measurements against thresholds.
pub struct RiskClassifier;

impl RiskClassifier {
    /// Classifies `status` against `threshold`.
    ///
    /// # Algorithm
    /// With `band = threshold * 0.10`:
    /// - `status < threshold` → `Low`
    /// - `threshold <= status <= threshold + band` → `Approaching`
    /// - otherwise → `AtRisk`
    ///
    /// Both band bounds are inclusive and compared directly, without epsilon.
    ///
    /// # Errors
    /// `InvalidInput` if the threshold is zero or either value is non-finite.
    pub fn classify(status: f64, threshold: f64) -> Result<RiskLevel, RiskError> {
        if threshold == 0.0 {
            return Err(RiskError::invalid_input(
                "threshold",
                "threshold must be non-zero",
            ));
        }
        if !threshold.is_finite() {
            return Err(RiskError::invalid_input(
                "threshold",
                format!("threshold must be finite, got {}", threshold),
            ));
        }
        if !status.is_finite() {
            return Err(RiskError::invalid_input(
                "status",
                format!("status must be finite, got {}", status),
            ));
        }

        let band = threshold * APPROACHING_BAND_FRACTION;
        let level = if status < threshold {
            RiskLevel::Low
        } else if status <= threshold + band {
            RiskLevel::Approaching
        } else {
            RiskLevel::AtRisk
        };
        Ok(level)
    }
}

/// Classifies a status measurement against its threshold.
pub fn classify_risk(status: f64, threshold: f64) -> Result<RiskLevel, RiskError> {
    RiskClassifier::classify(status, threshold)
}
