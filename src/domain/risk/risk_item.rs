//! Risk Item - One validated sub-risk-driver row.

use serde::{Deserialize, Serialize};

use super::RiskRecord;
use crate::domain::foundation::{ItemKey, RiskError};

/// Ranking assumed when a source does not supply one (midpoint of the 1-9 scale).
pub const DEFAULT_RANKING: f64 = 5.0;

/// Smallest ranking fed into a comparison matrix; lower inputs are clamped up.
pub const MIN_RANKING: f64 = 1.0;

/// A sub-risk driver belonging to a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskItem {
    pub category: String,
    pub name: String,
    pub threshold: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub status: Option<f64>,
    #[serde(default = "default_ranking")]
    pub ranking: f64,
    #[serde(default)]
    pub weight: Option<f64>,
}

fn default_ranking() -> f64 {
    DEFAULT_RANKING
}

impl RiskItem {
    /// Creates an item with the default ranking and no status or weight.
    pub fn new(category: impl Into<String>, name: impl Into<String>, threshold: f64) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            threshold,
            unit: String::new(),
            status: None,
            ranking: DEFAULT_RANKING,
            weight: None,
        }
    }

    /// Validates a raw record and converts it into an item.
    ///
    /// # Errors
    /// - `Schema` listing every missing required field (category, item, threshold)
    /// - `InvalidInput` for non-finite numbers or a weight outside [0, 1]
    pub fn from_record(
        record: RiskRecord,
        source_label: &str,
        row: usize,
        default_ranking: f64,
    ) -> Result<Self, RiskError> {
        let missing = record.missing_fields();
        if !missing.is_empty() {
            return Err(RiskError::schema(source_label, Some(row), missing));
        }

        let item = Self {
            category: record.category.unwrap_or_default().trim().to_string(),
            name: record.item.unwrap_or_default().trim().to_string(),
            threshold: record.threshold.unwrap_or_default(),
            unit: record.unit.unwrap_or_default(),
            status: record.status,
            ranking: record.ranking.unwrap_or(default_ranking),
            weight: record.weight,
        };
        item.validate(source_label, Some(row))?;
        Ok(item)
    }

    /// Sets the unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Sets the status measurement.
    pub fn with_status(mut self, status: f64) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the pairwise ranking value.
    pub fn with_ranking(mut self, ranking: f64) -> Self {
        self.ranking = ranking;
        self
    }

    /// Sets a supplied priority weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Records a status measurement.
    pub fn set_status(&mut self, status: f64) {
        self.status = Some(status);
    }

    /// Records the weight computed for this item's category.
    pub fn set_weight(&mut self, weight: f64) {
        self.weight = Some(weight);
    }

    /// Returns the canonical join key.
    pub fn key(&self) -> ItemKey {
        ItemKey::new(&self.category, &self.name)
    }

    /// Returns the ranking used to build comparison matrices (clamped to >= 1).
    pub fn effective_ranking(&self) -> f64 {
        self.ranking.max(MIN_RANKING)
    }

    /// Checks structural and numeric invariants.
    pub fn validate(&self, source_label: &str, row: Option<usize>) -> Result<(), RiskError> {
        let mut missing = Vec::new();
        if self.category.trim().is_empty() {
            missing.push("category");
        }
        if self.name.trim().is_empty() {
            missing.push("item");
        }
        if !missing.is_empty() {
            return Err(RiskError::schema(source_label, row, missing));
        }

        if !self.threshold.is_finite() {
            return Err(RiskError::invalid_input(
                "threshold",
                format!("'{}' has non-finite threshold {}", self.name, self.threshold),
            ));
        }
        if let Some(status) = self.status {
            if !status.is_finite() {
                return Err(RiskError::invalid_input(
                    "status",
                    format!("'{}' has non-finite status {}", self.name, status),
                ));
            }
        }
        if !self.ranking.is_finite() {
            return Err(RiskError::invalid_input(
                "ranking",
                format!("'{}' has non-finite ranking {}", self.name, self.ranking),
            ));
        }
        if let Some(weight) = self.weight {
            if !(0.0..=1.0).contains(&weight) {
                return Err(RiskError::invalid_input(
                    "weight",
                    format!("'{}' has weight {} outside [0, 1]", self.name, weight),
                ));
            }
        }
        Ok(())
    }
}
