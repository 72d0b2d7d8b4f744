//! Raw risk records - Row-oriented input as produced by a spreadsheet parser.
//!
//! Every field is optional at this layer; `RiskItem::from_record` is the
//! ingestion boundary that turns a record into a validated item or a
//! `RiskError::Schema` naming what is missing.

use serde::{Deserialize, Serialize};

/// One parsed input row.
///
/// Deserialization accepts both snake_case field names and the column headers
/// used by the risk workbook ("Risk Drivers", "Sub Risk Drivers", "PV", ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskRecord {
    #[serde(
        default,
        alias = "Risk Drivers",
        alias = "risk drivers",
        alias = "Risk_Drivers",
        alias = "risk_drivers",
        alias = "Category"
    )]
    pub category: Option<String>,

    #[serde(
        default,
        alias = "Sub Risk Drivers",
        alias = "sub risk drivers",
        alias = "Sub_Risk_Drivers",
        alias = "sub_risk_drivers",
        alias = "Item",
        alias = "name"
    )]
    pub item: Option<String>,

    #[serde(default, alias = "Threshold")]
    pub threshold: Option<f64>,

    #[serde(default, alias = "Unit")]
    pub unit: Option<String>,

    #[serde(default, alias = "Status")]
    pub status: Option<f64>,

    #[serde(default, alias = "Ranking", alias = "Rank")]
    pub ranking: Option<f64>,

    #[serde(default, alias = "PV", alias = "pv", alias = "Weight")]
    pub weight: Option<f64>,
}

impl RiskRecord {
    /// Creates a record with the three required structural fields.
    pub fn new(category: impl Into<String>, item: impl Into<String>, threshold: f64) -> Self {
        Self {
            category: Some(category.into()),
            item: Some(item.into()),
            threshold: Some(threshold),
            ..Self::default()
        }
    }

    /// Sets the unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Sets the status measurement.
    pub fn with_status(mut self, status: f64) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the pairwise ranking value.
    pub fn with_ranking(mut self, ranking: f64) -> Self {
        self.ranking = Some(ranking);
        self
    }

    /// Sets a supplied priority weight.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Returns the names of required fields that are absent or blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if is_blank(&self.category) {
            missing.push("category");
        }
        if is_blank(&self.item) {
            missing.push("item");
        }
        if self.threshold.is_none() {
            missing.push("threshold");
        }
        missing
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(|s| s.trim().is_empty()).unwrap_or(true)
}

/// The records of one source (one uploaded file or one stakeholder).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    pub source: Option<String>,
    pub records: Vec<RiskRecord>,
}

impl RecordSet {
    /// Creates a labelled record set.
    pub fn new(source: impl Into<String>, records: Vec<RiskRecord>) -> Self {
        Self {
            source: Some(source.into()),
            records,
        }
    }

    /// Creates a record set without a source label.
    pub fn unlabelled(records: Vec<RiskRecord>) -> Self {
        Self {
            source: None,
            records,
        }
    }
}
