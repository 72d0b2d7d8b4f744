//! Assessment - One independently sourced dataset of risk items.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{RecordSet, RiskAggregator, RiskItem};
use crate::domain::foundation::{CanonicalKey, ItemKey, RiskError};

/// Label used in errors and results when a source has no name.
pub const UNLABELLED_SOURCE: &str = "unlabelled";

/// A validated set of risk items from one source.
///
/// Deserialization runs the same checks as [`Assessment::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AssessmentData")]
pub struct Assessment {
    source: Option<String>,
    items: Vec<RiskItem>,
}

/// Unvalidated serialized form of an [`Assessment`].
#[derive(Debug, Deserialize)]
pub struct AssessmentData {
    #[serde(default)]
    source: Option<String>,
    items: Vec<RiskItem>,
}

impl TryFrom<AssessmentData> for Assessment {
    type Error = RiskError;

    fn try_from(data: AssessmentData) -> Result<Self, Self::Error> {
        Assessment::new(data.source, data.items)
    }
}

/// The items of one category, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub key: CanonicalKey,
    /// First-seen spelling of the category name.
    pub name: &'a str,
    pub items: Vec<&'a RiskItem>,
}

impl Assessment {
    /// Creates an assessment after validating every item.
    ///
    /// # Errors
    /// - `Schema` if an item has a blank category or name
    /// - `InvalidInput` for invalid numbers or a duplicate item within a category
    pub fn new(source: Option<String>, items: Vec<RiskItem>) -> Result<Self, RiskError> {
        let label = source.as_deref().unwrap_or(UNLABELLED_SOURCE);

        let mut seen: HashMap<ItemKey, usize> = HashMap::new();
        for (index, item) in items.iter().enumerate() {
            let row = index + 1;
            item.validate(label, Some(row))?;
            if let Some(first_row) = seen.insert(item.key(), row) {
                return Err(RiskError::invalid_input(
                    "item",
                    format!(
                        "duplicate item '{}' in category '{}' (rows {} and {})",
                        item.name, item.category, first_row, row
                    ),
                ));
            }
        }

        Ok(Self { source, items })
    }

    /// Validates raw records at the ingestion boundary.
    ///
    /// Rows are numbered from 1. The first invalid row fails the whole set.
    pub fn from_records(record_set: RecordSet, default_ranking: f64) -> Result<Self, RiskError> {
        let RecordSet { source, records } = record_set;
        let label = source.as_deref().unwrap_or(UNLABELLED_SOURCE).to_string();

        let items = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| RiskItem::from_record(record, &label, index + 1, default_ranking))
            .collect::<Result<Vec<_>, _>>()?;

        Self::new(source, items)
    }

    /// Creates a builder for constructing an assessment.
    pub fn builder() -> AssessmentBuilder {
        AssessmentBuilder::new()
    }

    /// Returns the source label, if any.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Returns the source label, or a placeholder for unlabelled sources.
    pub fn label(&self) -> &str {
        self.source.as_deref().unwrap_or(UNLABELLED_SOURCE)
    }

    /// Returns the items in input order.
    pub fn items(&self) -> &[RiskItem] {
        &self.items
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the assessment has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Finds an item by (raw or canonical) category and item name.
    pub fn find(&self, category: &str, item: &str) -> Option<&RiskItem> {
        let key = ItemKey::new(category, item);
        self.items.iter().find(|i| i.key() == key)
    }

    /// Groups items by canonical category, in first-seen order.
    pub fn categories(&self) -> Vec<CategoryGroup<'_>> {
        let mut groups: Vec<CategoryGroup<'_>> = Vec::new();
        let mut index: HashMap<CanonicalKey, usize> = HashMap::new();

        for item in &self.items {
            let key = CanonicalKey::new(&item.category);
            match index.get(&key) {
                Some(&i) => groups[i].items.push(item),
                None => {
                    index.insert(key.clone(), groups.len());
                    groups.push(CategoryGroup {
                        key,
                        name: &item.category,
                        items: vec![item],
                    });
                }
            }
        }

        groups
    }

    /// Records a status measurement for one item.
    ///
    /// # Errors
    /// `InvalidInput` if the item does not exist or the status is non-finite.
    pub fn set_status(&mut self, category: &str, item: &str, status: f64) -> Result<(), RiskError> {
        if !status.is_finite() {
            return Err(RiskError::invalid_input(
                "status",
                format!("'{}' status must be finite, got {}", item, status),
            ));
        }
        let key = ItemKey::new(category, item);
        let target = self
            .items
            .iter_mut()
            .find(|i| i.key() == key)
            .ok_or_else(|| {
                RiskError::invalid_input(
                    "item",
                    format!("no item '{}' in category '{}'", item, category),
                )
            })?;
        target.set_status(status);
        Ok(())
    }

    /// Returns a copy with every item's weight set from its category's priority vector.
    pub fn with_priority_weights(mut self) -> Result<Self, RiskError> {
        let weights: HashMap<ItemKey, f64> = RiskAggregator::category_weights(&self)?
            .into_iter()
            .flat_map(|category| {
                let category_key = category.key.clone();
                category
                    .items
                    .into_iter()
                    .zip(category.weights)
                    .map(move |(item, weight)| {
                        (
                            ItemKey {
                                category: category_key.clone(),
                                item: CanonicalKey::new(&item),
                            },
                            weight,
                        )
                    })
            })
            .collect();

        for item in &mut self.items {
            if let Some(&weight) = weights.get(&item.key()) {
                item.set_weight(weight);
            }
        }
        Ok(self)
    }
}

/// Builder for constructing Assessment instances.
#[derive(Debug, Default)]
pub struct AssessmentBuilder {
    source: Option<String>,
    items: Vec<RiskItem>,
}

impl AssessmentBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source label.
    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds an item.
    pub fn item(mut self, item: RiskItem) -> Self {
        self.items.push(item);
        self
    }

    /// Builds and validates the assessment.
    pub fn build(self) -> Result<Assessment, RiskError> {
        Assessment::new(self.source, self.items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::risk::{RiskRecord, DEFAULT_RANKING};

    fn sample() -> Assessment {
        Assessment::builder()
            .source("alice")
            .item(RiskItem::new("Process", "IT System Failures", 4.0).with_ranking(3.0))
            .item(RiskItem::new("Environment", "Natural Disasters", 2.0))
            .item(RiskItem::new("process", "Cost Overruns", 100.0).with_ranking(6.0))
            .build()
            .unwrap()
    }

    #[test]
    fn groups_by_canonical_category_in_first_seen_order() {
        let assessment = sample();
        let groups = assessment.categories();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Process");
        assert_eq!(groups[0].items.len(), 2);
        assert_eq!(groups[0].items[1].name, "Cost Overruns");
        assert_eq!(groups[1].key, CanonicalKey::new("environment"));
    }

    #[test]
    fn rejects_duplicate_item_within_category() {
        let err = Assessment::builder()
            .item(RiskItem::new("Process", "Cost Overruns", 1.0))
            .item(RiskItem::new("PROCESS", "cost_overruns", 2.0))
            .build()
            .unwrap_err();

        match err {
            RiskError::InvalidInput { field, reason } => {
                assert_eq!(field, "item");
                assert!(reason.contains("duplicate"));
                assert!(reason.contains("rows 1 and 2"));
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn same_item_name_in_different_categories_is_allowed() {
        let result = Assessment::builder()
            .item(RiskItem::new("Process", "Delays", 1.0))
            .item(RiskItem::new("Upstream", "Delays", 1.0))
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn blank_name_is_schema_error() {
        let err = Assessment::builder()
            .source("bob")
            .item(RiskItem::new("Process", "  ", 1.0))
            .build()
            .unwrap_err();
        assert!(matches!(err, RiskError::Schema { .. }));
    }

    #[test]
    fn from_records_reports_source_and_row() {
        let records = vec![
            RiskRecord::new("Process", "Cost Overruns", 100.0),
            RiskRecord {
                category: Some("Process".to_string()),
                item: Some("Labor Strikes".to_string()),
                ..RiskRecord::default()
            },
        ];

        let err = Assessment::from_records(RecordSet::new("carol.xlsx", records), DEFAULT_RANKING)
            .unwrap_err();
        assert_eq!(
            err,
            RiskError::schema("carol.xlsx", Some(2), vec!["threshold"])
        );
    }

    #[test]
    fn from_records_unlabelled_source() {
        let records = vec![RiskRecord::new("Process", "Cost Overruns", 100.0)];
        let assessment =
            Assessment::from_records(RecordSet::unlabelled(records), DEFAULT_RANKING).unwrap();
        assert_eq!(assessment.source(), None);
        assert_eq!(assessment.label(), UNLABELLED_SOURCE);
        assert_eq!(assessment.len(), 1);
    }

    #[test]
    fn set_status_matches_canonical_names() {
        let mut assessment = sample();
        assessment.set_status("PROCESS", "it system failures", 5.0).unwrap();
        assert_eq!(
            assessment.find("Process", "IT System Failures").unwrap().status,
            Some(5.0)
        );
    }

    #[test]
    fn set_status_unknown_item_fails() {
        let mut assessment = sample();
        let err = assessment.set_status("Process", "Nope", 1.0).unwrap_err();
        assert!(matches!(err, RiskError::InvalidInput { .. }));
    }

    #[test]
    fn deserialize_round_trips_valid_assessment() {
        let json = serde_json::to_string(&sample()).unwrap();
        let parsed: Assessment = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn deserialize_rejects_duplicate_items() {
        let json = r#"{"source": "alice", "items": [
            {"category": "Process", "name": "Cost Overruns", "threshold": 10.0, "status": 20.0},
            {"category": "Process", "name": "Cost Overruns", "threshold": 10.0, "status": 20.0}
        ]}"#;

        let err = serde_json::from_str::<Assessment>(json).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn deserialize_rejects_blank_category_and_bad_weight() {
        let blank = r#"{"items": [{"category": "", "name": "A", "threshold": 1.0}]}"#;
        assert!(serde_json::from_str::<Assessment>(blank).is_err());

        let heavy = r#"{"items": [
            {"category": "Process", "name": "A", "threshold": 1.0, "weight": 7.0}
        ]}"#;
        assert!(serde_json::from_str::<Assessment>(heavy).is_err());
    }

    #[test]
    fn with_priority_weights_sets_weights_per_category() {
        let assessment = sample().with_priority_weights().unwrap();

        let it = assessment.find("Process", "IT System Failures").unwrap();
        let cost = assessment.find("Process", "Cost Overruns").unwrap();
        let env = assessment.find("Environment", "Natural Disasters").unwrap();

        assert!((it.weight.unwrap() - 1.0 / 3.0).abs() < 1e-9);
        assert!((cost.weight.unwrap() - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(env.weight, Some(1.0));
    }
}
