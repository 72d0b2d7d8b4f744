//! Aggregation options and result types.

use serde::{Deserialize, Serialize};

use super::{dominant_index, statistics};
use crate::domain::foundation::{CanonicalKey, ItemKey, RiskError, RiskLevel};

/// Number of items reported in each top-N ranking by default.
pub const DEFAULT_TOP_N: usize = 5;

/// How weighted risks are combined within a category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMode {
    #[default]
    Sum,
    Mean,
}

impl AggregationMode {
    /// Combines values; zero for an empty slice in either mode.
    pub fn combine(&self, values: &[f64]) -> f64 {
        match self {
            AggregationMode::Sum => values.iter().sum(),
            AggregationMode::Mean => statistics::mean(values),
        }
    }
}

/// What an item's weight is multiplied by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskScoring {
    /// The ordinal risk level (1, 2 or 3) from the classifier.
    #[default]
    Classified,
    /// The raw status measurement.
    Status,
}

/// Caller-selectable aggregation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateOptions {
    pub aggregation: AggregationMode,
    pub scoring: RiskScoring,
    pub top_n: usize,
    /// Ranking assumed for records that do not carry one.
    pub default_ranking: f64,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            aggregation: AggregationMode::default(),
            scoring: RiskScoring::default(),
            top_n: DEFAULT_TOP_N,
            default_ranking: super::DEFAULT_RANKING,
        }
    }
}

impl AggregateOptions {
    /// Sets the category aggregation mode.
    pub fn with_aggregation(mut self, aggregation: AggregationMode) -> Self {
        self.aggregation = aggregation;
        self
    }

    /// Sets the scoring mode.
    pub fn with_scoring(mut self, scoring: RiskScoring) -> Self {
        self.scoring = scoring;
        self
    }

    /// Sets the size of the top-N rankings.
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Checks the options before any computation runs.
    pub fn validate(&self) -> Result<(), RiskError> {
        if self.top_n == 0 {
            return Err(RiskError::invalid_input("top_n", "top_n must be at least 1"));
        }
        if !(self.default_ranking.is_finite() && self.default_ranking > 0.0) {
            return Err(RiskError::invalid_input(
                "default_ranking",
                format!("must be strictly positive, got {}", self.default_ranking),
            ));
        }
        Ok(())
    }
}

/// Where a category's weights came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightSource {
    /// Resolved from pairwise rankings.
    Derived,
    /// Supplied on every item by the source.
    Supplied,
}

/// Priority weights of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryWeights {
    pub key: CanonicalKey,
    pub category: String,
    /// Item names, in input order.
    pub items: Vec<String>,
    pub weights: Vec<f64>,
    pub source: WeightSource,
    pub lambda_max: Option<f64>,
    pub consistency_ratio: Option<f64>,
}

impl CategoryWeights {
    /// The item with the largest weight (first on ties).
    pub fn most_important(&self) -> Option<(&str, f64)> {
        let index = dominant_index(&self.weights)?;
        Some((self.items.get(index)?.as_str(), self.weights[index]))
    }
}

/// One item's contribution within one assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedItem {
    pub key: ItemKey,
    pub category: String,
    pub item: String,
    pub unit: String,
    pub threshold: f64,
    pub status: Option<f64>,
    pub weight: f64,
    /// Present when scoring is `Classified`.
    pub risk_level: Option<RiskLevel>,
    pub risk_score: f64,
    pub weighted_risk: f64,
}

/// Weighted risk of one category within one assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRisk {
    pub key: CanonicalKey,
    pub category: String,
    pub weight_source: WeightSource,
    pub consistency_ratio: Option<f64>,
    pub most_important_item: String,
    /// Sum or mean of the items' weighted risk.
    pub total: f64,
    pub items: Vec<WeightedItem>,
}

/// Item names at one risk level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSummary {
    pub level: RiskLevel,
    pub heading: String,
    pub items: Vec<String>,
}

/// Result for a single assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRisk {
    pub source: String,
    pub categories: Vec<CategoryRisk>,
    /// Items grouped by level, most severe first; empty under `Status` scoring.
    pub levels: Vec<LevelSummary>,
}

impl AssessmentRisk {
    /// Iterates every weighted item across categories.
    pub fn items(&self) -> impl Iterator<Item = &WeightedItem> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }

    /// Looks up a category by raw or canonical name.
    pub fn category(&self, name: &str) -> Option<&CategoryRisk> {
        let key = CanonicalKey::new(name);
        self.categories.iter().find(|c| c.key == key)
    }
}

/// Cross-assessment statistics of one item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStatistics {
    pub key: ItemKey,
    pub category: String,
    pub item: String,
    pub observations: usize,
    pub mean_weighted_risk: f64,
    /// Sample standard deviation; zero for a single observation.
    pub std_dev: f64,
}

/// Cross-assessment summary of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub key: CanonicalKey,
    pub category: String,
    pub assessments: usize,
    /// Category totals combined with the configured aggregation mode.
    pub combined_total: f64,
    pub std_dev: f64,
}

/// Convenience label for the overall disagreement between assessments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispersionTier {
    Allowable,
    Medium,
    High,
}

impl DispersionTier {
    /// Upper bound (inclusive) of the allowable tier, in percent.
    pub const ALLOWABLE_MAX: f64 = 10.0;
    /// Upper bound (inclusive) of the medium tier, in percent.
    pub const MEDIUM_MAX: f64 = 30.0;

    /// Classifies `mean(std_dev) * 100`.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage <= Self::ALLOWABLE_MAX {
            DispersionTier::Allowable
        } else if percentage <= Self::MEDIUM_MAX {
            DispersionTier::Medium
        } else {
            DispersionTier::High
        }
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            DispersionTier::Allowable => "allowable",
            DispersionTier::Medium => "medium",
            DispersionTier::High => "high",
        }
    }
}

/// Everything computed from a set of assessments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub options: AggregateOptions,
    pub assessments: Vec<AssessmentRisk>,
    pub categories: Vec<CategorySummary>,
    /// Per-item statistics in first-seen order.
    pub items: Vec<ItemStatistics>,
    pub top_by_mean: Vec<ItemStatistics>,
    pub top_by_std_dev: Vec<ItemStatistics>,
    /// `mean(item std_dev) * 100`.
    pub overall_dispersion: f64,
    pub dispersion_tier: DispersionTier,
}

impl AggregateResult {
    /// Looks up the statistics of one item by raw or canonical names.
    pub fn item(&self, category: &str, item: &str) -> Option<&ItemStatistics> {
        let key = ItemKey::new(category, item);
        self.items.iter().find(|s| s.key == key)
    }

    /// Looks up a category summary by raw or canonical name.
    pub fn category(&self, name: &str) -> Option<&CategorySummary> {
        let key = CanonicalKey::new(name);
        self.categories.iter().find(|c| c.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregation_mode_combines_values() {
        assert_eq!(AggregationMode::Sum.combine(&[1.0, 2.0, 3.0]), 6.0);
        assert_eq!(AggregationMode::Mean.combine(&[1.0, 2.0, 3.0]), 2.0);
        assert_eq!(AggregationMode::Mean.combine(&[]), 0.0);
    }

    #[test]
    fn options_defaults() {
        let options = AggregateOptions::default();
        assert_eq!(options.aggregation, AggregationMode::Sum);
        assert_eq!(options.scoring, RiskScoring::Classified);
        assert_eq!(options.top_n, 5);
        assert_eq!(options.default_ranking, 5.0);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn zero_top_n_is_invalid() {
        let options = AggregateOptions::default().with_top_n(0);
        assert!(options.validate().is_err());
    }

    #[test]
    fn dispersion_tier_boundaries() {
        assert_eq!(DispersionTier::from_percentage(0.0), DispersionTier::Allowable);
        assert_eq!(DispersionTier::from_percentage(10.0), DispersionTier::Allowable);
        assert_eq!(DispersionTier::from_percentage(10.01), DispersionTier::Medium);
        assert_eq!(DispersionTier::from_percentage(30.0), DispersionTier::Medium);
        assert_eq!(DispersionTier::from_percentage(30.5), DispersionTier::High);
        assert_eq!(DispersionTier::High.label(), "high");
    }

    #[test]
    fn most_important_prefers_first_on_tie() {
        let weights = CategoryWeights {
            key: CanonicalKey::new("process"),
            category: "Process".to_string(),
            items: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            weights: vec![0.4, 0.4, 0.2],
            source: WeightSource::Derived,
            lambda_max: Some(3.0),
            consistency_ratio: Some(0.0),
        };
        assert_eq!(weights.most_important(), Some(("A", 0.4)));
    }

    #[test]
    fn modes_deserialize_lowercase() {
        let mode: AggregationMode = serde_json::from_str("\"mean\"").unwrap();
        assert_eq!(mode, AggregationMode::Mean);
        let scoring: RiskScoring = serde_json::from_str("\"status\"").unwrap();
        assert_eq!(scoring, RiskScoring::Status);
    }
}
