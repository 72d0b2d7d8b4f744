//! Risk Aggregator - Weighted risk per category and statistics across assessments.

use std::collections::HashMap;

use super::{
    statistics, AggregateOptions, AggregateResult, AggregationMode, Assessment, AssessmentRisk,
    CategoryGroup, CategoryRisk, CategorySummary, CategoryWeights, DispersionTier, ItemStatistics,
    LevelSummary, PriorityVectorResolver, RecordSet, RiskClassifier, RiskItem, RiskScoring,
    WeightSource, WeightedItem,
};
use crate::domain::foundation::{CanonicalKey, ItemKey, RiskError, RiskLevel};

/// Orchestrates weighting, classification and aggregation.
pub struct RiskAggregator;

impl RiskAggregator {
    /// Computes every category's priority weights.
    ///
    /// A category whose items all carry a supplied weight uses those weights,
    /// rescaled to sum to 1; otherwise weights are resolved from the items'
    /// rankings, each clamped to a minimum of 1. Statuses are not needed.
    ///
    /// # Errors
    /// `InvalidInput` naming the category if supplied weights sum to zero or
    /// rankings cannot be resolved.
    pub fn category_weights(assessment: &Assessment) -> Result<Vec<CategoryWeights>, RiskError> {
        assessment
            .categories()
            .iter()
            .map(Self::weights_for)
            .collect()
    }

    /// Scores a single assessment.
    ///
    /// # Algorithm
    /// For each category: `weighted_risk[i] = weight[i] * risk[i]`, where risk
    /// is the classified level (1-3) or the raw status, and the category total
    /// is the sum or mean of the weighted risks.
    ///
    /// # Errors
    /// `InvalidInput` if an item has no status, a threshold of zero under
    /// classified scoring, or rankings that cannot be resolved.
    pub fn assess(
        assessment: &Assessment,
        options: &AggregateOptions,
    ) -> Result<AssessmentRisk, RiskError> {
        let mut categories = Vec::new();

        for group in assessment.categories() {
            let weights = Self::weights_for(&group)?;

            let items = group
                .items
                .iter()
                .zip(&weights.weights)
                .map(|(item, &weight)| Self::weigh_item(item, weight, options.scoring))
                .collect::<Result<Vec<_>, RiskError>>()?;

            let contributions: Vec<f64> = items.iter().map(|i| i.weighted_risk).collect();
            let most_important_item = weights
                .most_important()
                .map(|(name, _)| name.to_string())
                .unwrap_or_default();

            categories.push(CategoryRisk {
                key: group.key.clone(),
                category: group.name.to_string(),
                weight_source: weights.source,
                consistency_ratio: weights.consistency_ratio,
                most_important_item,
                total: options.aggregation.combine(&contributions),
                items,
            });
        }

        let levels = Self::level_summary(&categories, options.scoring);

        Ok(AssessmentRisk {
            source: assessment.label().to_string(),
            categories,
            levels,
        })
    }

    /// Scores every assessment and aggregates across them.
    ///
    /// # Algorithm
    /// - Items are matched across assessments by canonical (category, item) key.
    /// - Per item: mean and sample standard deviation (ddof = 1) of weighted
    ///   risk over the assessments containing it; one observation has std-dev 0.
    /// - Top-N by mean and top-N by std-dev are ranked independently,
    ///   descending, ties kept in first-seen order.
    /// - Overall dispersion is `mean(std_dev) * 100`.
    ///
    /// # Edge Cases
    /// - No assessments: empty result with zero dispersion
    /// - Category missing from an assessment: that assessment does not contribute to it
    pub fn aggregate(
        assessments: &[Assessment],
        options: &AggregateOptions,
    ) -> Result<AggregateResult, RiskError> {
        options.validate()?;

        let results = assessments
            .iter()
            .map(|assessment| Self::assess(assessment, options))
            .collect::<Result<Vec<_>, RiskError>>()?;

        let items = Self::item_statistics(&results);
        let categories = Self::category_summaries(&results, options.aggregation);
        let top_by_mean = Self::top_n(&items, options.top_n, |s| s.mean_weighted_risk);
        let top_by_std_dev = Self::top_n(&items, options.top_n, |s| s.std_dev);

        let std_devs: Vec<f64> = items.iter().map(|s| s.std_dev).collect();
        let overall_dispersion = statistics::mean(&std_devs) * 100.0;

        Ok(AggregateResult {
            options: options.clone(),
            assessments: results,
            categories,
            items,
            top_by_mean,
            top_by_std_dev,
            overall_dispersion,
            dispersion_tier: DispersionTier::from_percentage(overall_dispersion),
        })
    }

    /// Validates raw record sets, then aggregates them.
    ///
    /// # Errors
    /// `Schema` naming the source, row and missing fields of the first
    /// incomplete record, plus everything `aggregate` can return.
    pub fn aggregate_records(
        record_sets: Vec<RecordSet>,
        options: &AggregateOptions,
    ) -> Result<AggregateResult, RiskError> {
        options.validate()?;

        let assessments = record_sets
            .into_iter()
            .map(|set| Assessment::from_records(set, options.default_ranking))
            .collect::<Result<Vec<_>, RiskError>>()?;

        Self::aggregate(&assessments, options)
    }

    fn weights_for(group: &CategoryGroup<'_>) -> Result<CategoryWeights, RiskError> {
        let items: Vec<String> = group.items.iter().map(|i| i.name.clone()).collect();

        let supplied: Option<Vec<f64>> = group.items.iter().map(|i| i.weight).collect();
        if let Some(supplied) = supplied {
            let weights = Self::normalize_supplied(&supplied, group.name)?;
            return Ok(CategoryWeights {
                key: group.key.clone(),
                category: group.name.to_string(),
                items,
                weights,
                source: WeightSource::Supplied,
                lambda_max: None,
                consistency_ratio: None,
            });
        }

        let rankings: Vec<f64> = group.items.iter().map(|i| i.effective_ranking()).collect();
        let vector = PriorityVectorResolver::from_rankings(&rankings)
            .map_err(|e| with_context(e, format!("category '{}'", group.name)))?;

        Ok(CategoryWeights {
            key: group.key.clone(),
            category: group.name.to_string(),
            items,
            weights: vector.weights,
            source: WeightSource::Derived,
            lambda_max: Some(vector.lambda_max),
            consistency_ratio: vector.consistency_ratio,
        })
    }

    /// Rescales supplied weights to sum to 1, keeping their proportions.
    fn normalize_supplied(weights: &[f64], category: &str) -> Result<Vec<f64>, RiskError> {
        let total: f64 = weights.iter().sum();
        if !(total.is_finite() && total > 0.0) {
            return Err(RiskError::invalid_input(
                "weight",
                format!("category '{}': supplied weights sum to {}", category, total),
            ));
        }
        Ok(weights.iter().map(|w| w / total).collect())
    }

    fn weigh_item(
        item: &RiskItem,
        weight: f64,
        scoring: RiskScoring,
    ) -> Result<WeightedItem, RiskError> {
        let status = item.status.ok_or_else(|| {
            RiskError::invalid_input(
                "status",
                format!(
                    "'{}' in category '{}' has no status",
                    item.name, item.category
                ),
            )
        })?;

        let (risk_level, risk_score) = match scoring {
            RiskScoring::Classified => {
                let level = RiskClassifier::classify(status, item.threshold).map_err(|e| {
                    with_context(
                        e,
                        format!("'{}' in category '{}'", item.name, item.category),
                    )
                })?;
                (Some(level), level.score())
            }
            RiskScoring::Status => (None, status),
        };

        Ok(WeightedItem {
            key: item.key(),
            category: item.category.clone(),
            item: item.name.clone(),
            unit: item.unit.clone(),
            threshold: item.threshold,
            status: Some(status),
            weight,
            risk_level,
            risk_score,
            weighted_risk: weight * risk_score,
        })
    }

    fn level_summary(categories: &[CategoryRisk], scoring: RiskScoring) -> Vec<LevelSummary> {
        if scoring == RiskScoring::Status {
            return Vec::new();
        }

        RiskLevel::BY_SEVERITY
            .iter()
            .map(|&level| LevelSummary {
                level,
                heading: level.summary_heading().to_string(),
                items: categories
                    .iter()
                    .flat_map(|c| c.items.iter())
                    .filter(|i| i.risk_level == Some(level))
                    .map(|i| i.item.clone())
                    .collect(),
            })
            .collect()
    }

    fn item_statistics(results: &[AssessmentRisk]) -> Vec<ItemStatistics> {
        let mut order: Vec<(ItemKey, String, String, Vec<f64>)> = Vec::new();
        let mut index: HashMap<ItemKey, usize> = HashMap::new();

        for item in results.iter().flat_map(|r| r.items()) {
            match index.get(&item.key) {
                Some(&i) => order[i].3.push(item.weighted_risk),
                None => {
                    index.insert(item.key.clone(), order.len());
                    order.push((
                        item.key.clone(),
                        item.category.clone(),
                        item.item.clone(),
                        vec![item.weighted_risk],
                    ));
                }
            }
        }

        order
            .into_iter()
            .map(|(key, category, item, observations)| ItemStatistics {
                key,
                category,
                item,
                observations: observations.len(),
                mean_weighted_risk: statistics::mean(&observations),
                std_dev: statistics::sample_std_dev(&observations),
            })
            .collect()
    }

    fn category_summaries(
        results: &[AssessmentRisk],
        aggregation: AggregationMode,
    ) -> Vec<CategorySummary> {
        let mut order: Vec<(CanonicalKey, String, Vec<f64>)> = Vec::new();
        let mut index: HashMap<CanonicalKey, usize> = HashMap::new();

        for category in results.iter().flat_map(|r| r.categories.iter()) {
            match index.get(&category.key) {
                Some(&i) => order[i].2.push(category.total),
                None => {
                    index.insert(category.key.clone(), order.len());
                    order.push((
                        category.key.clone(),
                        category.category.clone(),
                        vec![category.total],
                    ));
                }
            }
        }

        order
            .into_iter()
            .map(|(key, category, totals)| CategorySummary {
                key,
                category,
                assessments: totals.len(),
                combined_total: aggregation.combine(&totals),
                std_dev: statistics::sample_std_dev(&totals),
            })
            .collect()
    }

    fn top_n(
        items: &[ItemStatistics],
        n: usize,
        metric: impl Fn(&ItemStatistics) -> f64,
    ) -> Vec<ItemStatistics> {
        let mut ranked = items.to_vec();
        // Stable sort: equal metrics keep first-seen order
        ranked.sort_by(|a, b| metric(b).total_cmp(&metric(a)));
        ranked.truncate(n);
        ranked
    }
}

/// Prefixes an `InvalidInput` reason with the category or item it concerns.
fn with_context(err: RiskError, context: String) -> RiskError {
    match err {
        RiskError::InvalidInput { field, reason } => RiskError::InvalidInput {
            field,
            reason: format!("{}: {}", context, reason),
        },
        other => other,
    }
}

/// Scores and aggregates a set of assessments.
pub fn aggregate_risk(
    assessments: &[Assessment],
    options: &AggregateOptions,
) -> Result<AggregateResult, RiskError> {
    RiskAggregator::aggregate(assessments, options)
}
