//! Risk engine configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::risk::{
    AggregateOptions, AggregationMode, RiskScoring, DEFAULT_RANKING, DEFAULT_TOP_N, MIN_RANKING,
};

/// Largest accepted top-N ranking size
pub const MAX_TOP_N: usize = 1000;

/// Risk engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// How weighted risks combine within a category (`sum` or `mean`)
    #[serde(default)]
    pub aggregation: AggregationMode,

    /// What weights multiply (`classified` or `status`)
    #[serde(default)]
    pub scoring: RiskScoring,

    /// Number of items in each top-N ranking
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Ranking assumed for records without one
    #[serde(default = "default_ranking")]
    pub default_ranking: f64,
}

impl EngineConfig {
    /// Build aggregation options from this configuration
    pub fn to_options(&self) -> AggregateOptions {
        AggregateOptions {
            aggregation: self.aggregation,
            scoring: self.scoring,
            top_n: self.top_n,
            default_ranking: self.default_ranking,
        }
    }

    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.top_n == 0 || self.top_n > MAX_TOP_N {
            return Err(ValidationError::InvalidTopN {
                value: self.top_n,
                max: MAX_TOP_N,
            });
        }
        if !self.default_ranking.is_finite() || self.default_ranking < MIN_RANKING {
            return Err(ValidationError::InvalidDefaultRanking(self.default_ranking));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            aggregation: AggregationMode::default(),
            scoring: RiskScoring::default(),
            top_n: default_top_n(),
            default_ranking: default_ranking(),
        }
    }
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

fn default_ranking() -> f64 {
    DEFAULT_RANKING
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_aggregate_options() {
        let config = EngineConfig::default();
        assert_eq!(config.to_options(), AggregateOptions::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_top_n_is_invalid() {
        let config = EngineConfig {
            top_n: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidTopN { value: 0, max: MAX_TOP_N })
        );
    }

    #[test]
    fn test_top_n_upper_bound() {
        let config = EngineConfig {
            top_n: MAX_TOP_N + 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_ranking_below_one_is_invalid() {
        let config = EngineConfig {
            default_ranking: 0.5,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidDefaultRanking(0.5))
        );
    }

    #[test]
    fn test_to_options_carries_modes() {
        let config = EngineConfig {
            aggregation: AggregationMode::Mean,
            scoring: RiskScoring::Status,
            top_n: 3,
            default_ranking: 2.0,
        };
        let options = config.to_options();
        assert_eq!(options.aggregation, AggregationMode::Mean);
        assert_eq!(options.scoring, RiskScoring::Status);
        assert_eq!(options.top_n, 3);
        assert_eq!(options.default_ranking, 2.0);
    }
}
