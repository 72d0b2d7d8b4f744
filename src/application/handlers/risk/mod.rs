//! Risk handlers - Commands and queries over assessment sources.

mod analyze_risk;
mod category_weights;

pub use analyze_risk::{AnalyzeRiskCommand, AnalyzeRiskError, AnalyzeRiskHandler, AnalyzeRiskResult};
pub use category_weights::{CategoryWeightsError, CategoryWeightsHandler, CategoryWeightsQuery};
