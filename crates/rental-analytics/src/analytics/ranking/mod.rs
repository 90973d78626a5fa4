mod comparison;
mod recommendations;

pub use comparison::PropertyComparison;
pub use recommendations::{
    assess_risk, identify_strengths, identify_weaknesses, reasoning_for, Recommendation,
    RiskLevel,
};

use super::domain::{PropertyId, PropertyRecord};
use super::scoring::{PropertyScorer, ScoreResult, ScoreWeights};
use serde::Serialize;

/// A portfolio entry with its 1-based position after ranking.
#[derive(Debug, Clone, Serialize)]
pub struct RankedProperty {
    pub rank: usize,
    pub property_id: PropertyId,
    pub address: String,
    pub property_type: String,
    pub purchase_price: f64,
    pub monthly_rent: f64,
    pub scores: ScoreResult,
}

impl PropertyScorer {
    /// Scores every property and orders them best first. The sort is stable,
    /// so properties with equal composites keep their input order.
    pub fn rank_properties(
        &self,
        properties: &[PropertyRecord],
        weights: &ScoreWeights,
    ) -> Vec<RankedProperty> {
        let mut scored: Vec<(&PropertyRecord, ScoreResult)> = properties
            .iter()
            .map(|record| (record, self.composite_score(&record.facts, weights)))
            .collect();

        scored.sort_by(|(_, left), (_, right)| {
            right.composite_score.total_cmp(&left.composite_score)
        });

        scored
            .into_iter()
            .enumerate()
            .map(|(index, (record, scores))| RankedProperty {
                rank: index + 1,
                property_id: record.id.clone(),
                address: record.address.clone(),
                property_type: record.property_type.clone(),
                purchase_price: record.facts.purchase_price,
                monthly_rent: record.facts.monthly_rent,
                scores,
            })
            .collect()
    }

    /// Top `top_n` properties under the profile weights, with reasoning,
    /// strengths, weaknesses and a risk level.
    pub fn recommendations(
        &self,
        properties: &[PropertyRecord],
        top_n: usize,
    ) -> Vec<Recommendation> {
        self.rank_properties(properties, &self.profile().weights)
            .into_iter()
            .take(top_n)
            .map(Recommendation::from_ranked)
            .collect()
    }

    /// Side by side view of the selected properties, in portfolio order.
    /// Ids that are not in the portfolio are skipped.
    pub fn compare(
        &self,
        properties: &[PropertyRecord],
        ids: &[PropertyId],
    ) -> Vec<PropertyComparison> {
        properties
            .iter()
            .filter(|record| ids.contains(&record.id))
            .map(|record| PropertyComparison::build(self, record))
            .collect()
    }
}
