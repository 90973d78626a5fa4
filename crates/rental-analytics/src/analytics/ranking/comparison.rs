use crate::analytics::domain::{PropertyId, PropertyRecord};
use crate::analytics::metrics::{calculate_metrics, MetricsResult};
use crate::analytics::scoring::{PropertyScorer, ScoreResult};
use serde::Serialize;

/// Metrics and scores for one property, laid out for side by side display.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyComparison {
    pub property_id: PropertyId,
    pub address: String,
    pub property_type: String,
    pub purchase_price: f64,
    pub monthly_rent: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<f32>,
    pub metrics: MetricsResult,
    pub scores: ScoreResult,
}

impl PropertyComparison {
    pub(crate) fn build(scorer: &PropertyScorer, record: &PropertyRecord) -> Self {
        let metrics = calculate_metrics(&record.facts);
        let sub_scores = scorer.sub_scores_with_metrics(&record.facts, &metrics);
        let scores = ScoreResult {
            composite_score: sub_scores.weighted(&scorer.profile().weights),
            sub_scores,
        };

        Self {
            property_id: record.id.clone(),
            address: record.address.clone(),
            property_type: record.property_type.clone(),
            purchase_price: record.facts.purchase_price,
            monthly_rent: record.facts.monthly_rent,
            bedrooms: record.bedrooms,
            bathrooms: record.bathrooms,
            metrics,
            scores,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::domain::PropertyFacts;

    #[test]
    fn matches_standalone_metrics_and_score() {
        let scorer = PropertyScorer::with_defaults(2024);
        let mut record = PropertyRecord::new(
            "duplex-7",
            "7 Harbor Way",
            "Duplex",
            PropertyFacts {
                purchase_price: 410_000.0,
                down_payment: 82_000.0,
                loan_amount: 328_000.0,
                interest_rate: 6.75,
                monthly_rent: 3_400.0,
                monthly_expenses: 700.0,
                year_built: Some(1998),
                ..PropertyFacts::default()
            },
        );
        record.bedrooms = Some(4);

        let compared = PropertyComparison::build(&scorer, &record);
        assert_eq!(compared.metrics, calculate_metrics(&record.facts));
        assert_eq!(compared.scores, scorer.score(&record.facts));
        assert_eq!(compared.bedrooms, Some(4));
        assert_eq!(compared.bathrooms, None);
    }
}
