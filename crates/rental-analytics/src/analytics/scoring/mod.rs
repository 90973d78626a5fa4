mod benchmarks;
mod category;
mod heuristics;
mod methodology;
mod weights;

pub use benchmarks::{normalize, Benchmark, Benchmarks, NEUTRAL_SCORE};
pub use category::ScoreCategory;
pub use heuristics::{condition_score, location_score};
pub use methodology::{methodology, CategoryDescription, ScoreBand, ScoringMethodology};
pub use weights::{ScoreWeights, ScoringProfile, WeightParseError};

use super::domain::PropertyFacts;
use super::metrics::{calculate_metrics, MetricsResult};
use serde::Serialize;

/// Per-category scores on the 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubScores {
    pub roi_score: f64,
    pub cap_rate_score: f64,
    pub cash_flow_score: f64,
    pub dscr_score: f64,
    pub location_score: f64,
    pub condition_score: f64,
}

impl SubScores {
    pub fn get(&self, category: ScoreCategory) -> f64 {
        match category {
            ScoreCategory::Roi => self.roi_score,
            ScoreCategory::CapRate => self.cap_rate_score,
            ScoreCategory::CashFlow => self.cash_flow_score,
            ScoreCategory::Dscr => self.dscr_score,
            ScoreCategory::Location => self.location_score,
            ScoreCategory::Condition => self.condition_score,
        }
    }

    /// Weighted mean over the recognized weight keys; zero when no
    /// recognized weight is positive.
    pub fn weighted(&self, weights: &ScoreWeights) -> f64 {
        let (weighted_sum, total_weight) = weights
            .recognized()
            .fold((0.0, 0.0), |(sum, total), (category, weight)| {
                (sum + self.get(category) * weight, total + weight)
            });

        if total_weight > 0.0 {
            weighted_sum / total_weight
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreResult {
    #[serde(flatten)]
    pub sub_scores: SubScores,
    pub composite_score: f64,
}

/// Applies a [`ScoringProfile`] to property facts.
///
/// `reference_year` anchors the property-age heuristic so scores are
/// reproducible; callers usually pass the current calendar year.
#[derive(Debug, Clone)]
pub struct PropertyScorer {
    profile: ScoringProfile,
    reference_year: i32,
}

impl PropertyScorer {
    pub fn new(profile: ScoringProfile, reference_year: i32) -> Self {
        Self {
            profile,
            reference_year,
        }
    }

    pub fn with_defaults(reference_year: i32) -> Self {
        Self::new(ScoringProfile::default(), reference_year)
    }

    pub fn profile(&self) -> &ScoringProfile {
        &self.profile
    }

    pub fn reference_year(&self) -> i32 {
        self.reference_year
    }

    pub fn sub_scores(&self, facts: &PropertyFacts) -> SubScores {
        self.sub_scores_with_metrics(facts, &calculate_metrics(facts))
    }

    pub fn sub_scores_with_metrics(
        &self,
        facts: &PropertyFacts,
        metrics: &MetricsResult,
    ) -> SubScores {
        let benchmarks = &self.profile.benchmarks;
        SubScores {
            roi_score: normalize(metrics.roi, &benchmarks.roi),
            cap_rate_score: normalize(metrics.cap_rate, &benchmarks.cap_rate),
            cash_flow_score: normalize(metrics.monthly_cash_flow, &benchmarks.cash_flow),
            dscr_score: normalize(metrics.dscr.value(), &benchmarks.dscr),
            location_score: location_score(facts),
            condition_score: condition_score(facts, self.reference_year),
        }
    }

    pub fn composite_score(&self, facts: &PropertyFacts, weights: &ScoreWeights) -> ScoreResult {
        let sub_scores = self.sub_scores(facts);
        ScoreResult {
            composite_score: sub_scores.weighted(weights),
            sub_scores,
        }
    }

    /// Composite under the profile's own weights.
    pub fn score(&self, facts: &PropertyFacts) -> ScoreResult {
        self.composite_score(facts, &self.profile.weights)
    }

    pub fn methodology(&self) -> ScoringMethodology {
        methodology(&self.profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levered_rental() -> PropertyFacts {
        PropertyFacts {
            purchase_price: 300_000.0,
            down_payment: 60_000.0,
            loan_amount: 240_000.0,
            interest_rate: 6.5,
            monthly_rent: 2_500.0,
            monthly_expenses: 500.0,
            ..PropertyFacts::default()
        }
    }

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} ± {tolerance}, got {actual}"
        );
    }

    #[test]
    fn scores_each_category_from_metrics() {
        let scorer = PropertyScorer::with_defaults(2024);
        let scores = scorer.sub_scores(&levered_rental());

        assert_close(scores.roi_score, 54.40, 0.01);
        assert_close(scores.cap_rate_score, 95.0, 1e-9);
        assert_close(scores.cash_flow_score, 70.53, 0.01);
        assert_close(scores.dscr_score, 78.14, 0.01);
        assert_eq!(scores.location_score, 50.0);
        assert_eq!(scores.condition_score, 50.0);
    }

    #[test]
    fn composite_uses_default_weights() {
        let scorer = PropertyScorer::with_defaults(2024);
        let result = scorer.score(&levered_rental());

        let expected = result.sub_scores.roi_score * 0.25
            + result.sub_scores.cap_rate_score * 0.20
            + result.sub_scores.cash_flow_score * 0.20
            + result.sub_scores.dscr_score * 0.15
            + 50.0 * 0.10
            + 50.0 * 0.10;
        assert_close(result.composite_score, expected, 1e-9);
    }

    #[test]
    fn composite_renormalizes_weights() {
        let scorer = PropertyScorer::with_defaults(2024);
        let facts = levered_rental();

        let heavy = ScoreWeights::empty().with("roi", 2.0).with("cap_rate", 2.0);
        let light = ScoreWeights::empty().with("roi", 0.5).with("cap_rate", 0.5);

        let heavy = scorer.composite_score(&facts, &heavy).composite_score;
        let light = scorer.composite_score(&facts, &light).composite_score;
        assert_close(heavy, light, 1e-9);
    }

    #[test]
    fn composite_ignores_unknown_keys_and_zero_totals() {
        let scorer = PropertyScorer::with_defaults(2024);
        let facts = levered_rental();

        let only_unknown = ScoreWeights::empty().with("walkability", 1.0);
        assert_eq!(scorer.composite_score(&facts, &only_unknown).composite_score, 0.0);

        let mixed = ScoreWeights::empty()
            .with("cap_rate", 1.0)
            .with("walkability", 5.0);
        assert_close(
            scorer.composite_score(&facts, &mixed).composite_score,
            95.0,
            1e-9,
        );
    }

    #[test]
    fn unlevered_property_gets_full_coverage_score() {
        let facts = PropertyFacts {
            loan_amount: 0.0,
            down_payment: 300_000.0,
            ..levered_rental()
        };
        let scores = PropertyScorer::with_defaults(2024).sub_scores(&facts);
        assert_eq!(scores.dscr_score, 100.0);
    }

    #[test]
    fn score_result_serializes_flat() {
        let result = PropertyScorer::with_defaults(2024).score(&levered_rental());
        let value = serde_json::to_value(result).expect("serialize score");

        assert!(value.get("roi_score").is_some());
        assert!(value.get("composite_score").is_some());
        assert!(value.get("sub_scores").is_none());
    }
}
