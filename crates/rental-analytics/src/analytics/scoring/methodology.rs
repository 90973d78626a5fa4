use super::benchmarks::Benchmarks;
use super::category::ScoreCategory;
use super::weights::{ScoreWeights, ScoringProfile};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct CategoryDescription {
    pub category: ScoreCategory,
    pub label: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ScoreBand {
    pub range: &'static str,
    pub meaning: &'static str,
}

const SCORE_BANDS: [ScoreBand; 7] = [
    ScoreBand {
        range: "90-100",
        meaning: "Exceptional investment opportunity",
    },
    ScoreBand {
        range: "80-89",
        meaning: "Excellent investment",
    },
    ScoreBand {
        range: "70-79",
        meaning: "Very good investment",
    },
    ScoreBand {
        range: "60-69",
        meaning: "Good investment",
    },
    ScoreBand {
        range: "50-59",
        meaning: "Fair investment",
    },
    ScoreBand {
        range: "40-49",
        meaning: "Below average investment",
    },
    ScoreBand {
        range: "0-39",
        meaning: "Poor investment opportunity",
    },
];

/// Explains how composite scores are produced under a given profile.
#[derive(Debug, Clone, Serialize)]
pub struct ScoringMethodology {
    pub description: &'static str,
    pub categories: Vec<CategoryDescription>,
    pub weights: ScoreWeights,
    /// The same weights rescaled so the recognized categories sum to one.
    pub normalized_weights: ScoreWeights,
    pub benchmarks: Benchmarks,
    pub score_ranges: Vec<ScoreBand>,
}

pub fn methodology(profile: &ScoringProfile) -> ScoringMethodology {
    ScoringMethodology {
        description: "Properties are scored on a 0-100 scale across multiple categories",
        categories: ScoreCategory::ordered()
            .into_iter()
            .map(|category| CategoryDescription {
                category,
                label: category.label(),
                description: category.description(),
            })
            .collect(),
        weights: profile.weights.clone(),
        normalized_weights: profile.weights.normalized(),
        benchmarks: profile.benchmarks.clone(),
        score_ranges: SCORE_BANDS.to_vec(),
    }
}
