use super::RankedProperty;
use crate::analytics::domain::PropertyId;
use crate::analytics::scoring::{ScoreCategory, SubScores};
use serde::Serialize;

const STRENGTH_THRESHOLD: f64 = 70.0;
const WEAKNESS_THRESHOLD: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low Risk",
            Self::Medium => "Medium Risk",
            Self::High => "High Risk",
        }
    }

    fn from_points(points: u32) -> Self {
        if points >= 50 {
            Self::High
        } else if points >= 25 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub rank: usize,
    pub property_id: PropertyId,
    pub address: String,
    pub composite_score: f64,
    pub purchase_price: f64,
    pub monthly_rent: f64,
    pub reasoning: &'static str,
    pub strengths: Vec<&'static str>,
    pub weaknesses: Vec<&'static str>,
    pub risk_level: RiskLevel,
    pub risk_label: &'static str,
}

impl Recommendation {
    pub(crate) fn from_ranked(ranked: RankedProperty) -> Self {
        let sub_scores = ranked.scores.sub_scores;
        let composite_score = ranked.scores.composite_score;
        let risk_level = assess_risk(&sub_scores);

        Self {
            rank: ranked.rank,
            property_id: ranked.property_id,
            address: ranked.address,
            composite_score,
            purchase_price: ranked.purchase_price,
            monthly_rent: ranked.monthly_rent,
            reasoning: reasoning_for(composite_score),
            strengths: identify_strengths(&sub_scores),
            weaknesses: identify_weaknesses(&sub_scores),
            risk_level,
            risk_label: risk_level.label(),
        }
    }
}

pub fn reasoning_for(composite_score: f64) -> &'static str {
    if composite_score >= 80.0 {
        "Excellent investment opportunity with strong metrics across all categories."
    } else if composite_score >= 70.0 {
        "Very good investment with solid performance in most key areas."
    } else if composite_score >= 60.0 {
        "Good investment opportunity with moderate returns and acceptable risk."
    } else if composite_score >= 50.0 {
        "Fair investment with some positive aspects but also areas of concern."
    } else {
        "Below-average investment opportunity with significant risks or low returns."
    }
}

const fn strength(category: ScoreCategory) -> &'static str {
    match category {
        ScoreCategory::Roi => "Strong ROI potential",
        ScoreCategory::CapRate => "Attractive capitalization rate",
        ScoreCategory::CashFlow => "Positive cash flow generation",
        ScoreCategory::Dscr => "Excellent debt coverage",
        ScoreCategory::Location => "Prime location",
        ScoreCategory::Condition => "Good property condition",
    }
}

const fn weakness(category: ScoreCategory) -> &'static str {
    match category {
        ScoreCategory::Roi => "Low ROI potential",
        ScoreCategory::CapRate => "Poor capitalization rate",
        ScoreCategory::CashFlow => "Negative or low cash flow",
        ScoreCategory::Dscr => "Inadequate debt coverage",
        ScoreCategory::Location => "Suboptimal location",
        ScoreCategory::Condition => "Poor property condition",
    }
}

pub fn identify_strengths(sub_scores: &SubScores) -> Vec<&'static str> {
    ScoreCategory::ordered()
        .into_iter()
        .filter(|category| sub_scores.get(*category) >= STRENGTH_THRESHOLD)
        .map(strength)
        .collect()
}

pub fn identify_weaknesses(sub_scores: &SubScores) -> Vec<&'static str> {
    ScoreCategory::ordered()
        .into_iter()
        .filter(|category| sub_scores.get(*category) <= WEAKNESS_THRESHOLD)
        .map(weakness)
        .collect()
}

/// Debt coverage weighs heaviest, then cash flow, location and condition.
pub fn assess_risk(sub_scores: &SubScores) -> RiskLevel {
    let mut points = 0;

    points += match sub_scores.dscr_score {
        score if score < 40.0 => 30,
        score if score < 60.0 => 15,
        _ => 0,
    };
    points += match sub_scores.cash_flow_score {
        score if score < 40.0 => 25,
        score if score < 60.0 => 10,
        _ => 0,
    };
    points += match sub_scores.location_score {
        score if score < 40.0 => 15,
        score if score < 60.0 => 5,
        _ => 0,
    };
    if sub_scores.condition_score < 40.0 {
        points += 10;
    }

    RiskLevel::from_points(points)
}
