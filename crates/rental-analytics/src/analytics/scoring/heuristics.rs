//! Qualitative sub-scores derived from descriptive fields.
//!
//! These are keyword and age heuristics, not a geodata or inspection lookup.
//! Missing inputs leave the neutral starting score untouched.

use super::benchmarks::NEUTRAL_SCORE;
use crate::analytics::domain::PropertyFacts;

const POSITIVE_LOCATION_KEYWORDS: [&str; 5] =
    ["downtown", "center", "historic", "waterfront", "hills"];
const NEGATIVE_LOCATION_KEYWORDS: [&str; 4] = ["industrial", "highway", "remote", "flood"];
const KEYWORD_POINTS: f64 = 10.0;
const SCHOOL_DISTRICT_BONUS: f64 = 5.0;

const LARGE_SQUARE_FEET: u32 = 2500;
const SMALL_SQUARE_FEET: u32 = 1000;
const SIZE_POINTS: f64 = 5.0;

pub fn location_score(facts: &PropertyFacts) -> f64 {
    let mut score = NEUTRAL_SCORE;

    if let Some(neighborhood) = facts.neighborhood.as_deref() {
        let neighborhood = neighborhood.to_lowercase();
        let matches = |keywords: &[&str]| {
            keywords
                .iter()
                .filter(|keyword| neighborhood.contains(*keyword))
                .count() as f64
        };
        score += KEYWORD_POINTS * matches(&POSITIVE_LOCATION_KEYWORDS);
        score -= KEYWORD_POINTS * matches(&NEGATIVE_LOCATION_KEYWORDS);
    }

    let has_school_district = facts
        .school_district
        .as_deref()
        .is_some_and(|district| !district.trim().is_empty());
    if has_school_district {
        score += SCHOOL_DISTRICT_BONUS;
    }

    score.clamp(0.0, 100.0)
}

pub fn condition_score(facts: &PropertyFacts, current_year: i32) -> f64 {
    let mut score = NEUTRAL_SCORE;

    if let Some(year_built) = facts.year_built {
        score += age_adjustment(i64::from(current_year) - i64::from(year_built));
    }

    match facts.square_feet {
        Some(size) if size > LARGE_SQUARE_FEET => score += SIZE_POINTS,
        Some(size) if size < SMALL_SQUARE_FEET => score -= SIZE_POINTS,
        _ => {}
    }

    score.clamp(0.0, 100.0)
}

fn age_adjustment(age: i64) -> f64 {
    match age {
        age if age < 5 => 20.0,
        age if age < 15 => 10.0,
        age if age < 30 => 0.0,
        age if age < 50 => -10.0,
        _ => -20.0,
    }
}
