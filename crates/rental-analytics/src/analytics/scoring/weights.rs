use super::benchmarks::Benchmarks;
use super::category::ScoreCategory;
use crate::analytics::domain::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Category key to weight. Weights need not sum to one; the composite
/// divides by the total weight of the recognized keys actually present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreWeights(BTreeMap<String, f64>);

impl Default for ScoreWeights {
    fn default() -> Self {
        [
            (ScoreCategory::Roi, 0.25),
            (ScoreCategory::CapRate, 0.20),
            (ScoreCategory::CashFlow, 0.20),
            (ScoreCategory::Dscr, 0.15),
            (ScoreCategory::Location, 0.10),
            (ScoreCategory::Condition, 0.10),
        ]
        .into_iter()
        .map(|(category, weight)| (category.key().to_string(), weight))
        .collect()
    }
}

impl ScoreWeights {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn with(mut self, key: impl Into<String>, weight: f64) -> Self {
        self.0.insert(key.into(), weight);
        self
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.0.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(key, weight)| (key.as_str(), *weight))
    }

    /// Weights whose keys name a scoring category; anything else is ignored.
    pub fn recognized(&self) -> impl Iterator<Item = (ScoreCategory, f64)> + '_ {
        self.iter()
            .filter_map(|(key, weight)| ScoreCategory::from_key(key).map(|c| (c, weight)))
    }

    pub fn total_recognized(&self) -> f64 {
        self.recognized().map(|(_, weight)| weight).sum()
    }

    /// Rescales every weight so the recognized ones sum to one. A zero total
    /// leaves the map unchanged.
    pub fn normalized(&self) -> Self {
        let total = self.total_recognized();
        if total <= 0.0 {
            return self.clone();
        }
        self.0
            .iter()
            .map(|(key, weight)| (key.clone(), weight / total))
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match self
            .iter()
            .find(|(_, weight)| !weight.is_finite() || *weight < 0.0)
        {
            Some((key, value)) => Err(ValidationError::Weight {
                key: key.to_string(),
                value,
            }),
            None => Ok(()),
        }
    }
}

impl FromIterator<(String, f64)> for ScoreWeights {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightParseError(String);

impl fmt::Display for WeightParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "expected key=weight pairs separated by commas, got '{}'", self.0)
    }
}

impl std::error::Error for WeightParseError {}

/// Parses `roi=0.4,cap_rate=0.3` style overrides.
impl FromStr for ScoreWeights {
    type Err = WeightParseError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        raw.split(',')
            .map(str::trim)
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, weight) = pair
                    .split_once('=')
                    .ok_or_else(|| WeightParseError(pair.to_string()))?;
                let weight = weight
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| WeightParseError(pair.to_string()))?;
                Ok((key.trim().to_string(), weight))
            })
            .collect()
    }
}

/// Tunable scoring inputs: sub-score weights and normalization benchmarks.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringProfile {
    pub weights: ScoreWeights,
    pub benchmarks: Benchmarks,
}

impl ScoringProfile {
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.weights.validate()?;
        self.benchmarks.validate()
    }
}
