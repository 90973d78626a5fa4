//! Market benchmarks and the piecewise-linear curve that maps a raw metric
//! onto the 0-100 scoring scale.
//!
//! Each benchmark has four calibration points. The curve anchors them at 40
//! (poor), 60 (average), 80 (good) and 100 (excellent), interpolates linearly
//! in between, and falls linearly towards 0 below `poor`.

use super::category::ScoreCategory;
use crate::analytics::domain::ValidationError;
use serde::{Deserialize, Serialize};

/// Score returned for metrics without a benchmark.
pub const NEUTRAL_SCORE: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Benchmark {
    pub poor: f64,
    pub average: f64,
    pub good: f64,
    pub excellent: f64,
}

impl Benchmark {
    pub const fn new(poor: f64, average: f64, good: f64, excellent: f64) -> Self {
        Self {
            poor,
            average,
            good,
            excellent,
        }
    }

    fn is_well_formed(&self) -> bool {
        let points = [self.poor, self.average, self.good, self.excellent];
        points.iter().all(|value| value.is_finite())
            && points.windows(2).all(|pair| pair[0] <= pair[1])
    }
}

pub fn normalize(value: f64, benchmark: &Benchmark) -> f64 {
    let Benchmark {
        poor,
        average,
        good,
        excellent,
    } = *benchmark;

    if value >= excellent {
        100.0
    } else if value >= good {
        80.0 + 20.0 * (value - good) / (excellent - good)
    } else if value >= average {
        60.0 + 20.0 * (value - average) / (good - average)
    } else if value >= poor {
        40.0 + 20.0 * (value - poor) / (average - poor)
    } else if poor > 0.0 {
        (40.0 * value / poor).max(0.0)
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Benchmarks {
    pub roi: Benchmark,
    pub cap_rate: Benchmark,
    /// Monthly cash flow in currency units.
    pub cash_flow: Benchmark,
    pub dscr: Benchmark,
}

impl Default for Benchmarks {
    fn default() -> Self {
        Self {
            roi: Benchmark::new(5.0, 8.0, 10.0, 15.0),
            cap_rate: Benchmark::new(3.0, 5.0, 6.0, 8.0),
            cash_flow: Benchmark::new(0.0, 200.0, 500.0, 1000.0),
            dscr: Benchmark::new(1.0, 1.1, 1.25, 1.5),
        }
    }
}

impl Benchmarks {
    /// Location and condition are heuristics and carry no benchmark.
    pub fn get(&self, category: ScoreCategory) -> Option<&Benchmark> {
        match category {
            ScoreCategory::Roi => Some(&self.roi),
            ScoreCategory::CapRate => Some(&self.cap_rate),
            ScoreCategory::CashFlow => Some(&self.cash_flow),
            ScoreCategory::Dscr => Some(&self.dscr),
            ScoreCategory::Location | ScoreCategory::Condition => None,
        }
    }

    /// Normalizes by metric key; unknown metrics score [`NEUTRAL_SCORE`].
    pub fn normalize(&self, value: f64, metric: &str) -> f64 {
        ScoreCategory::from_key(metric)
            .and_then(|category| self.get(category))
            .map_or(NEUTRAL_SCORE, |benchmark| normalize(value, benchmark))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        for category in ScoreCategory::ordered() {
            if let Some(benchmark) = self.get(category) {
                if !benchmark.is_well_formed() {
                    return Err(ValidationError::Benchmark {
                        metric: category.key(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn anchors_each_calibration_point() {
        let roi = Benchmarks::default().roi;
        assert_close(normalize(15.0, &roi), 100.0);
        assert_close(normalize(10.0, &roi), 80.0);
        assert_close(normalize(8.0, &roi), 60.0);
        assert_close(normalize(5.0, &roi), 40.0);
        assert_close(normalize(0.0, &roi), 0.0);
    }

    #[test]
    fn interpolates_between_points() {
        let cap_rate = Benchmarks::default().cap_rate;
        assert_close(normalize(7.0, &cap_rate), 90.0);
        assert_close(normalize(5.5, &cap_rate), 70.0);
        assert_close(normalize(4.0, &cap_rate), 50.0);
        assert_close(normalize(1.5, &cap_rate), 20.0);
    }

    #[test]
    fn negative_values_floor_at_zero() {
        let roi = Benchmarks::default().roi;
        assert_eq!(normalize(-12.0, &roi), 0.0);
    }

    #[test]
    fn zero_poor_threshold_does_not_divide() {
        let cash_flow = Benchmarks::default().cash_flow;
        assert_eq!(normalize(-250.0, &cash_flow), 0.0);
        assert_close(normalize(0.0, &cash_flow), 40.0);
        assert_close(normalize(100.0, &cash_flow), 50.0);
    }

    #[test]
    fn infinite_coverage_is_excellent() {
        let dscr = Benchmarks::default().dscr;
        assert_eq!(normalize(f64::INFINITY, &dscr), 100.0);
        assert_eq!(normalize(f64::NAN, &dscr), 0.0);
    }

    #[test]
    fn unknown_metric_is_neutral() {
        let benchmarks = Benchmarks::default();
        assert_eq!(benchmarks.normalize(12.0, "appreciation"), NEUTRAL_SCORE);
        assert_eq!(benchmarks.normalize(12.0, "location"), NEUTRAL_SCORE);
        assert_close(benchmarks.normalize(12.0, "roi"), 88.0);
    }

    #[test]
    fn validate_rejects_descending_thresholds() {
        let mut benchmarks = Benchmarks::default();
        assert!(benchmarks.validate().is_ok());

        benchmarks.dscr = Benchmark::new(1.5, 1.25, 1.1, 1.0);
        assert_eq!(
            benchmarks.validate(),
            Err(ValidationError::Benchmark { metric: "dscr" })
        );
    }

    #[test]
    fn partial_benchmark_overrides_keep_defaults() {
        let parsed: Benchmarks = serde_json::from_str(
            r#"{"roi": {"poor": 4, "average": 6, "good": 9, "excellent": 12}}"#,
        )
        .expect("benchmarks parse");

        assert_eq!(parsed.roi, Benchmark::new(4.0, 6.0, 9.0, 12.0));
        assert_eq!(parsed.cap_rate, Benchmarks::default().cap_rate);
    }
}
