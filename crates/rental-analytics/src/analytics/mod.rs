//! Pure investment analytics: metrics, scoring and ranking.
//!
//! Nothing in this module performs I/O or logs. Every function is a
//! deterministic computation over its arguments.

pub mod domain;
pub mod metrics;
pub mod ranking;
pub mod scoring;

pub use domain::{PropertyFacts, PropertyId, PropertyRecord, ValidationError};
pub use metrics::{calculate_metrics, MetricsResult};
pub use ranking::{RankedProperty, Recommendation};
pub use scoring::{PropertyScorer, ScoreResult, ScoreWeights, ScoringProfile};
