//! Property-based checks for the scoring curve and composite weighting.

use proptest::prelude::*;
use rental_analytics::analytics::metrics::{sensitivity_analysis, SensitivityVariable};
use rental_analytics::analytics::scoring::{normalize, Benchmarks};
use rental_analytics::analytics::{PropertyFacts, PropertyScorer, ScoreWeights};

fn facts() -> impl Strategy<Value = PropertyFacts> {
    (
        50_000.0..1_000_000.0f64,
        0.05..0.5f64,
        0.0..12.0f64,
        300.0..8_000.0f64,
        0.0..3_000.0f64,
        0.0..15.0f64,
    )
        .prop_map(
            |(price, down_share, rate, rent, expenses, vacancy)| PropertyFacts {
                purchase_price: price,
                down_payment: price * down_share,
                loan_amount: price * (1.0 - down_share),
                interest_rate: rate,
                monthly_rent: rent,
                monthly_expenses: expenses,
                vacancy_rate_percent: vacancy,
                ..PropertyFacts::default()
            },
        )
}

proptest! {
    #[test]
    fn normalization_is_monotonic(a in -5_000.0..5_000.0f64, b in -5_000.0..5_000.0f64) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let benchmarks = Benchmarks::default();

        for benchmark in [
            benchmarks.roi,
            benchmarks.cap_rate,
            benchmarks.cash_flow,
            benchmarks.dscr,
        ] {
            let low_score = normalize(low, &benchmark);
            let high_score = normalize(high, &benchmark);
            prop_assert!(low_score <= high_score + 1e-9);
            prop_assert!((0.0..=100.0).contains(&low_score));
            prop_assert!((0.0..=100.0).contains(&high_score));
        }
    }

    #[test]
    fn composite_ignores_weight_scale(facts in facts(), scale in 0.01..100.0f64) {
        let scorer = PropertyScorer::with_defaults(2024);
        let base = ScoreWeights::default();
        let scaled: ScoreWeights = base
            .iter()
            .map(|(key, weight)| (key.to_string(), weight * scale))
            .collect();

        let expected = scorer.composite_score(&facts, &base).composite_score;
        let actual = scorer.composite_score(&facts, &scaled).composite_score;
        prop_assert!((expected - actual).abs() < 1e-6);
        prop_assert!((0.0..=100.0).contains(&actual));
    }

    #[test]
    fn sensitivity_never_mutates_input(facts in facts(), change in -0.5..0.5f64) {
        let before = facts.clone();
        let results = sensitivity_analysis(
            &facts,
            &[
                (SensitivityVariable::Rent, vec![change]),
                (SensitivityVariable::Expenses, vec![change]),
                (SensitivityVariable::Price, vec![change]),
                (SensitivityVariable::InterestRate, vec![change * 4.0]),
            ],
        );

        prop_assert_eq!(&facts, &before);
        prop_assert_eq!(results.len(), 4);
    }
}
