//! Closed-form investment ratios.
//!
//! Every ratio guards its denominator: a zero base yields `0.0`, or
//! [`DebtCoverage::NoDebt`] for DSCR.

use serde::{Deserialize, Serialize};

/// Debt service coverage, with an explicit variant for unlevered properties.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtCoverage {
    Covered(f64),
    NoDebt,
}

impl DebtCoverage {
    /// Numeric view used for scoring; no debt is infinitely covered.
    pub fn value(self) -> f64 {
        match self {
            Self::Covered(ratio) => ratio,
            Self::NoDebt => f64::INFINITY,
        }
    }
}

/// Level monthly payment for a fully amortizing loan.
pub fn mortgage_payment(principal: f64, annual_rate_percent: f64, years: u32) -> f64 {
    let payments = f64::from(years) * 12.0;
    if payments == 0.0 {
        return 0.0;
    }

    if annual_rate_percent == 0.0 {
        return principal / payments;
    }

    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    // exp_m1 keeps (1 + r)^n - 1 distinguishable from zero for tiny rates.
    let growth_minus_one = (payments * monthly_rate.ln_1p()).exp_m1();
    if !(growth_minus_one > 0.0 && growth_minus_one.is_finite()) {
        return principal / payments;
    }

    principal * monthly_rate * (1.0 + growth_minus_one) / growth_minus_one
}

pub fn cap_rate(net_operating_income: f64, property_value: f64) -> f64 {
    percent_of(net_operating_income, property_value)
}

/// May be negative: a losing year shows a negative return.
pub fn cash_on_cash(annual_cash_flow: f64, cash_invested: f64) -> f64 {
    percent_of(annual_cash_flow, cash_invested)
}

pub fn roi(annual_profit: f64, total_investment: f64) -> f64 {
    percent_of(annual_profit, total_investment)
}

pub fn dscr(net_operating_income: f64, annual_debt_service: f64) -> DebtCoverage {
    if annual_debt_service == 0.0 {
        DebtCoverage::NoDebt
    } else {
        DebtCoverage::Covered(net_operating_income / annual_debt_service)
    }
}

pub fn grm(property_value: f64, annual_rent: f64) -> f64 {
    if annual_rent == 0.0 {
        0.0
    } else {
        property_value / annual_rent
    }
}

pub fn ltv(loan_amount: f64, property_value: f64) -> f64 {
    percent_of(loan_amount, property_value)
}

pub fn one_percent_rule(property_value: f64, monthly_rent: f64) -> bool {
    monthly_rent >= property_value * 0.01
}

pub fn operating_expense_ratio(annual_expenses: f64, annual_rent: f64) -> f64 {
    percent_of(annual_expenses, annual_rent)
}

fn percent_of(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "expected {expected} ± {tolerance}, got {actual}"
        );
    }

    #[test]
    fn mortgage_payment_matches_standard_amortization() {
        assert_close(mortgage_payment(200_000.0, 6.0, 30), 1199.10, 0.01);
        assert_close(mortgage_payment(240_000.0, 6.5, 30), 1516.96, 0.01);
    }

    #[test]
    fn zero_rate_mortgage_is_straight_line() {
        assert_close(mortgage_payment(100_000.0, 0.0, 10), 833.33, 0.01);
        assert_eq!(mortgage_payment(0.0, 5.0, 30), 0.0);
        assert_eq!(mortgage_payment(100_000.0, 5.0, 0), 0.0);
    }

    #[test]
    fn tiny_rates_approach_straight_line() {
        let payment = mortgage_payment(240_000.0, 1e-14, 30);
        assert!(payment.is_finite());
        assert_close(payment, 240_000.0 / 360.0, 1e-6);

        let subnormal = mortgage_payment(240_000.0, f64::MIN_POSITIVE, 30);
        assert_close(subnormal, 240_000.0 / 360.0, 1e-6);
    }

    #[test]
    fn ratios_return_zero_for_zero_denominators() {
        assert_eq!(cap_rate(12_000.0, 0.0), 0.0);
        assert_eq!(cash_on_cash(5_000.0, 0.0), 0.0);
        assert_eq!(roi(5_000.0, 0.0), 0.0);
        assert_eq!(grm(300_000.0, 0.0), 0.0);
        assert_eq!(ltv(240_000.0, 0.0), 0.0);
        assert_eq!(operating_expense_ratio(6_000.0, 0.0), 0.0);
    }

    #[test]
    fn cash_on_cash_keeps_negative_returns() {
        assert_close(cash_on_cash(-3_000.0, 60_000.0), -5.0, 1e-9);
    }

    #[test]
    fn dscr_without_debt_is_infinitely_covered() {
        let coverage = dscr(22_500.0, 0.0);
        assert_eq!(coverage, DebtCoverage::NoDebt);
        assert_eq!(coverage.value(), f64::INFINITY);

        let levered = dscr(22_500.0, 18_000.0);
        assert_close(levered.value(), 1.25, 1e-12);
    }

    #[test]
    fn dscr_serializes_without_non_finite_numbers() {
        let json = serde_json::to_string(&DebtCoverage::NoDebt).expect("serialize");
        assert_eq!(json, "\"no_debt\"");
        let json = serde_json::to_string(&DebtCoverage::Covered(1.5)).expect("serialize");
        assert_eq!(json, r#"{"covered":1.5}"#);
    }

    #[test]
    fn one_percent_rule_is_inclusive() {
        assert!(one_percent_rule(250_000.0, 2_500.0));
        assert!(!one_percent_rule(300_000.0, 2_500.0));
    }
}
