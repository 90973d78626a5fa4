use super::calculate_metrics;
use crate::analytics::domain::PropertyFacts;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Input that can be perturbed during sensitivity analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensitivityVariable {
    Rent,
    Expenses,
    Price,
    InterestRate,
}

impl SensitivityVariable {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Rent => "Monthly Rent",
            Self::Expenses => "Monthly Expenses",
            Self::Price => "Purchase Price",
            Self::InterestRate => "Interest Rate",
        }
    }

    /// Rent, expenses and price move by a fraction; the rate moves by
    /// percentage points.
    fn apply(self, facts: &mut PropertyFacts, change: f64) {
        match self {
            Self::Rent => facts.monthly_rent *= 1.0 + change,
            Self::Expenses => facts.monthly_expenses *= 1.0 + change,
            Self::Price => facts.purchase_price *= 1.0 + change,
            Self::InterestRate => facts.interest_rate = (facts.interest_rate + change).max(0.0),
        }
    }
}

const FRACTIONAL_STEPS: [f64; 5] = [-0.2, -0.1, 0.0, 0.1, 0.2];
const RATE_STEPS: [f64; 5] = [-1.0, -0.5, 0.0, 0.5, 1.0];

/// Every variable with ±20% steps, and ±1 point steps for the interest rate.
pub fn default_variable_changes() -> Vec<(SensitivityVariable, Vec<f64>)> {
    [
        SensitivityVariable::Rent,
        SensitivityVariable::Expenses,
        SensitivityVariable::Price,
        SensitivityVariable::InterestRate,
    ]
    .into_iter()
    .map(|variable| {
        let steps = match variable {
            SensitivityVariable::InterestRate => RATE_STEPS,
            _ => FRACTIONAL_STEPS,
        };
        (variable, steps.to_vec())
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensitivityPoint {
    pub change: f64,
    pub new_roi: f64,
    pub roi_delta: f64,
}

pub fn sensitivity_analysis(
    facts: &PropertyFacts,
    variable_changes: &[(SensitivityVariable, Vec<f64>)],
) -> BTreeMap<SensitivityVariable, Vec<SensitivityPoint>> {
    let base_roi = calculate_metrics(facts).roi;

    variable_changes
        .iter()
        .map(|(variable, changes)| {
            let points = changes
                .iter()
                .map(|&change| {
                    let mut perturbed = facts.clone();
                    variable.apply(&mut perturbed, change);
                    let new_roi = calculate_metrics(&perturbed).roi;
                    SensitivityPoint {
                        change,
                        new_roi,
                        roi_delta: new_roi - base_roi,
                    }
                })
                .collect();
            (*variable, points)
        })
        .collect()
}
