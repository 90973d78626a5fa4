use super::{monthly_debt_payment, BUFFER_VACANCY_RATE};
use crate::analytics::domain::PropertyFacts;
use serde::{Deserialize, Serialize};

/// Annual growth rates applied to rent and operating expenses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionAssumptions {
    pub rent_growth: f64,
    pub expense_growth: f64,
}

impl Default for ProjectionAssumptions {
    fn default() -> Self {
        Self {
            rent_growth: 0.03,
            expense_growth: 0.02,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearlyProjection {
    pub year: u32,
    pub monthly_rent: f64,
    pub monthly_expenses: f64,
    pub net_operating_income: f64,
    pub annual_cash_flow: f64,
    pub monthly_cash_flow: f64,
}

/// Year-by-year cash flow with rent and expenses compounding and the
/// mortgage payment held at today's amount. Vacancy is a flat 5%.
///
/// Clone before consuming to walk the years a second time.
#[derive(Debug, Clone)]
pub struct CashFlowProjection {
    base_rent: f64,
    base_expenses: f64,
    annual_debt_service: f64,
    assumptions: ProjectionAssumptions,
    next_year: u32,
    years: u32,
}

pub fn projected_cash_flow(
    facts: &PropertyFacts,
    years: u32,
    assumptions: ProjectionAssumptions,
) -> CashFlowProjection {
    CashFlowProjection {
        base_rent: facts.monthly_rent,
        base_expenses: facts.monthly_expenses,
        annual_debt_service: monthly_debt_payment(facts) * 12.0,
        assumptions,
        next_year: 1,
        years,
    }
}

impl CashFlowProjection {
    fn project(&self, year: u32) -> YearlyProjection {
        let exponent = year as i32;
        let monthly_rent = self.base_rent * (1.0 + self.assumptions.rent_growth).powi(exponent);
        let monthly_expenses =
            self.base_expenses * (1.0 + self.assumptions.expense_growth).powi(exponent);

        let annual_rent = monthly_rent * 12.0;
        let effective_gross_income = annual_rent - annual_rent * BUFFER_VACANCY_RATE;
        let net_operating_income = effective_gross_income - monthly_expenses * 12.0;
        let annual_cash_flow = net_operating_income - self.annual_debt_service;

        YearlyProjection {
            year,
            monthly_rent,
            monthly_expenses,
            net_operating_income,
            annual_cash_flow,
            monthly_cash_flow: annual_cash_flow / 12.0,
        }
    }
}

impl Iterator for CashFlowProjection {
    type Item = YearlyProjection;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_year > self.years {
            return None;
        }
        let projection = self.project(self.next_year);
        self.next_year += 1;
        Some(projection)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.years.saturating_add(1).saturating_sub(self.next_year) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CashFlowProjection {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppreciationPoint {
    pub year: u32,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppreciationScenario {
    pub label: String,
    pub rate: f64,
    pub values: Vec<AppreciationPoint>,
}

/// Property value under constant annual appreciation, one scenario per rate.
pub fn appreciation_scenarios(
    purchase_price: f64,
    years: u32,
    rates: &[f64],
) -> Vec<AppreciationScenario> {
    rates
        .iter()
        .map(|&rate| AppreciationScenario {
            label: format!("{:.1}%", rate * 100.0),
            rate,
            values: (1..=years)
                .map(|year| AppreciationPoint {
                    year,
                    value: purchase_price * (1.0 + rate).powi(year as i32),
                })
                .collect(),
        })
        .collect()
}
