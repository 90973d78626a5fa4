pub mod formulas;
mod projection;
mod sensitivity;

pub use formulas::DebtCoverage;
pub use projection::{
    appreciation_scenarios, projected_cash_flow, AppreciationPoint, AppreciationScenario,
    CashFlowProjection, ProjectionAssumptions, YearlyProjection,
};
pub use sensitivity::{
    default_variable_changes, sensitivity_analysis, SensitivityPoint, SensitivityVariable,
};

use super::domain::PropertyFacts;
use serde::Serialize;

/// Vacancy allowance used by breakeven and projection math, independent of
/// the property's own vacancy rate.
pub const BUFFER_VACANCY_RATE: f64 = 0.05;

/// Derived investment metrics for one property. Recomputed on every call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsResult {
    pub annual_rent: f64,
    pub annual_expenses: f64,
    pub vacancy_loss: f64,
    pub effective_gross_income: f64,
    pub net_operating_income: f64,
    pub monthly_payment: f64,
    pub annual_debt_service: f64,
    pub annual_cash_flow: f64,
    pub monthly_cash_flow: f64,
    pub cap_rate: f64,
    pub cash_on_cash: f64,
    /// Same inputs as `cash_on_cash`, so always equal to it.
    pub roi: f64,
    pub dscr: DebtCoverage,
    pub grm: f64,
    pub ltv: f64,
    pub one_percent_rule: bool,
    pub breakeven_rent: f64,
    pub operating_expense_ratio: f64,
}

pub fn calculate_metrics(facts: &PropertyFacts) -> MetricsResult {
    let annual_rent = facts.annual_rent();
    let annual_expenses = facts.annual_expenses();

    let vacancy_loss = annual_rent * (facts.vacancy_rate_percent / 100.0);
    let effective_gross_income = annual_rent - vacancy_loss;
    let net_operating_income = effective_gross_income - annual_expenses;

    let monthly_payment = monthly_debt_payment(facts);
    let annual_debt_service = monthly_payment * 12.0;

    let annual_cash_flow = net_operating_income - annual_debt_service;
    let monthly_cash_flow = annual_cash_flow / 12.0;

    MetricsResult {
        annual_rent,
        annual_expenses,
        vacancy_loss,
        effective_gross_income,
        net_operating_income,
        monthly_payment,
        annual_debt_service,
        annual_cash_flow,
        monthly_cash_flow,
        cap_rate: formulas::cap_rate(net_operating_income, facts.purchase_price),
        cash_on_cash: formulas::cash_on_cash(annual_cash_flow, facts.down_payment),
        roi: formulas::roi(annual_cash_flow, facts.down_payment),
        dscr: formulas::dscr(net_operating_income, annual_debt_service),
        grm: formulas::grm(facts.purchase_price, annual_rent),
        ltv: formulas::ltv(facts.loan_amount, facts.purchase_price),
        one_percent_rule: formulas::one_percent_rule(facts.purchase_price, annual_rent / 12.0),
        breakeven_rent: breakeven_from(annual_expenses, annual_debt_service),
        operating_expense_ratio: formulas::operating_expense_ratio(annual_expenses, annual_rent),
    }
}

/// Monthly rent needed to cover expenses and debt with a 5% vacancy buffer.
pub fn breakeven_rent(facts: &PropertyFacts) -> f64 {
    let annual_debt_service = monthly_debt_payment(facts) * 12.0;
    breakeven_from(facts.annual_expenses(), annual_debt_service)
}

/// Zero unless the property carries an interest-bearing loan.
pub(crate) fn monthly_debt_payment(facts: &PropertyFacts) -> f64 {
    if facts.loan_amount > 0.0 && facts.interest_rate > 0.0 {
        formulas::mortgage_payment(facts.loan_amount, facts.interest_rate, facts.loan_term_years)
    } else {
        0.0
    }
}

fn breakeven_from(annual_expenses: f64, annual_debt_service: f64) -> f64 {
    (annual_expenses + annual_debt_service) / (1.0 - BUFFER_VACANCY_RATE) / 12.0
}
