use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_LOAN_TERM_YEARS: u32 = 30;
pub const DEFAULT_VACANCY_RATE_PERCENT: f64 = 5.0;

fn default_loan_term_years() -> u32 {
    DEFAULT_LOAN_TERM_YEARS
}

fn default_vacancy_rate_percent() -> f64 {
    DEFAULT_VACANCY_RATE_PERCENT
}

/// Financial and descriptive facts the engine needs to evaluate a property.
///
/// `down_payment` and `loan_amount` are independent inputs; nothing checks
/// that they add up to `purchase_price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyFacts {
    pub purchase_price: f64,
    #[serde(default)]
    pub down_payment: f64,
    #[serde(default)]
    pub loan_amount: f64,
    /// Annual rate in percent (6.5 means 6.5%).
    #[serde(default)]
    pub interest_rate: f64,
    #[serde(default = "default_loan_term_years")]
    pub loan_term_years: u32,
    #[serde(default)]
    pub monthly_rent: f64,
    #[serde(default)]
    pub monthly_expenses: f64,
    #[serde(default = "default_vacancy_rate_percent")]
    pub vacancy_rate_percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub school_district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_built: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub square_feet: Option<u32>,
}

impl Default for PropertyFacts {
    fn default() -> Self {
        Self {
            purchase_price: 0.0,
            down_payment: 0.0,
            loan_amount: 0.0,
            interest_rate: 0.0,
            loan_term_years: DEFAULT_LOAN_TERM_YEARS,
            monthly_rent: 0.0,
            monthly_expenses: 0.0,
            vacancy_rate_percent: DEFAULT_VACANCY_RATE_PERCENT,
            neighborhood: None,
            school_district: None,
            year_built: None,
            square_feet: None,
        }
    }
}

impl PropertyFacts {
    pub fn annual_rent(&self) -> f64 {
        self.monthly_rent * 12.0
    }

    pub fn annual_expenses(&self) -> f64 {
        self.monthly_expenses * 12.0
    }

    /// Checks the non-negativity contract the calculator relies on.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let amounts = [
            ("purchase_price", self.purchase_price),
            ("down_payment", self.down_payment),
            ("loan_amount", self.loan_amount),
            ("interest_rate", self.interest_rate),
            ("monthly_rent", self.monthly_rent),
            ("monthly_expenses", self.monthly_expenses),
            ("vacancy_rate_percent", self.vacancy_rate_percent),
        ];

        for (field, value) in amounts {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite { field });
            }
            if value < 0.0 {
                return Err(ValidationError::Negative { field, value });
            }
        }

        if self.loan_term_years == 0 {
            return Err(ValidationError::LoanTerm);
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyId(pub String);

impl PropertyId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A property as held by the portfolio store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub id: PropertyId,
    pub address: String,
    pub property_type: String,
    pub facts: PropertyFacts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bathrooms: Option<f32>,
}

impl PropertyRecord {
    pub fn new(
        id: impl Into<String>,
        address: impl Into<String>,
        property_type: impl Into<String>,
        facts: PropertyFacts,
    ) -> Self {
        Self {
            id: PropertyId::new(id),
            address: address.into(),
            property_type: property_type.into(),
            facts,
            bedrooms: None,
            bathrooms: None,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.address.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "address" });
        }
        self.facts.validate()
    }
}

/// Rejected input at the store or configuration boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
    #[error("loan_term_years must be at least 1")]
    LoanTerm,
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },
    #[error("weight for '{key}' must be finite and non-negative (got {value})")]
    Weight { key: String, value: f64 },
    #[error("benchmark thresholds for '{metric}' must be finite and ascending")]
    Benchmark { metric: &'static str },
}
