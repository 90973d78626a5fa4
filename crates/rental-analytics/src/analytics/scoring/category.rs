use serde::{Deserialize, Serialize};

/// The six dimensions a property is scored on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    Roi,
    CapRate,
    CashFlow,
    Dscr,
    Location,
    Condition,
}

impl ScoreCategory {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Roi,
            Self::CapRate,
            Self::CashFlow,
            Self::Dscr,
            Self::Location,
            Self::Condition,
        ]
    }

    /// Key used in weight maps and benchmark tables.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Roi => "roi",
            Self::CapRate => "cap_rate",
            Self::CashFlow => "cash_flow",
            Self::Dscr => "dscr",
            Self::Location => "location",
            Self::Condition => "condition",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Roi => "ROI",
            Self::CapRate => "Cap Rate",
            Self::CashFlow => "Cash Flow",
            Self::Dscr => "DSCR",
            Self::Location => "Location",
            Self::Condition => "Condition",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::Roi => "Return on Investment - measures profitability",
            Self::CapRate => "Capitalization Rate - measures property yield",
            Self::CashFlow => "Monthly cash flow generation",
            Self::Dscr => "Debt Service Coverage Ratio - measures debt safety",
            Self::Location => "Location quality assessment",
            Self::Condition => "Property condition and age factors",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|category| category.key() == key)
    }
}
