use crate::analytics::domain::PropertyRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregate statistics across a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioSummary {
    pub total_properties: usize,
    pub total_value: f64,
    pub total_monthly_rent: f64,
    pub total_monthly_expenses: f64,
    pub average_price: Option<f64>,
    pub average_monthly_rent: Option<f64>,
    pub property_types: BTreeMap<String, usize>,
    /// Totals over the records that report the field.
    pub total_bedrooms: u32,
    pub total_bathrooms: f64,
    pub total_square_feet: u64,
    /// Mean over the records that carry a construction year.
    pub average_year_built: Option<f64>,
}

impl PortfolioSummary {
    pub fn from_records(records: &[PropertyRecord]) -> Self {
        let total_properties = records.len();
        let total_value: f64 = records.iter().map(|r| r.facts.purchase_price).sum();
        let total_monthly_rent: f64 = records.iter().map(|r| r.facts.monthly_rent).sum();
        let total_monthly_expenses: f64 = records.iter().map(|r| r.facts.monthly_expenses).sum();

        let mut property_types = BTreeMap::new();
        for record in records {
            *property_types
                .entry(record.property_type.clone())
                .or_insert(0) += 1;
        }

        let years: Vec<f64> = records
            .iter()
            .filter_map(|record| record.facts.year_built)
            .map(f64::from)
            .collect();

        Self {
            total_properties,
            total_value,
            total_monthly_rent,
            total_monthly_expenses,
            average_price: mean(total_value, total_properties),
            average_monthly_rent: mean(total_monthly_rent, total_properties),
            property_types,
            total_bedrooms: records
                .iter()
                .filter_map(|record| record.bedrooms)
                .map(u32::from)
                .sum(),
            total_bathrooms: records
                .iter()
                .filter_map(|record| record.bathrooms)
                .map(f64::from)
                .sum(),
            total_square_feet: records
                .iter()
                .filter_map(|record| record.facts.square_feet)
                .map(u64::from)
                .sum(),
            average_year_built: mean(years.iter().sum(), years.len()),
        }
    }
}

fn mean(total: f64, count: usize) -> Option<f64> {
    (count > 0).then(|| total / count as f64)
}
