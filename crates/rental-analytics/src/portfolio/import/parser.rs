use crate::analytics::domain::{
    PropertyFacts, PropertyRecord, ValidationError, DEFAULT_LOAN_TERM_YEARS,
    DEFAULT_VACANCY_RATE_PERCENT,
};
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// One CSV data row before conversion, numbered from 1.
#[derive(Debug)]
pub(crate) struct ParsedRow {
    pub(crate) row: usize,
    pub(crate) record: Result<PropertyRecord, ValidationError>,
}

/// Rows are deserialized lazily, so errors surface in file order.
pub(crate) fn parse_rows<R: Read>(
    reader: R,
) -> impl Iterator<Item = Result<ParsedRow, csv::Error>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_deserialize::<PortfolioRow>()
        .enumerate()
        .map(|(index, record)| {
            let row = index + 1;
            record.map(|parsed| ParsedRow {
                row,
                record: parsed.into_record(row),
            })
        })
}

#[derive(Debug, Deserialize)]
struct PortfolioRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    address: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    property_type: Option<String>,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    down_payment: Option<f64>,
    #[serde(default)]
    loan_amount: Option<f64>,
    #[serde(default)]
    interest_rate: Option<f64>,
    #[serde(default)]
    loan_term: Option<u32>,
    #[serde(default)]
    monthly_rent: Option<f64>,
    #[serde(default)]
    monthly_expenses: Option<f64>,
    #[serde(default)]
    vacancy_rate: Option<f64>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    neighborhood: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    school_district: Option<String>,
    #[serde(default)]
    year_built: Option<i32>,
    #[serde(default)]
    square_feet: Option<u32>,
    #[serde(default)]
    bedrooms: Option<u8>,
    #[serde(default)]
    bathrooms: Option<f32>,
}

impl PortfolioRow {
    fn into_record(self, row: usize) -> Result<PropertyRecord, ValidationError> {
        let address = self
            .address
            .ok_or(ValidationError::MissingField { field: "address" })?;
        let purchase_price = self
            .price
            .ok_or(ValidationError::MissingField { field: "price" })?;

        let facts = PropertyFacts {
            purchase_price,
            down_payment: self.down_payment.unwrap_or_default(),
            loan_amount: self.loan_amount.unwrap_or_default(),
            interest_rate: self.interest_rate.unwrap_or_default(),
            loan_term_years: self.loan_term.unwrap_or(DEFAULT_LOAN_TERM_YEARS),
            monthly_rent: self.monthly_rent.unwrap_or_default(),
            monthly_expenses: self.monthly_expenses.unwrap_or_default(),
            vacancy_rate_percent: self.vacancy_rate.unwrap_or(DEFAULT_VACANCY_RATE_PERCENT),
            neighborhood: self.neighborhood,
            school_district: self.school_district,
            year_built: self.year_built,
            square_feet: self.square_feet,
        };

        let id = self.id.unwrap_or_else(|| format!("prop-{row:04}"));
        let property_type = self
            .property_type
            .unwrap_or_else(|| "Single Family".to_string());

        let mut record = PropertyRecord::new(id, address, property_type, facts);
        record.bedrooms = self.bedrooms;
        record.bathrooms = self.bathrooms;
        record.validate()?;
        Ok(record)
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
