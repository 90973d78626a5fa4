mod parser;

use crate::analytics::domain::{PropertyRecord, ValidationError};
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug)]
pub enum PortfolioImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow {
        row: usize,
        source: ValidationError,
    },
}

impl std::fmt::Display for PortfolioImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PortfolioImportError::Io(err) => write!(f, "failed to read portfolio CSV: {}", err),
            PortfolioImportError::Csv(err) => write!(f, "invalid portfolio CSV data: {}", err),
            PortfolioImportError::InvalidRow { row, source } => {
                write!(f, "portfolio row {} is invalid: {}", row, source)
            }
        }
    }
}

impl std::error::Error for PortfolioImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PortfolioImportError::Io(err) => Some(err),
            PortfolioImportError::Csv(err) => Some(err),
            PortfolioImportError::InvalidRow { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for PortfolioImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for PortfolioImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// Reads property portfolios from CSV exports.
///
/// Columns: `id,address,property_type,price,down_payment,loan_amount,
/// interest_rate,loan_term,monthly_rent,monthly_expenses,vacancy_rate,
/// neighborhood,school_district,year_built,square_feet,bedrooms,bathrooms`.
/// Only `address` and `price` are required; blank cells count as absent.
pub struct PortfolioImporter;

impl PortfolioImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<PropertyRecord>, PortfolioImportError> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    /// Stops at the first row that fails validation.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<PropertyRecord>, PortfolioImportError> {
        let mut records = Vec::new();

        for parsed in parser::parse_rows(reader) {
            let parsed = parsed?;
            let record = parsed
                .record
                .map_err(|source| PortfolioImportError::InvalidRow {
                    row: parsed.row,
                    source,
                })?;
            records.push(record);
        }

        info!(properties = records.len(), "imported portfolio CSV");
        Ok(records)
    }
}
