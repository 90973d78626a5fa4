use crate::analytics::domain::PropertyRecord;
use serde::Deserialize;

/// Search criteria for listing properties. Every bound is inclusive and an
/// absent field matches everything.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PropertyFilter {
    /// Case-insensitive substring of the property type.
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub min_rent: Option<f64>,
    #[serde(default)]
    pub max_rent: Option<f64>,
}

impl PropertyFilter {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn matches(&self, record: &PropertyRecord) -> bool {
        let type_matches = self.property_type.as_deref().map_or(true, |wanted| {
            record
                .property_type
                .to_lowercase()
                .contains(&wanted.trim().to_lowercase())
        });

        type_matches
            && within(record.facts.purchase_price, self.min_price, self.max_price)
            && within(record.facts.monthly_rent, self.min_rent, self.max_rent)
    }
}

fn within(value: f64, min: Option<f64>, max: Option<f64>) -> bool {
    min.map_or(true, |min| value >= min) && max.map_or(true, |max| value <= max)
}
