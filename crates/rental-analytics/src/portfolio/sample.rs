use crate::analytics::domain::{PropertyFacts, PropertyRecord};

struct SampleProperty {
    id: &'static str,
    address: &'static str,
    property_type: &'static str,
    price: f64,
    down_payment: f64,
    interest_rate: f64,
    monthly_rent: f64,
    monthly_expenses: f64,
    neighborhood: &'static str,
    school_district: Option<&'static str>,
    year_built: i32,
    square_feet: u32,
    bedrooms: u8,
    bathrooms: f32,
}

const SAMPLES: [SampleProperty; 6] = [
    SampleProperty {
        id: "sample-001",
        address: "412 Maple Ave",
        property_type: "Single Family",
        price: 285_000.0,
        down_payment: 57_000.0,
        interest_rate: 6.5,
        monthly_rent: 2_300.0,
        monthly_expenses: 450.0,
        neighborhood: "Historic District",
        school_district: Some("Maplewood Unified"),
        year_built: 1998,
        square_feet: 1_850,
        bedrooms: 3,
        bathrooms: 2.0,
    },
    SampleProperty {
        id: "sample-002",
        address: "88 Harbor Point #4",
        property_type: "Condo",
        price: 215_000.0,
        down_payment: 43_000.0,
        interest_rate: 6.75,
        monthly_rent: 1_750.0,
        monthly_expenses: 520.0,
        neighborhood: "Waterfront",
        school_district: None,
        year_built: 2016,
        square_feet: 980,
        bedrooms: 2,
        bathrooms: 1.0,
    },
    SampleProperty {
        id: "sample-003",
        address: "1207 Oak Ridge Dr",
        property_type: "Duplex",
        price: 360_000.0,
        down_payment: 72_000.0,
        interest_rate: 6.25,
        monthly_rent: 3_300.0,
        monthly_expenses: 700.0,
        neighborhood: "Oak Hills",
        school_district: Some("Ridgeview ISD"),
        year_built: 1985,
        square_feet: 2_400,
        bedrooms: 4,
        bathrooms: 2.0,
    },
    SampleProperty {
        id: "sample-004",
        address: "5 Foundry Pkwy",
        property_type: "Multi-Family",
        price: 520_000.0,
        down_payment: 130_000.0,
        interest_rate: 7.0,
        monthly_rent: 4_700.0,
        monthly_expenses: 1_400.0,
        neighborhood: "Industrial Corridor",
        school_district: None,
        year_built: 1968,
        square_feet: 4_200,
        bedrooms: 6,
        bathrooms: 3.0,
    },
    SampleProperty {
        id: "sample-005",
        address: "77 Cedar Ln",
        property_type: "Townhouse",
        price: 245_000.0,
        down_payment: 49_000.0,
        interest_rate: 6.5,
        monthly_rent: 1_900.0,
        monthly_expenses: 380.0,
        neighborhood: "Downtown",
        school_district: Some("Central Schools"),
        year_built: 2021,
        square_feet: 1_400,
        bedrooms: 3,
        bathrooms: 2.5,
    },
    SampleProperty {
        id: "sample-006",
        address: "930 County Rd 12",
        property_type: "Single Family",
        price: 150_000.0,
        down_payment: 150_000.0,
        interest_rate: 0.0,
        monthly_rent: 1_250.0,
        monthly_expenses: 300.0,
        neighborhood: "Remote Valley",
        school_district: None,
        year_built: 1955,
        square_feet: 1_100,
        bedrooms: 2,
        bathrooms: 1.0,
    },
];

/// A fixed demo portfolio covering levered and all-cash purchases across
/// several property types and neighborhoods. Identical on every call.
pub fn sample_portfolio() -> Vec<PropertyRecord> {
    SAMPLES.iter().map(SampleProperty::to_record).collect()
}

impl SampleProperty {
    fn to_record(&self) -> PropertyRecord {
        let facts = PropertyFacts {
            purchase_price: self.price,
            down_payment: self.down_payment,
            loan_amount: self.price - self.down_payment,
            interest_rate: self.interest_rate,
            monthly_rent: self.monthly_rent,
            monthly_expenses: self.monthly_expenses,
            neighborhood: Some(self.neighborhood.to_string()),
            school_district: self.school_district.map(str::to_string),
            year_built: Some(self.year_built),
            square_feet: Some(self.square_feet),
            ..PropertyFacts::default()
        };

        let mut record = PropertyRecord::new(self.id, self.address, self.property_type, facts);
        record.bedrooms = Some(self.bedrooms);
        record.bathrooms = Some(self.bathrooms);
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn is_deterministic_and_valid() {
        let first = sample_portfolio();
        assert_eq!(first, sample_portfolio());

        let ids: HashSet<_> = first.iter().map(|record| record.id.clone()).collect();
        assert_eq!(ids.len(), first.len());
        for record in &first {
            record.validate().expect("sample records validate");
        }
    }

    #[test]
    fn includes_an_all_cash_purchase() {
        let unlevered = sample_portfolio()
            .into_iter()
            .find(|record| record.facts.loan_amount == 0.0)
            .expect("one property has no loan");
        assert_eq!(unlevered.facts.down_payment, unlevered.facts.purchase_price);
    }
}
