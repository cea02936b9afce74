use crate::{contains_ci, de, normalize_term, ActiveFilter};
use serde::{Deserialize, Serialize};

/// Row of `GET /api/bonds`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    pub instrument_code: String,
    pub display_name: String,
    pub country: String,
    pub currency: String,
    pub maturity_date: String,
    pub tenor: u32,
    #[serde(deserialize_with = "de::number")]
    pub coupon_rate: f64,
    #[serde(default, deserialize_with = "de::number")]
    pub bid_yield: f64,
    #[serde(default, deserialize_with = "de::number")]
    pub offer_yield: f64,
    #[serde(deserialize_with = "de::number")]
    pub available_amount: f64,
    pub is_active: bool,
    #[serde(default)]
    pub price_update_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(rename = "ISIN", default)]
    pub isin: Option<String>,
    #[serde(default, deserialize_with = "de::number")]
    pub withholding_tax: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BondFilter {
    pub search: String,
    pub country: Option<String>,
    pub tenor: Option<u32>,
    pub status: ActiveFilter,
}

impl BondFilter {
    /// Search covers display name, instrument code, country and ISIN.
    #[must_use]
    pub fn matches(&self, bond: &Bond) -> bool {
        let term = normalize_term(&self.search);
        let matches_search = contains_ci(&bond.display_name, &term)
            || contains_ci(&bond.instrument_code, &term)
            || contains_ci(&bond.country, &term)
            || bond.isin.as_deref().is_some_and(|isin| contains_ci(isin, &term));

        matches_search
            && self.country.as_ref().map_or(true, |c| &bond.country == c)
            && self.tenor.map_or(true, |t| bond.tenor == t)
            && self.status.matches(bond.is_active)
    }

    #[must_use]
    pub fn apply<'a>(&self, bonds: &'a [Bond]) -> Vec<&'a Bond> {
        bonds.iter().filter(|bond| self.matches(bond)).collect()
    }
}

/// Distinct countries in first-seen order.
#[must_use]
pub fn unique_countries(bonds: &[Bond]) -> Vec<String> {
    let mut countries: Vec<String> = Vec::new();
    for bond in bonds {
        if !countries.contains(&bond.country) {
            countries.push(bond.country.clone());
        }
    }
    countries
}

/// Distinct tenors, ascending.
#[must_use]
pub fn unique_tenors(bonds: &[Bond]) -> Vec<u32> {
    let mut tenors: Vec<u32> = bonds.iter().map(|bond| bond.tenor).collect();
    tenors.sort_unstable();
    tenors.dedup();
    tenors
}

#[must_use]
pub fn active_count(bonds: &[Bond]) -> usize {
    bonds.iter().filter(|bond| bond.is_active).count()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::Bond;

    pub(crate) fn bond(id: &str, name: &str, country: &str, tenor: u32, active: bool) -> Bond {
        Bond {
            id: id.to_string(),
            instrument_code: format!("{country}-{tenor}Y"),
            display_name: name.to_string(),
            country: country.to_string(),
            currency: "USD".to_string(),
            maturity_date: "2030-06-30".to_string(),
            tenor,
            coupon_rate: 12.5,
            bid_yield: 13.0,
            offer_yield: 12.8,
            available_amount: 5_000_000.0,
            is_active: active,
            price_update_date: None,
            created_at: None,
            updated_at: None,
            isin: Some(format!("{country}000{id}")),
            withholding_tax: 10.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::bond;
    use super::*;

    fn catalogue() -> Vec<Bond> {
        vec![
            bond("1", "Kenya Infrastructure Bond", "KE", 10, true),
            bond("2", "Uganda Treasury Bond", "UG", 5, true),
            bond("3", "Kenya Treasury Bill", "KE", 1, false),
        ]
    }

    #[test]
    fn parses_backend_row() {
        let raw = r#"{
            "id": "b9",
            "instrument_code": "UG-TB-2029",
            "display_name": "Uganda 5Y",
            "country": "UG",
            "currency": "UGX",
            "maturity_date": "2029-01-15",
            "tenor": 5,
            "coupon_rate": "14.25",
            "bid_yield": 15.1,
            "offer_yield": 14.9,
            "available_amount": 1000000000,
            "is_active": true,
            "price_update_date": "2024-05-01",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-05-01T00:00:00Z",
            "ISIN": null,
            "withholding_tax": 15
        }"#;
        let bond: Bond = serde_json::from_str(raw).unwrap();
        assert_eq!(bond.isin, None);
        assert!((bond.coupon_rate - 14.25).abs() < f64::EPSILON);
    }

    #[test]
    fn search_covers_isin_and_code() {
        let bonds = catalogue();
        let filter = BondFilter {
            search: "ug0002".to_string(),
            ..BondFilter::default()
        };
        assert_eq!(filter.apply(&bonds).len(), 1);

        let filter = BondFilter {
            search: "KE-10".to_string(),
            ..BondFilter::default()
        };
        assert_eq!(filter.apply(&bonds)[0].id, "1");
    }

    #[test]
    fn combined_filters() {
        let bonds = catalogue();
        let filter = BondFilter {
            country: Some("KE".to_string()),
            status: ActiveFilter::Inactive,
            ..BondFilter::default()
        };
        let found = filter.apply(&bonds);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "3");

        let filter = BondFilter {
            tenor: Some(5),
            ..BondFilter::default()
        };
        assert_eq!(filter.apply(&bonds)[0].country, "UG");
    }

    #[test]
    fn facets() {
        let bonds = catalogue();
        assert_eq!(unique_countries(&bonds), vec!["KE", "UG"]);
        assert_eq!(unique_tenors(&bonds), vec![1, 5, 10]);
        assert_eq!(active_count(&bonds), 2);
    }
}
