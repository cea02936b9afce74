use crate::{
    bonds::Bond,
    contains_ci,
    customers::Customer,
    de,
    format::{compact_currency, days_until},
    normalize_term,
    validation::{parse_amount, ValidationError},
    ActiveFilter,
};
use serde::{Deserialize, Serialize};

/// Row of `GET /api/bonds/purchases`, joined with its bond and customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    #[serde(deserialize_with = "de::id")]
    pub user_profile_id: String,
    #[serde(deserialize_with = "de::id")]
    pub available_bond_id: String,
    #[serde(default)]
    pub maturity_date: Option<String>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub coupon_frequency: u32,
    #[serde(default, deserialize_with = "de::null_default")]
    pub coupon_interval_days: u32,
    #[serde(deserialize_with = "de::number")]
    pub amount: f64,
    #[serde(default, deserialize_with = "de::number")]
    pub gross_income: f64,
    #[serde(default, deserialize_with = "de::number")]
    pub net_income: f64,
    #[serde(default)]
    pub next_coupon_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub deleted_at: Option<String>,
    #[serde(default)]
    pub is_active: bool,
    #[serde(default)]
    pub available_bonds: Option<Bond>,
    #[serde(default)]
    pub user_profiles: Option<Customer>,
}

impl Purchase {
    #[must_use]
    pub fn customer_name(&self) -> String {
        self.user_profiles
            .as_ref()
            .map_or_else(|| self.user_profile_id.clone(), Customer::name)
    }

    #[must_use]
    pub fn bond_name(&self) -> &str {
        self.available_bonds
            .as_ref()
            .map_or(self.available_bond_id.as_str(), |bond| bond.display_name.as_str())
    }

    #[must_use]
    pub fn currency(&self) -> &str {
        self.available_bonds
            .as_ref()
            .map_or("", |bond| bond.currency.as_str())
    }

    #[must_use]
    pub fn days_to_next_coupon(&self, today_iso: &str) -> Option<i64> {
        days_until(self.next_coupon_date.as_deref()?, today_iso)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseFilter {
    pub search: String,
    pub status: ActiveFilter,
    /// `user_profile_id` to restrict to.
    pub customer: Option<String>,
}

impl PurchaseFilter {
    /// Search covers customer name and email, bond name and ISIN.
    #[must_use]
    pub fn matches(&self, purchase: &Purchase) -> bool {
        let term = normalize_term(&self.search);
        let profile = purchase.user_profiles.as_ref();
        let bond = purchase.available_bonds.as_ref();
        let matches_search = term.is_empty()
            || profile.is_some_and(|p| contains_ci(&p.name(), &term) || contains_ci(&p.email, &term))
            || bond.is_some_and(|b| {
                contains_ci(&b.display_name, &term)
                    || b.isin.as_deref().is_some_and(|isin| contains_ci(isin, &term))
            });

        matches_search
            && self.status.matches(purchase.is_active)
            && self
                .customer
                .as_ref()
                .map_or(true, |id| &purchase.user_profile_id == id)
    }

    #[must_use]
    pub fn apply<'a>(&self, purchases: &'a [Purchase]) -> Vec<&'a Purchase> {
        purchases.iter().filter(|p| self.matches(p)).collect()
    }
}

/// Distinct `(user_profile_id, name)` pairs in first-seen order, for the
/// customer filter.
#[must_use]
pub fn unique_customers(purchases: &[Purchase]) -> Vec<(String, String)> {
    let mut seen: Vec<(String, String)> = Vec::new();
    for purchase in purchases {
        if !seen.iter().any(|(id, _)| id == &purchase.user_profile_id) {
            seen.push((purchase.user_profile_id.clone(), purchase.customer_name()));
        }
    }
    seen
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PurchaseTotals {
    pub count: usize,
    pub active: usize,
    pub amount: f64,
}

#[must_use]
pub fn totals(purchases: &[Purchase]) -> PurchaseTotals {
    purchases.iter().fold(
        PurchaseTotals {
            count: purchases.len(),
            ..PurchaseTotals::default()
        },
        |mut totals, purchase| {
            if purchase.is_active {
                totals.active += 1;
            }
            totals.amount += purchase.amount;
            totals
        },
    )
}

/// Body of `POST /api/bonds/purchase`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePurchaseRequest {
    pub user_profile_id: String,
    pub available_bond_id: String,
    pub amount: f64,
}

impl CreatePurchaseRequest {
    /// Validate the create-purchase form.
    ///
    /// # Errors
    /// A missing customer or bond, an amount that is not positive, or one
    /// above what the bond still has available.
    pub fn build(
        customer: Option<&Customer>,
        bond: Option<&Bond>,
        amount: &str,
    ) -> Result<Self, ValidationError> {
        let customer = customer
            .filter(|c| !c.user_id.trim().is_empty())
            .ok_or(ValidationError::NoCustomer)?;
        let bond = bond.ok_or(ValidationError::NoBond)?;
        let amount = parse_amount(amount)?;
        if amount > bond.available_amount {
            return Err(ValidationError::ExceedsAvailable {
                available: compact_currency(bond.available_amount, ""),
                currency: bond.currency.clone(),
            });
        }
        Ok(Self {
            user_profile_id: customer.user_id.clone(),
            available_bond_id: bond.id.clone(),
            amount,
        })
    }
}

/// `data` of `GET /api/bonds/purchases/next-payment`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextPayment {
    pub next_payment_date: String,
    #[serde(default)]
    pub purchase: Option<Purchase>,
    #[serde(default)]
    pub available_bond: Option<Bond>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bonds::fixtures::bond, customers::fixtures::customer};

    fn purchase(id: &str, profile: Customer, bond: Bond, amount: f64, active: bool) -> Purchase {
        Purchase {
            id: id.to_string(),
            user_profile_id: profile.user_id.clone(),
            available_bond_id: bond.id.clone(),
            maturity_date: Some(bond.maturity_date.clone()),
            coupon_frequency: 2,
            coupon_interval_days: 182,
            amount,
            gross_income: amount * 0.125,
            net_income: amount * 0.1125,
            next_coupon_date: Some("2025-06-30".to_string()),
            created_at: None,
            updated_at: None,
            deleted_at: None,
            is_active: active,
            available_bonds: Some(bond),
            user_profiles: Some(profile),
        }
    }

    fn book() -> Vec<Purchase> {
        let amina = customer("u1", "Amina", "Okello", "amina@borabond.com");
        let peter = customer("u2", "Peter", "Mwangi", "peter@example.com");
        vec![
            purchase("p1", amina.clone(), bond("1", "Kenya Infrastructure Bond", "KE", 10, true), 10_000.0, true),
            purchase("p2", peter, bond("2", "Uganda Treasury Bond", "UG", 5, true), 2_500.0, false),
            purchase("p3", amina, bond("2", "Uganda Treasury Bond", "UG", 5, true), 500.0, true),
        ]
    }

    #[test]
    fn search_and_filters() {
        let book = book();
        let by_isin = PurchaseFilter {
            search: "UG0002".to_string(),
            ..PurchaseFilter::default()
        };
        assert_eq!(by_isin.apply(&book).len(), 2);

        let inactive = PurchaseFilter {
            status: ActiveFilter::Inactive,
            ..PurchaseFilter::default()
        };
        assert_eq!(inactive.apply(&book)[0].id, "p2");

        let amina_only = PurchaseFilter {
            search: "uganda".to_string(),
            customer: Some("u1".to_string()),
            ..PurchaseFilter::default()
        };
        let found = amina_only.apply(&book);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "p3");
    }

    #[test]
    fn customers_and_totals() {
        let book = book();
        let customers = unique_customers(&book);
        assert_eq!(
            customers,
            vec![
                ("u1".to_string(), "Amina Okello".to_string()),
                ("u2".to_string(), "Peter Mwangi".to_string()),
            ]
        );
        let totals = totals(&book);
        assert_eq!(totals.count, 3);
        assert_eq!(totals.active, 2);
        assert!((totals.amount - 13_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn create_request_validation() {
        let amina = customer("u1", "Amina", "Okello", "amina@borabond.com");
        let kenya = bond("1", "Kenya Infrastructure Bond", "KE", 10, true);

        assert_eq!(
            CreatePurchaseRequest::build(None, Some(&kenya), "100"),
            Err(ValidationError::NoCustomer)
        );
        assert_eq!(
            CreatePurchaseRequest::build(Some(&amina), None, "100"),
            Err(ValidationError::NoBond)
        );
        assert_eq!(
            CreatePurchaseRequest::build(Some(&amina), Some(&kenya), "0"),
            Err(ValidationError::InvalidAmount)
        );
        assert!(matches!(
            CreatePurchaseRequest::build(Some(&amina), Some(&kenya), "6,000,000"),
            Err(ValidationError::ExceedsAvailable { .. })
        ));

        let request = CreatePurchaseRequest::build(Some(&amina), Some(&kenya), "1,000").unwrap();
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"userProfileId": "u1", "availableBondId": "1", "amount": 1000.0})
        );
    }

    #[test]
    fn coupon_countdown_and_next_payment() {
        let book = book();
        assert_eq!(book[0].days_to_next_coupon("2025-06-01"), Some(29));

        let raw = r#"{"nextPaymentDate": "2025-06-30", "purchase": null}"#;
        let next: NextPayment = serde_json::from_str(raw).unwrap();
        assert_eq!(next.next_payment_date, "2025-06-30");
        assert!(next.available_bond.is_none());
    }
}
