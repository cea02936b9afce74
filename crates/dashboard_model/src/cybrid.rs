//! Cybrid book transfers and trades, proxied by the backend.

use crate::{
    contains_ci, de, normalize_term,
    validation::{parse_amount, ValidationError},
};
use admin_session::cookies::encode_component;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Storage key of the cached user id to Cybrid customer id list.
pub const MAPPINGS_KEY: &str = "cybrid_customer_mappings";

pub const TRANSFER_PATH: &str = "/api/cybrid/transfers/frontend";
pub const TRADE_PATH: &str = "/api/cybrid/trade";
pub const FINALIZE_TRADE_PATH: &str = "/api/cybrid/trade/finalize";

pub const TRADE_SYMBOL: &str = "USDC_SOL-USD";

#[must_use]
pub fn customer_id_path(user_id: &str) -> String {
    format!("/api/cybrid/customer-id?user_id={}", encode_component(user_id))
}

/// Customer row as the Cybrid pages read it. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CybridCustomer {
    #[serde(default, deserialize_with = "optional_id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub verification_status: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub total_bonds: Option<u32>,
    #[serde(default)]
    pub total_value: Option<f64>,
}

fn optional_id<'de, D: serde::Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    struct Wrapped(#[serde(deserialize_with = "de::id")] String);
    Ok(Option::<Wrapped>::deserialize(deserializer)?.map(|Wrapped(id)| id))
}

impl CybridCustomer {
    #[must_use]
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }

    /// Name for toasts: first name, last name, or `customer`.
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.first_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or_else(|| self.last_name.as_deref().filter(|n| !n.is_empty()))
            .unwrap_or("customer")
    }

    /// Non-empty `user_id`.
    ///
    /// # Errors
    /// `MissingCustomerId` otherwise.
    pub fn require_user_id(&self) -> Result<&str, ValidationError> {
        self.user_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
            .ok_or(ValidationError::MissingCustomerId)
    }

    #[must_use]
    pub fn matches_term(&self, term: &str) -> bool {
        let term = normalize_term(term);
        if term.is_empty() {
            return true;
        }
        let hit = |field: &Option<String>| field.as_deref().is_some_and(|v| contains_ci(v, &term));
        let full = self.full_name();
        hit(&self.first_name)
            || hit(&self.last_name)
            || (!full.is_empty() && contains_ci(&full, &term))
            || hit(&self.email)
            || hit(&self.user_id)
    }
}

#[must_use]
pub fn search<'a>(customers: &'a [CybridCustomer], term: &str) -> Vec<&'a CybridCustomer> {
    customers.iter().filter(|c| c.matches_term(term)).collect()
}

/// `data` of `GET /api/cybrid/customer-id`, also the cached form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerIdMapping {
    #[serde(deserialize_with = "de::id")]
    pub user_id: String,
    pub cybrid_customer_id: String,
}

/// Cached mappings, one per `user_id`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerMappings {
    entries: Vec<CustomerIdMapping>,
}

impl CustomerMappings {
    /// Parse the stored list. Corrupt data starts an empty cache.
    #[must_use]
    pub fn from_json(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::default();
        };
        match serde_json::from_str::<Vec<CustomerIdMapping>>(raw) {
            Ok(list) => {
                let mut mappings = Self::default();
                for mapping in list {
                    mappings.upsert(mapping);
                }
                mappings
            }
            Err(err) => {
                warn!("Discarding unreadable customer mappings: {err}");
                Self::default()
            }
        }
    }

    /// # Errors
    /// Serialization failure.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.entries)
    }

    #[must_use]
    pub fn get(&self, user_id: &str) -> Option<&CustomerIdMapping> {
        self.entries.iter().find(|m| m.user_id == user_id)
    }

    /// Insert, replacing any mapping for the same `user_id`.
    pub fn upsert(&mut self, mapping: CustomerIdMapping) {
        match self.entries.iter_mut().find(|m| m.user_id == mapping.user_id) {
            Some(existing) => *existing = mapping,
            None => self.entries.push(mapping),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Body of `POST /api/cybrid/transfers/frontend`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferRequest {
    pub receive_amount: f64,
    #[serde(rename = "customerGuid")]
    pub customer_guid: String,
    pub asset: &'static str,
    pub side: &'static str,
}

impl TransferRequest {
    /// # Errors
    /// Missing customer id or an invalid amount.
    pub fn build(mapping: Option<&CustomerIdMapping>, amount: &str) -> Result<Self, ValidationError> {
        let mapping = mapping.ok_or(ValidationError::NoCustomer)?;
        if mapping.cybrid_customer_id.trim().is_empty() {
            return Err(ValidationError::MissingCustomerId);
        }
        Ok(Self {
            receive_amount: parse_amount(amount)?,
            customer_guid: mapping.cybrid_customer_id.clone(),
            asset: "USD",
            side: "withdrawal",
        })
    }
}

/// Body of `POST /api/cybrid/trade`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRequest {
    pub customer_guid: String,
    pub amount: f64,
    pub symbol: &'static str,
    pub side: &'static str,
    pub asset: &'static str,
    pub product_type: &'static str,
    pub user_id: String,
}

impl TradeRequest {
    /// # Errors
    /// Missing customer or an invalid amount.
    pub fn build(mapping: Option<&CustomerIdMapping>, amount: &str) -> Result<Self, ValidationError> {
        let mapping = mapping.ok_or(ValidationError::NoCustomer)?;
        Ok(Self {
            customer_guid: mapping.cybrid_customer_id.clone(),
            amount: parse_amount(amount)?,
            symbol: TRADE_SYMBOL,
            side: "buy",
            asset: "USDC",
            product_type: "trading",
            user_id: mapping.user_id.clone(),
        })
    }
}

/// Body of `POST /api/cybrid/trade/finalize`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalizeTradeRequest {
    pub customer_guid: String,
    pub user_id: String,
}

impl FinalizeTradeRequest {
    /// Finalizing only works for customers whose Cybrid id is already cached.
    ///
    /// # Errors
    /// `MissingCustomerId` or `MissingCybridMapping`.
    pub fn build(customer: &CybridCustomer, mappings: &CustomerMappings) -> Result<Self, ValidationError> {
        let user_id = customer.require_user_id()?;
        let mapping = mappings
            .get(user_id)
            .ok_or(ValidationError::MissingCybridMapping)?;
        Ok(Self {
            customer_guid: mapping.cybrid_customer_id.clone(),
            user_id: user_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(user: &str, guid: &str) -> CustomerIdMapping {
        CustomerIdMapping {
            user_id: user.to_string(),
            cybrid_customer_id: guid.to_string(),
        }
    }

    fn grace() -> CybridCustomer {
        CybridCustomer {
            user_id: Some("u-7".to_string()),
            first_name: Some("Grace".to_string()),
            last_name: Some("Achieng".to_string()),
            email: Some("grace@borabond.com".to_string()),
            ..CybridCustomer::default()
        }
    }

    #[test]
    fn parses_sparse_customers() {
        let rows: Vec<CybridCustomer> =
            serde_json::from_str(r#"[{"user_id": 5}, {"email": "x@y.z", "total_value": 12.5}, {}]"#).unwrap();
        assert_eq!(rows[0].user_id.as_deref(), Some("5"));
        assert_eq!(rows[1].user_id, None);
        assert_eq!(rows[2].short_name(), "customer");
    }

    #[test]
    fn search_terms() {
        let list = vec![grace(), CybridCustomer::default()];
        assert_eq!(search(&list, "grace ach").len(), 1);
        assert_eq!(search(&list, "U-7").len(), 1);
        assert_eq!(search(&list, "  ").len(), 2);
        assert!(search(&list, "nobody").is_empty());
    }

    #[test]
    fn mappings_upsert_and_survive_corruption() {
        let mut cache = CustomerMappings::from_json(Some("not json"));
        assert!(cache.is_empty());
        cache.upsert(mapping("u-7", "guid-a"));
        cache.upsert(mapping("u-7", "guid-b"));
        cache.upsert(mapping("u-8", "guid-c"));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("u-7").map(|m| m.cybrid_customer_id.as_str()), Some("guid-b"));

        let json = cache.to_json().unwrap();
        let reloaded = CustomerMappings::from_json(Some(&json));
        assert_eq!(reloaded, cache);

        let duplicated = r#"[{"user_id":"u-1","cybrid_customer_id":"old"},{"user_id":"u-1","cybrid_customer_id":"new"}]"#;
        let collapsed = CustomerMappings::from_json(Some(duplicated));
        assert_eq!(collapsed.len(), 1);
        assert_eq!(collapsed.get("u-1").map(|m| m.cybrid_customer_id.as_str()), Some("new"));
    }

    #[test]
    fn transfer_body() {
        assert_eq!(
            TransferRequest::build(Some(&mapping("u-7", "guid-a")), "0"),
            Err(ValidationError::InvalidAmount)
        );
        assert_eq!(TransferRequest::build(None, "10"), Err(ValidationError::NoCustomer));
        let body = serde_json::to_value(TransferRequest::build(Some(&mapping("u-7", "guid-a")), "250").unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"receive_amount": 250.0, "customerGuid": "guid-a", "asset": "USD", "side": "withdrawal"})
        );
    }

    #[test]
    fn trade_body() {
        let body = serde_json::to_value(TradeRequest::build(Some(&mapping("u-7", "guid-a")), "99.5").unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "customer_guid": "guid-a",
                "amount": 99.5,
                "symbol": "USDC_SOL-USD",
                "side": "buy",
                "asset": "USDC",
                "product_type": "trading",
                "user_id": "u-7"
            })
        );
    }

    #[test]
    fn finalize_needs_cached_mapping() {
        let mut cache = CustomerMappings::default();
        assert_eq!(
            FinalizeTradeRequest::build(&grace(), &cache),
            Err(ValidationError::MissingCybridMapping)
        );
        assert_eq!(
            FinalizeTradeRequest::build(&CybridCustomer::default(), &cache),
            Err(ValidationError::MissingCustomerId)
        );
        cache.upsert(mapping("u-7", "guid-a"));
        assert_eq!(
            FinalizeTradeRequest::build(&grace(), &cache),
            Ok(FinalizeTradeRequest {
                customer_guid: "guid-a".to_string(),
                user_id: "u-7".to_string()
            })
        );
    }

    #[test]
    fn customer_id_lookup_path_is_encoded() {
        assert_eq!(customer_id_path("a b&c"), "/api/cybrid/customer-id?user_id=a%20b%26c");
    }
}
