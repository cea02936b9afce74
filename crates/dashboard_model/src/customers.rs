use crate::{
    contains_ci, de, normalize_term,
    validation::{require_text, validate_email, ValidationError},
};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    #[default]
    Pending,
    Active,
    Inactive,
    #[serde(other)]
    Unknown,
}

impl CustomerStatus {
    pub const SELECTABLE: [Self; 3] = [Self::Pending, Self::Active, Self::Inactive];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Unknown => "unknown",
        }
    }

    /// `None` for "all" and anything unrecognised.
    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        Self::SELECTABLE.into_iter().find(|s| s.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Customer,
    Admin,
    #[serde(other)]
    Unknown,
}

impl UserType {
    pub const SELECTABLE: [Self; 2] = [Self::Customer, Self::Admin];

    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        Self::SELECTABLE.into_iter().find(|t| t.as_str() == value)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    #[default]
    Pending,
    Verified,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl VerificationStatus {
    pub const SELECTABLE: [Self; 3] = [Self::Pending, Self::Verified, Self::Rejected];

    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        Self::SELECTABLE.into_iter().find(|v| v.as_str() == value)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
            Self::Unknown => "unknown",
        }
    }
}

/// Row of `GET /api/bonds/customers`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(deserialize_with = "de::id")]
    pub user_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub status: CustomerStatus,
    #[serde(default)]
    pub user_type: UserType,
    #[serde(default)]
    pub verification_status: VerificationStatus,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub onboarding_completed: bool,
    #[serde(default, deserialize_with = "de::null_default")]
    pub onboarding_step: u32,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub marital_status: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub employment_status: Option<String>,
    #[serde(default)]
    pub occupation: Option<String>,
    #[serde(default)]
    pub employer: Option<String>,
    #[serde(default, deserialize_with = "de::null_default")]
    pub compliance_docs_sent: bool,
    #[serde(default, deserialize_with = "de::null_default")]
    pub agreement_submitted: bool,
    #[serde(default, deserialize_with = "de::null_default")]
    pub precise_fp_form_completed: bool,
    #[serde(default, deserialize_with = "de::null_default")]
    pub borabond_onboarding_completed: bool,
    #[serde(default, deserialize_with = "de::null_default")]
    pub investment_strategy_complete: bool,
    #[serde(default, deserialize_with = "de::null_default")]
    pub cybrid_integration_completed: bool,
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

impl Customer {
    /// Display name, then first and last name, then either alone, then email.
    #[must_use]
    pub fn name(&self) -> String {
        if let Some(display) = non_empty(self.display_name.as_ref()) {
            return display.to_string();
        }
        match (
            non_empty(self.first_name.as_ref()),
            non_empty(self.last_name.as_ref()),
        ) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(first), None) => first.to_string(),
            (None, Some(last)) => last.to_string(),
            (None, None) => self.email.clone(),
        }
    }

    /// Name and email label used in customer pickers.
    #[must_use]
    pub fn picker_label(&self) -> String {
        let name = non_empty(self.full_name.as_ref())
            .map(str::to_string)
            .or_else(|| {
                match (
                    non_empty(self.first_name.as_ref()),
                    non_empty(self.last_name.as_ref()),
                ) {
                    (Some(first), Some(last)) => Some(format!("{first} {last}")),
                    _ => None,
                }
            })
            .or_else(|| non_empty(self.display_name.as_ref()).map(str::to_string))
            .or_else(|| {
                self.email
                    .split('@')
                    .next()
                    .filter(|local| !local.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "Unknown Name".to_string());
        let email = if self.email.is_empty() {
            "No Email"
        } else {
            self.email.as_str()
        };
        format!("{name} — {email}")
    }

    /// Usable as a purchase/transfer target: has an id and something to show.
    #[must_use]
    pub fn is_selectable(&self) -> bool {
        !self.user_id.trim().is_empty()
            && (!self.email.is_empty()
                || non_empty(self.full_name.as_ref()).is_some()
                || non_empty(self.display_name.as_ref()).is_some()
                || (non_empty(self.first_name.as_ref()).is_some()
                    && non_empty(self.last_name.as_ref()).is_some()))
    }

    /// Broad match used by the transfer and trade pickers: names, email and id.
    #[must_use]
    pub fn matches_term(&self, term: &str) -> bool {
        let term = normalize_term(term);
        if term.is_empty() {
            return true;
        }
        let joined = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        );
        contains_ci(joined.trim(), &term)
            || self.full_name.as_deref().is_some_and(|n| contains_ci(n, &term))
            || self.display_name.as_deref().is_some_and(|n| contains_ci(n, &term))
            || contains_ci(&self.email, &term)
            || contains_ci(&self.user_id, &term)
    }
}

/// Drops rows that cannot be offered as a purchase or transfer target.
#[must_use]
pub fn selectable(customers: Vec<Customer>) -> Vec<Customer> {
    customers
        .into_iter()
        .filter(|customer| {
            let ok = customer.is_selectable();
            if !ok {
                warn!(user_id = %customer.user_id, "Skipping customer without id or name");
            }
            ok
        })
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    pub search: String,
    pub status: Option<CustomerStatus>,
    pub user_type: Option<UserType>,
}

impl CustomerFilter {
    /// Search covers the resolved display name and email.
    #[must_use]
    pub fn matches(&self, customer: &Customer) -> bool {
        let term = normalize_term(&self.search);
        (contains_ci(&customer.name(), &term) || contains_ci(&customer.email, &term))
            && self.status.map_or(true, |s| customer.status == s)
            && self.user_type.map_or(true, |t| customer.user_type == t)
    }

    #[must_use]
    pub fn apply<'a>(&self, customers: &'a [Customer]) -> Vec<&'a Customer> {
        customers.iter().filter(|c| self.matches(c)).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: usize,
    pub active: usize,
    pub pending: usize,
    pub inactive: usize,
    pub admins: usize,
}

#[must_use]
pub fn status_counts(customers: &[Customer]) -> StatusCounts {
    customers.iter().fold(
        StatusCounts {
            total: customers.len(),
            ..StatusCounts::default()
        },
        |mut counts, customer| {
            match customer.status {
                CustomerStatus::Active => counts.active += 1,
                CustomerStatus::Pending => counts.pending += 1,
                CustomerStatus::Inactive => counts.inactive += 1,
                CustomerStatus::Unknown => {}
            }
            if customer.user_type == UserType::Admin {
                counts.admins += 1;
            }
            counts
        },
    )
}

/// Body of `PUT /api/bonds/customers/:id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomerUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub status: CustomerStatus,
    pub user_type: UserType,
    pub verification_status: VerificationStatus,
    pub display_name: String,
    pub onboarding_completed: bool,
    pub onboarding_step: u32,
    pub dob: String,
    pub gender: String,
    pub marital_status: String,
    pub address: String,
    pub employment_status: String,
    pub occupation: String,
    pub employer: String,
    pub precise_fp_form_completed: bool,
    pub compliance_docs_sent: bool,
    pub agreement_submitted: bool,
    pub borabond_onboarding_completed: bool,
    pub investment_strategy_complete: bool,
    pub cybrid_integration_completed: bool,
}

impl From<&Customer> for CustomerUpdate {
    fn from(customer: &Customer) -> Self {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            first_name: text(&customer.first_name),
            last_name: text(&customer.last_name),
            email: customer.email.clone(),
            phone: text(&customer.phone),
            status: customer.status,
            user_type: customer.user_type,
            verification_status: customer.verification_status,
            display_name: text(&customer.display_name),
            onboarding_completed: customer.onboarding_completed,
            onboarding_step: customer.onboarding_step,
            dob: text(&customer.dob),
            gender: text(&customer.gender),
            marital_status: text(&customer.marital_status),
            address: text(&customer.address),
            employment_status: text(&customer.employment_status),
            occupation: text(&customer.occupation),
            employer: text(&customer.employer),
            precise_fp_form_completed: customer.precise_fp_form_completed,
            compliance_docs_sent: customer.compliance_docs_sent,
            agreement_submitted: customer.agreement_submitted,
            borabond_onboarding_completed: customer.borabond_onboarding_completed,
            investment_strategy_complete: customer.investment_strategy_complete,
            cybrid_integration_completed: customer.cybrid_integration_completed,
        }
    }
}

impl CustomerUpdate {
    /// # Errors
    /// Returns the first invalid field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("Email", &self.email)?;
        validate_email(&self.email)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) fn customer(id: &str, first: &str, last: &str, email: &str) -> Customer {
        serde_json::from_value(serde_json::json!({
            "user_id": id,
            "email": email,
            "first_name": first,
            "last_name": last,
            "status": "active",
            "user_type": "customer",
            "verification_status": "verified",
        }))
        .unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::customer;
    use super::*;

    #[test]
    fn parses_sparse_rows() {
        let raw = r#"{"user_id": 12, "email": "a@b.co", "status": "suspended", "citizenship": null, "onboarding_step": null}"#;
        let parsed: Customer = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.user_id, "12");
        assert_eq!(parsed.status, CustomerStatus::Unknown);
        assert_eq!(parsed.user_type, UserType::Customer);
        assert_eq!(parsed.onboarding_step, 0);
    }

    #[test]
    fn name_precedence() {
        let mut c = customer("1", "Amina", "Okello", "amina@borabond.com");
        assert_eq!(c.name(), "Amina Okello");
        c.display_name = Some("Amina O.".to_string());
        assert_eq!(c.name(), "Amina O.");
        c.display_name = None;
        c.last_name = None;
        assert_eq!(c.name(), "Amina");
        c.first_name = Some(String::new());
        assert_eq!(c.name(), "amina@borabond.com");
    }

    #[test]
    fn picker_label_falls_back_to_email_local_part() {
        let mut c = customer("1", "", "", "kato@borabond.com");
        c.first_name = None;
        c.last_name = None;
        assert_eq!(c.picker_label(), "kato — kato@borabond.com");
        c.full_name = Some("Kato Musa".to_string());
        assert_eq!(c.picker_label(), "Kato Musa — kato@borabond.com");
    }

    #[test]
    fn filter_by_search_status_and_type() {
        let mut admin = customer("2", "Grace", "Achieng", "grace@borabond.com");
        admin.user_type = UserType::Admin;
        let mut pending = customer("3", "Peter", "Mwangi", "peter@example.com");
        pending.status = CustomerStatus::Pending;
        let list = vec![customer("1", "Amina", "Okello", "amina@borabond.com"), admin, pending];

        let by_email = CustomerFilter {
            search: "EXAMPLE.com".to_string(),
            ..CustomerFilter::default()
        };
        assert_eq!(by_email.apply(&list)[0].user_id, "3");

        let admins = CustomerFilter {
            user_type: Some(UserType::Admin),
            ..CustomerFilter::default()
        };
        assert_eq!(admins.apply(&list).len(), 1);

        let counts = status_counts(&list);
        assert_eq!(counts.total, 3);
        assert_eq!(counts.active, 2);
        assert_eq!(counts.pending, 1);
        assert_eq!(counts.admins, 1);
    }

    #[test]
    fn selectable_drops_nameless_rows() {
        let mut nameless = customer("9", "", "", "");
        nameless.first_name = None;
        nameless.last_name = None;
        let mut no_id = customer("", "Amina", "Okello", "amina@borabond.com");
        no_id.user_id = "  ".to_string();
        let kept = selectable(vec![
            customer("1", "Amina", "Okello", "amina@borabond.com"),
            nameless,
            no_id,
        ]);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].user_id, "1");
    }

    #[test]
    fn picker_search_matches_id() {
        let c = customer("usr-778", "Amina", "Okello", "amina@borabond.com");
        assert!(c.matches_term("778"));
        assert!(c.matches_term("amina okello"));
        assert!(!c.matches_term("zzz"));
    }

    #[test]
    fn select_values() {
        assert_eq!(CustomerStatus::from_value("inactive"), Some(CustomerStatus::Inactive));
        assert_eq!(CustomerStatus::from_value("all"), None);
        assert_eq!(CustomerStatus::from_value("unknown"), None);
        assert_eq!(UserType::from_value("admin"), Some(UserType::Admin));
        assert_eq!(VerificationStatus::from_value("rejected"), Some(VerificationStatus::Rejected));
    }

    #[test]
    fn update_form_validation() {
        let c = customer("1", "Amina", "Okello", "amina@borabond.com");
        let mut update = CustomerUpdate::from(&c);
        assert!(update.validate().is_ok());
        update.email = "nope".to_string();
        assert_eq!(update.validate(), Err(ValidationError::InvalidEmail));
        update.email = String::new();
        assert_eq!(
            update.validate(),
            Err(ValidationError::Required { field: "Email" })
        );
    }
}
