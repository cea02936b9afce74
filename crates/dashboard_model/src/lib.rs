//! # Dashboard model
//!
//! Explicit schemas for every backend endpoint the dashboard talks to, plus
//! the client-side logic each page runs on top of them: search and filter
//! predicates, form validation and display formatting.
//!
//! Responses are parsed into these types at the client boundary; pages never
//! touch untyped JSON.

pub mod activity;
pub mod bonds;
pub mod customers;
pub mod cybrid;
mod de;
pub mod format;
pub mod ledger;
pub mod purchases;
pub mod settings;
pub mod validation;

pub use validation::ValidationError;

/// Tri-state filter used by every "active / inactive / all" select.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ActiveFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl ActiveFilter {
    #[must_use]
    pub const fn matches(self, is_active: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => is_active,
            Self::Inactive => !is_active,
        }
    }

    #[must_use]
    pub fn from_value(value: &str) -> Self {
        match value {
            "active" | "true" => Self::Active,
            "inactive" | "false" => Self::Inactive,
            _ => Self::All,
        }
    }
}

/// Case-insensitive substring match; an empty needle matches everything.
#[must_use]
pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(needle)
}

/// Lowercased, trimmed search term.
#[must_use]
pub(crate) fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}
