use crate::{contains_ci, de, normalize_term};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryType {
    Credit,
    Debit,
}

impl EntryType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Credit => "Credit",
            Self::Debit => "Debit",
        }
    }

    /// `+` for credits, `-` for debits.
    #[must_use]
    pub const fn sign(self) -> char {
        match self {
            Self::Credit => '+',
            Self::Debit => '-',
        }
    }
}

/// Row of `GET /api/ledger`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    #[serde(deserialize_with = "de::id")]
    pub id: String,
    /// `YYYY-MM-DD`
    pub date: String,
    pub description: String,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    #[serde(deserialize_with = "de::number")]
    pub amount: f64,
    #[serde(default, deserialize_with = "de::number")]
    pub balance: f64,
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub customer: String,
    #[serde(default)]
    pub bond: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerFilter {
    pub search: String,
    /// `None` is "All".
    pub entry_type: Option<EntryType>,
    /// Exact `YYYY-MM-DD` match when set.
    pub date: Option<String>,
}

impl LedgerFilter {
    #[must_use]
    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        let term = normalize_term(&self.search);
        (contains_ci(&entry.description, &term)
            || contains_ci(&entry.customer, &term)
            || contains_ci(&entry.reference, &term))
            && self.entry_type.map_or(true, |t| entry.entry_type == t)
            && self
                .date
                .as_deref()
                .filter(|d| !d.is_empty())
                .map_or(true, |d| entry.date == d)
    }

    #[must_use]
    pub fn apply<'a>(&self, entries: &'a [LedgerEntry]) -> Vec<&'a LedgerEntry> {
        entries.iter().filter(|e| self.matches(e)).collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LedgerTotals {
    pub credits: f64,
    pub debits: f64,
}

impl LedgerTotals {
    #[must_use]
    pub fn balance(&self) -> f64 {
        self.credits - self.debits
    }
}

/// Totals over every entry, independent of the active filter.
#[must_use]
pub fn totals(entries: &[LedgerEntry]) -> LedgerTotals {
    entries
        .iter()
        .fold(LedgerTotals::default(), |mut totals, entry| {
            match entry.entry_type {
                EntryType::Credit => totals.credits += entry.amount,
                EntryType::Debit => totals.debits += entry.amount,
            }
            totals
        })
}
