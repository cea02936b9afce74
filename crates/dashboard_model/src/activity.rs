use crate::de;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    User,
    Purchase,
    Bond,
    Payment,
}

impl ActivityKind {
    pub const ALL: [Self; 4] = [Self::User, Self::Purchase, Self::Bond, Self::Payment];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Purchase => "purchase",
            Self::Bond => "bond",
            Self::Payment => "payment",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::User => "Users",
            Self::Purchase => "Purchases",
            Self::Bond => "Bonds",
            Self::Payment => "Payments",
        }
    }

    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

/// Row of `GET /api/admin/recent-activity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentActivity {
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub message: String,
    #[serde(deserialize_with = "de::id")]
    pub entity_id: String,
    pub created_at: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
}

/// Query for `GET /api/admin/recent-activity/filtered`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivityQuery {
    /// `None` asks for every kind.
    pub kind: Option<ActivityKind>,
    pub limit: Option<u32>,
    pub days: Option<u32>,
}

impl ActivityQuery {
    #[must_use]
    pub const fn is_unfiltered(&self) -> bool {
        self.kind.is_none() && self.limit.is_none() && self.days.is_none()
    }

    /// Path plus query string; the plain feed when nothing is set.
    #[must_use]
    pub fn path(&self) -> String {
        if self.is_unfiltered() {
            return "/api/admin/recent-activity".to_string();
        }
        let mut params = Vec::new();
        if let Some(kind) = self.kind {
            params.push(format!("type={}", kind.as_str()));
        }
        if let Some(limit) = self.limit.filter(|l| *l > 0) {
            params.push(format!("limit={limit}"));
        }
        if let Some(days) = self.days.filter(|d| *d > 0) {
            params.push(format!("days={days}"));
        }
        if params.is_empty() {
            "/api/admin/recent-activity/filtered".to_string()
        } else {
            format!("/api/admin/recent-activity/filtered?{}", params.join("&"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_feed_rows() {
        let raw = r#"[
            {"type": "purchase", "message": "Amina bought KE-10Y", "entity_id": 42,
             "created_at": "2025-03-15T10:00:00Z", "icon": "ShoppingCart", "color": "purple"},
            {"type": "user", "message": "New signup", "entity_id": "u-9",
             "created_at": "2025-03-15T09:00:00Z"}
        ]"#;
        let rows: Vec<RecentActivity> = serde_json::from_str(raw).unwrap();
        assert_eq!(rows[0].kind, ActivityKind::Purchase);
        assert_eq!(rows[0].entity_id, "42");
        assert!(rows[1].icon.is_empty());
    }

    #[test]
    fn query_paths() {
        assert_eq!(ActivityQuery::default().path(), "/api/admin/recent-activity");
        let query = ActivityQuery {
            kind: Some(ActivityKind::Payment),
            limit: Some(DEFAULT_LIMIT),
            days: Some(7),
        };
        assert_eq!(
            query.path(),
            "/api/admin/recent-activity/filtered?type=payment&limit=10&days=7"
        );
        let zero_limit = ActivityQuery {
            limit: Some(0),
            ..ActivityQuery::default()
        };
        assert_eq!(zero_limit.path(), "/api/admin/recent-activity/filtered");
    }

    #[test]
    fn kinds_round_trip_through_select_values() {
        for kind in ActivityKind::ALL {
            assert_eq!(ActivityKind::from_value(kind.as_str()), Some(kind));
        }
        assert_eq!(ActivityKind::from_value("all"), None);
    }
}
