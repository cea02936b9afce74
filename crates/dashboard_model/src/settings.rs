use crate::validation::{require_text, ValidationError};
use admin_session::api::normalize_base_url;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Local storage key of the saved settings.
pub const SETTINGS_KEY: &str = "borabond_settings";

pub const TIMEZONES: [(&str, &str); 4] = [
    ("Africa/Kampala", "Africa/Kampala (EAT)"),
    ("UTC", "UTC"),
    ("America/New_York", "America/New_York (EST)"),
    ("Europe/London", "Europe/London (GMT)"),
];

pub const LANGUAGES: [(&str, &str); 3] = [("en", "English"), ("sw", "Swahili"), ("fr", "French")];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackupFrequency {
    Hourly,
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl BackupFrequency {
    pub const ALL: [Self; 4] = [Self::Hourly, Self::Daily, Self::Weekly, Self::Monthly];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hourly => "Hourly",
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
        }
    }

    #[must_use]
    pub fn from_value(value: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == value)
            .unwrap_or_default()
    }
}

/// Platform settings edited by super admins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub site_name: String,
    pub site_description: String,
    pub timezone: String,
    pub language: String,

    pub enable_two_factor: bool,
    /// Minutes.
    pub session_timeout: u32,
    pub password_min_length: u32,
    pub require_strong_passwords: bool,

    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub push_notifications: bool,
    pub admin_alerts: bool,

    pub api_rate_limit: u32,
    pub enable_api_logging: bool,
    pub cybrid_api_url: String,
    pub yellowcard_api_url: String,

    pub backup_frequency: BackupFrequency,
    pub enable_audit_log: bool,
    pub data_retention_days: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            site_name: "BoraBond Admin Dashboard".to_string(),
            site_description: "Administrative dashboard for BoraBond bond management platform"
                .to_string(),
            timezone: "Africa/Kampala".to_string(),
            language: "en".to_string(),
            enable_two_factor: true,
            session_timeout: 30,
            password_min_length: 8,
            require_strong_passwords: true,
            email_notifications: true,
            sms_notifications: false,
            push_notifications: true,
            admin_alerts: true,
            api_rate_limit: 1000,
            enable_api_logging: true,
            cybrid_api_url: "https://bank.production.cybrid.app".to_string(),
            yellowcard_api_url: "http://localhost:9001".to_string(),
            backup_frequency: BackupFrequency::Daily,
            enable_audit_log: true,
            data_retention_days: 365,
        }
    }
}

fn in_range(field: &'static str, value: u32, min: u32, max: u32) -> Result<(), ValidationError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange { field, min, max })
    }
}

impl Settings {
    /// Load saved settings; missing fields take their defaults and corrupt
    /// data falls back to the defaults entirely.
    #[must_use]
    pub fn from_json(raw: Option<&str>) -> Self {
        raw.map_or_else(Self::default, |raw| {
            serde_json::from_str(raw).unwrap_or_else(|err| {
                warn!("Ignoring unreadable saved settings: {err}");
                Self::default()
            })
        })
    }

    /// # Errors
    /// The first field that fails validation.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("Site name", &self.site_name)?;
        in_range("Session timeout", self.session_timeout, 1, 1440)?;
        in_range("Password minimum length", self.password_min_length, 6, 128)?;
        in_range("API rate limit", self.api_rate_limit, 1, 100_000)?;
        in_range("Data retention", self.data_retention_days, 1, 3650)?;
        normalize_base_url(&self.cybrid_api_url).map_err(|_| ValidationError::InvalidUrl {
            field: "Cybrid API URL",
        })?;
        normalize_base_url(&self.yellowcard_api_url).map_err(|_| ValidationError::InvalidUrl {
            field: "Yellow Card API URL",
        })?;
        Ok(())
    }
}

/// Numeric input that falls back to `default` when blank or unparseable.
#[must_use]
pub fn number_or(input: &str, default: u32) -> u32 {
    input
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.timezone, "Africa/Kampala");
        assert_eq!(settings.backup_frequency, BackupFrequency::Daily);
    }

    #[test]
    fn camel_case_storage_with_partial_data() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["siteName"], "BoraBond Admin Dashboard");
        assert_eq!(json["backupFrequency"], "daily");

        let loaded = Settings::from_json(Some(r#"{"sessionTimeout": 45, "smsNotifications": true}"#));
        assert_eq!(loaded.session_timeout, 45);
        assert!(loaded.sms_notifications);
        assert_eq!(loaded.data_retention_days, 365);

        assert_eq!(Settings::from_json(Some("{oops")), Settings::default());
        assert_eq!(Settings::from_json(None), Settings::default());
    }

    #[test]
    fn validation_failures() {
        let mut settings = Settings {
            session_timeout: 0,
            ..Settings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(ValidationError::OutOfRange {
                field: "Session timeout",
                min: 1,
                max: 1440
            })
        );
        settings.session_timeout = 30;
        settings.cybrid_api_url = "ftp://bank".to_string();
        assert_eq!(
            settings.validate(),
            Err(ValidationError::InvalidUrl {
                field: "Cybrid API URL"
            })
        );
        settings.cybrid_api_url = "https://bank.production.cybrid.app".to_string();
        settings.site_name = " ".to_string();
        assert!(matches!(settings.validate(), Err(ValidationError::Required { .. })));
    }

    #[test]
    fn numeric_inputs_fall_back() {
        assert_eq!(number_or("45", 30), 45);
        assert_eq!(number_or("", 30), 30);
        assert_eq!(number_or("abc", 8), 8);
        assert_eq!(number_or("0", 365), 365);
    }
}
