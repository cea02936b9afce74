//! Build-time configuration with an optional runtime override. The runtime
//! config is read from `window.BORABOND_CONFIG` (if present) so a static
//! deployment can point at another backend without rebuilding.
//! Configuration values are public; do not store secrets here.

use admin_session::{
    api::{normalize_base_url, DEFAULT_API_URL, DEFAULT_TIMEOUT_MS},
    inactivity::{DEFAULT_TIMEOUT_MS as DEFAULT_IDLE_MS, DEFAULT_WARNING_MS},
    InactivityConfig,
};
use tracing::warn;

/// What to do with a session restored from storage on page load.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HydrationPolicy {
    /// Use the stored session as-is.
    #[default]
    Trust,
    /// Ask the backend whether the stored token is still valid.
    Revalidate,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_ms: u32,
    pub session_timeout_minutes: u64,
    pub warning_minutes: u64,
    pub revalidate_on_load: bool,
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime overrides.
    pub fn load() -> Self {
        let api_base_url = option_env!("BORABOND_API_URL")
            .or(option_env!("NEXT_PUBLIC_API_URL"))
            .unwrap_or(DEFAULT_API_URL);

        let mut config = Self {
            api_base_url: api_base_url.to_string(),
            request_timeout_ms: parse_or(option_env!("BORABOND_REQUEST_TIMEOUT_MS"), DEFAULT_TIMEOUT_MS),
            session_timeout_minutes: parse_or(
                option_env!("BORABOND_SESSION_TIMEOUT_MINUTES"),
                DEFAULT_IDLE_MS / 60_000,
            ),
            warning_minutes: parse_or(
                option_env!("BORABOND_WARNING_MINUTES"),
                DEFAULT_WARNING_MS / 60_000,
            ),
            revalidate_on_load: parse_flag(option_env!("BORABOND_REVALIDATE_ON_LOAD")),
        };

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        config.api_base_url = normalize_base_url(&config.api_base_url).unwrap_or_else(|err| {
            warn!("{err}; falling back to {DEFAULT_API_URL}");
            DEFAULT_API_URL.to_string()
        });
        config
    }

    /// Idle timeout settings; an inconsistent pair falls back to the defaults.
    pub fn inactivity(&self) -> InactivityConfig {
        InactivityConfig::from_minutes(self.session_timeout_minutes, self.warning_minutes)
            .unwrap_or_else(|err| {
                warn!("{err}; using default inactivity timeout");
                InactivityConfig::default()
            })
    }

    pub fn hydration_policy(&self) -> HydrationPolicy {
        if self.revalidate_on_load {
            HydrationPolicy::Revalidate
        } else {
            HydrationPolicy::Trust
        }
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<&str>, default: T) -> T {
    value
        .and_then(normalize_runtime_value)
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn parse_flag(value: Option<&str>) -> bool {
    value
        .and_then(normalize_runtime_value)
        .is_some_and(|value| matches!(value.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

#[derive(Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
    request_timeout_ms: Option<String>,
    session_timeout_minutes: Option<String>,
    warning_minutes: Option<String>,
    revalidate_on_load: Option<String>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.request_timeout_ms.as_deref() {
        config.request_timeout_ms = parse_or(Some(value), config.request_timeout_ms);
    }
    if let Some(value) = runtime.session_timeout_minutes.as_deref() {
        config.session_timeout_minutes = parse_or(Some(value), config.session_timeout_minutes);
    }
    if let Some(value) = runtime.warning_minutes.as_deref() {
        config.warning_minutes = parse_or(Some(value), config.warning_minutes);
    }
    if let Some(value) = runtime.revalidate_on_load.as_deref() {
        config.revalidate_on_load = parse_flag(Some(value));
    }
}

fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("BORABOND_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        api_base_url: read_runtime_value(&object, "api_base_url"),
        request_timeout_ms: read_runtime_value(&object, "request_timeout_ms"),
        session_timeout_minutes: read_runtime_value(&object, "session_timeout_minutes"),
        warning_minutes: read_runtime_value(&object, "warning_minutes"),
        revalidate_on_load: read_runtime_value(&object, "revalidate_on_load"),
    })
}

/// Strings, numbers and booleans are all accepted.
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key)).ok()?;
    let text = value
        .as_string()
        .or_else(|| value.as_f64().map(|number| number.to_string()))
        .or_else(|| value.as_bool().map(|flag| flag.to_string()))?;
    normalize_runtime_value(&text)
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{apply_runtime_overrides, normalize_runtime_value, parse_flag, AppConfig, RuntimeConfig};

    fn config() -> AppConfig {
        AppConfig {
            api_base_url: "https://api.default".to_string(),
            request_timeout_ms: 30_000,
            session_timeout_minutes: 20,
            warning_minutes: 2,
            revalidate_on_load: false,
        }
    }

    #[test]
    fn normalize_runtime_value_trims_and_rejects_empty() {
        assert_eq!(normalize_runtime_value(""), None);
        assert_eq!(normalize_runtime_value("   "), None);
        assert_eq!(
            normalize_runtime_value("  https://api.borabond.com "),
            Some("https://api.borabond.com".to_string())
        );
    }

    #[test]
    fn apply_runtime_overrides_ignores_unparseable_values() {
        let mut config = config();
        let runtime = RuntimeConfig {
            session_timeout_minutes: normalize_runtime_value("soon"),
            ..RuntimeConfig::default()
        };

        apply_runtime_overrides(&mut config, runtime);

        assert_eq!(config.api_base_url, "https://api.default");
        assert_eq!(config.session_timeout_minutes, 20);
    }

    #[test]
    fn apply_runtime_overrides_overwrites_when_present() {
        let mut config = config();
        let runtime = RuntimeConfig {
            api_base_url: normalize_runtime_value("https://api.override"),
            request_timeout_ms: normalize_runtime_value("5000"),
            session_timeout_minutes: normalize_runtime_value("45"),
            warning_minutes: normalize_runtime_value("5"),
            revalidate_on_load: normalize_runtime_value("true"),
        };

        apply_runtime_overrides(&mut config, runtime);

        assert_eq!(config.api_base_url, "https://api.override");
        assert_eq!(config.request_timeout_ms, 5000);
        assert_eq!(config.session_timeout_minutes, 45);
        assert_eq!(config.warning_minutes, 5);
        assert!(config.revalidate_on_load);
        assert!(!parse_flag(Some("no")));
    }
}
