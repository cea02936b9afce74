//! Cookie names and codecs shared by the browser and the edge gate.
//!
//! The user record travels as URL-encoded JSON so that it survives cookie
//! value restrictions; the token is stored as-is.

use crate::{error::StoreError, session::AdminUser};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

pub const TOKEN_KEY: &str = "adminToken";
pub const USER_KEY: &str = "adminUser";

pub const DEFAULT_MAX_AGE_SECONDS: u64 = 7 * 24 * 60 * 60;

/// Characters left untouched by `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[must_use]
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

#[must_use]
pub fn decode_component(value: &str) -> Option<String> {
    percent_decode_str(value)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

/// Encode the user record for the `adminUser` cookie.
///
/// # Errors
/// Returns an error if the user cannot be serialized.
pub fn encode_user(user: &AdminUser) -> Result<String, StoreError> {
    let json = serde_json::to_string(user)?;
    Ok(encode_component(&json))
}

/// Decode an `adminUser` cookie value; `None` for anything malformed or
/// incomplete.
#[must_use]
pub fn decode_user(raw: &str) -> Option<AdminUser> {
    let json = decode_component(raw)?;
    AdminUser::from_json(&json)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SameSite {
    Lax,
    Strict,
}

impl SameSite {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Lax => "Lax",
            Self::Strict => "Strict",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CookiePolicy {
    pub max_age_seconds: u64,
    pub secure: bool,
    pub same_site: SameSite,
}

impl Default for CookiePolicy {
    fn default() -> Self {
        Self {
            max_age_seconds: DEFAULT_MAX_AGE_SECONDS,
            secure: false,
            same_site: SameSite::Lax,
        }
    }
}

impl CookiePolicy {
    /// `Secure; SameSite=Strict`, for pages served over HTTPS.
    #[must_use]
    pub fn hardened() -> Self {
        Self {
            secure: true,
            same_site: SameSite::Strict,
            ..Self::default()
        }
    }

    /// Pick the hardened policy when the page itself is served over HTTPS.
    #[must_use]
    pub fn for_protocol(protocol: &str) -> Self {
        if protocol.trim_end_matches(':').eq_ignore_ascii_case("https") {
            Self::hardened()
        } else {
            Self::default()
        }
    }
}

/// Build a `name=value; ...` cookie string.
#[must_use]
pub fn set_cookie(name: &str, value: &str, policy: CookiePolicy) -> String {
    let mut cookie = format!(
        "{name}={value}; Path=/; Max-Age={}; SameSite={}",
        policy.max_age_seconds,
        policy.same_site.as_str()
    );
    if policy.secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Build an expiring cookie string that removes `name`.
#[must_use]
pub fn clear_cookie(name: &str) -> String {
    format!("{name}=; Path=/; Max-Age=0; Expires=Thu, 01 Jan 1970 00:00:00 GMT")
}

/// Find a cookie value in a `Cookie` header or `document.cookie` string.
/// Empty values count as absent.
#[must_use]
pub fn find_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    fn user() -> AdminUser {
        AdminUser {
            id: "42".to_string(),
            email: "ops+admin@borabond.com".to_string(),
            role: Role::Admin,
        }
    }

    #[test]
    fn user_cookie_matches_encode_uri_component() {
        let encoded = encode_user(&user()).unwrap();
        assert!(encoded.starts_with("%7B%22id%22%3A%2242%22"));
        assert!(encoded.contains("ops%2Badmin%40borabond.com"));
        assert_eq!(decode_user(&encoded), Some(user()));
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode_user("%7Bnot-json").is_none());
        assert!(decode_user("%FF%FE").is_none());
        assert!(decode_user(&encode_component(r#"{"id":"1","email":"a@b.c"}"#)).is_none());
    }

    #[test]
    fn cookie_strings() {
        let plain = set_cookie(TOKEN_KEY, "a.b.c", CookiePolicy::default());
        assert_eq!(plain, "adminToken=a.b.c; Path=/; Max-Age=604800; SameSite=Lax");

        let hardened = set_cookie(TOKEN_KEY, "a.b.c", CookiePolicy::hardened());
        assert!(hardened.ends_with("SameSite=Strict; Secure"));

        assert!(clear_cookie(USER_KEY).starts_with("adminUser=; Path=/; Max-Age=0"));
    }

    #[test]
    fn policy_follows_protocol() {
        assert_eq!(CookiePolicy::for_protocol("https:"), CookiePolicy::hardened());
        assert_eq!(CookiePolicy::for_protocol("http:"), CookiePolicy::default());
    }

    #[test]
    fn finds_cookie_in_header() {
        let header = "theme=dark; adminToken=a.b.c; adminUser=";
        assert_eq!(find_cookie(header, TOKEN_KEY), Some("a.b.c"));
        assert_eq!(find_cookie(header, USER_KEY), None);
        assert_eq!(find_cookie(header, "missing"), None);
    }
}
