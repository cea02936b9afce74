//! Edge gate rules.
//!
//! The gate is a shallow, pre-render check on request cookies: it confirms
//! that a session *looks* present and well formed. It does not verify token
//! signatures; the backend remains the authority on every API call.

use crate::{cookies::decode_user, redirect::login_redirect, session::AdminUser};
use std::fmt;

pub const HEADER_USER_ID: &str = "x-user-id";
pub const HEADER_USER_EMAIL: &str = "x-user-email";
pub const HEADER_USER_ROLE: &str = "x-user-role";

const PROTECTED_ROOT: &str = "/dashboard";
const BYPASSED_PREFIXES: [&str; 4] = ["/api/", "/pkg/", "/assets/", "/public/"];
const BYPASSED_EXACT: [&str; 3] = ["/api", "/favicon.ico", "/robots.txt"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass {
    /// Always reachable: `/` and the login page.
    Public,
    /// Needs a well-formed session.
    Protected,
    /// Never inspected: API calls and static assets.
    Bypassed,
    /// Not gated.
    Unprotected,
}

#[must_use]
pub fn classify(path: &str) -> PathClass {
    if BYPASSED_EXACT.contains(&path) || BYPASSED_PREFIXES.iter().any(|p| path.starts_with(p)) {
        return PathClass::Bypassed;
    }
    if path == "/" || path == "/login" || path.starts_with("/login/") {
        return PathClass::Public;
    }
    if path == PROTECTED_ROOT
        || path
            .strip_prefix(PROTECTED_ROOT)
            .is_some_and(|rest| rest.starts_with('/'))
    {
        return PathClass::Protected;
    }
    PathClass::Unprotected
}

/// Three non-empty dot-separated segments. Shape only, no signature check.
#[must_use]
pub fn token_has_jwt_shape(token: &str) -> bool {
    let segments: Vec<&str> = token.split('.').collect();
    segments.len() == 3 && segments.iter().all(|segment| !segment.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    MissingCookies,
    MalformedToken,
    MalformedUser,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MissingCookies => "missing session cookies",
            Self::MalformedToken => "malformed token",
            Self::MalformedUser => "malformed user cookie",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Not a protected path; forward untouched.
    PassThrough,
    /// Protected path with a well-formed session.
    Allow(AdminUser),
    Redirect {
        location: String,
        reason: Rejection,
    },
}

/// Decide what to do with a request for `path` given its raw cookie values.
#[must_use]
pub fn evaluate(path: &str, token: Option<&str>, user_cookie: Option<&str>) -> GateDecision {
    if classify(path) != PathClass::Protected {
        return GateDecision::PassThrough;
    }

    let reject = |reason| GateDecision::Redirect {
        location: login_redirect(path),
        reason,
    };

    let token = token.filter(|value| !value.is_empty());
    let user_cookie = user_cookie.filter(|value| !value.is_empty());
    let (Some(token), Some(user_cookie)) = (token, user_cookie) else {
        return reject(Rejection::MissingCookies);
    };

    if !token_has_jwt_shape(token) {
        return reject(Rejection::MalformedToken);
    }

    match decode_user(user_cookie) {
        Some(user) => GateDecision::Allow(user),
        None => reject(Rejection::MalformedUser),
    }
}

/// Identity headers forwarded for an allowed request.
#[must_use]
pub fn identity_headers(user: &AdminUser) -> [(&'static str, String); 3] {
    [
        (HEADER_USER_ID, user.id.clone()),
        (HEADER_USER_EMAIL, user.email.clone()),
        (HEADER_USER_ROLE, user.role.as_str().to_string()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cookies::encode_user, role::Role};

    fn user_cookie() -> String {
        encode_user(&AdminUser {
            id: "9".to_string(),
            email: "desk@borabond.com".to_string(),
            role: Role::Admin,
        })
        .unwrap()
    }

    #[test]
    fn classification() {
        assert_eq!(classify("/"), PathClass::Public);
        assert_eq!(classify("/login"), PathClass::Public);
        assert_eq!(classify("/dashboard"), PathClass::Protected);
        assert_eq!(classify("/dashboard/cybrid"), PathClass::Protected);
        assert_eq!(classify("/dashboardx"), PathClass::Unprotected);
        assert_eq!(classify("/api/auth/login"), PathClass::Bypassed);
        assert_eq!(classify("/pkg/web.wasm"), PathClass::Bypassed);
        assert_eq!(classify("/favicon.ico"), PathClass::Bypassed);
        assert_eq!(classify("/about"), PathClass::Unprotected);
    }

    #[test]
    fn jwt_shape() {
        assert!(token_has_jwt_shape("a.b.c"));
        assert!(!token_has_jwt_shape("a.b"));
        assert!(!token_has_jwt_shape("a..c"));
        assert!(!token_has_jwt_shape("a.b.c.d"));
    }

    #[test]
    fn missing_cookies_redirect_with_return_path() {
        assert_eq!(
            evaluate("/dashboard", None, None),
            GateDecision::Redirect {
                location: "/login?redirect=%2Fdashboard".to_string(),
                reason: Rejection::MissingCookies,
            }
        );
        let cookie = user_cookie();
        assert!(matches!(
            evaluate("/dashboard", Some(""), Some(&cookie)),
            GateDecision::Redirect { reason: Rejection::MissingCookies, .. }
        ));
    }

    #[test]
    fn malformed_inputs_redirect() {
        let cookie = user_cookie();
        assert!(matches!(
            evaluate("/dashboard/bonds", Some("opaque"), Some(&cookie)),
            GateDecision::Redirect { reason: Rejection::MalformedToken, .. }
        ));
        assert!(matches!(
            evaluate("/dashboard/bonds", Some("a.b.c"), Some("%7Bnope")),
            GateDecision::Redirect { reason: Rejection::MalformedUser, .. }
        ));
    }

    #[test]
    fn well_formed_session_is_allowed() {
        let cookie = user_cookie();
        let GateDecision::Allow(user) = evaluate("/dashboard/users", Some("a.b.c"), Some(&cookie))
        else {
            panic!("expected allow");
        };
        let headers = identity_headers(&user);
        assert_eq!(headers[0], (HEADER_USER_ID, "9".to_string()));
        assert_eq!(headers[2], (HEADER_USER_ROLE, "ADMIN".to_string()));
    }

    #[test]
    fn public_and_bypassed_paths_pass() {
        assert_eq!(evaluate("/", None, None), GateDecision::PassThrough);
        assert_eq!(evaluate("/login", None, None), GateDecision::PassThrough);
        assert_eq!(evaluate("/api/bonds", None, None), GateDecision::PassThrough);
    }
}
