use crate::role::Role;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Admin identity as returned by the backend login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: String,
    pub email: String,
    pub role: Role,
}

impl AdminUser {
    /// A user record is usable only when both identifiers are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.id.trim().is_empty() && !self.email.trim().is_empty()
    }

    /// Parse a stored user record, rejecting incomplete ones.
    #[must_use]
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str::<Self>(raw)
            .ok()
            .filter(Self::is_complete)
    }
}

/// Token and user, always held together.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    user: AdminUser,
}

impl Session {
    /// Returns `None` for an empty token or an incomplete user.
    #[must_use]
    pub fn new(token: impl Into<String>, user: AdminUser) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() || !user.is_complete() {
            return None;
        }
        Some(Self { token, user })
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub const fn user(&self) -> &AdminUser {
        &self.user
    }

    #[must_use]
    pub const fn role(&self) -> Role {
        self.user.role
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

/// `data` payload of a successful `POST /api/admin/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub user: AdminUser,
    pub token: String,
}

#[derive(Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl fmt::Debug for LoginRequest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> AdminUser {
        AdminUser {
            id: "u-1".to_string(),
            email: "ops@borabond.com".to_string(),
            role: Role::Admin,
        }
    }

    #[test]
    fn debug_hides_token() {
        let session = Session::new("aaa.bbb.ccc", admin()).unwrap();
        let printed = format!("{session:?}");
        assert!(!printed.contains("aaa.bbb.ccc"));
        assert!(printed.contains("[REDACTED]"));
        assert!(printed.contains("ops@borabond.com"));
    }

    #[test]
    fn rejects_partial_sessions() {
        assert!(Session::new("", admin()).is_none());
        let mut user = admin();
        user.email = " ".to_string();
        assert!(Session::new("t", user).is_none());
    }

    #[test]
    fn parses_stored_user() {
        let raw = r#"{"id":"u-1","email":"ops@borabond.com","role":"SUPER_ADMIN"}"#;
        let user = AdminUser::from_json(raw).unwrap();
        assert_eq!(user.role, Role::SuperAdmin);

        assert!(AdminUser::from_json(r#"{"id":"","email":"x@y.z","role":"USER"}"#).is_none());
        assert!(AdminUser::from_json(r#"{"id":"1","email":"x@y.z","role":"ROOT"}"#).is_none());
        assert!(AdminUser::from_json("not json").is_none());
    }

    #[test]
    fn login_request_debug_hides_password() {
        let request = LoginRequest {
            email: "ops@borabond.com",
            password: "hunter2",
        };
        assert!(!format!("{request:?}").contains("hunter2"));
    }
}
