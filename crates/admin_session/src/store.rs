//! Session persistence across two backends.
//!
//! The browser keeps the session both in cookies (so the edge gate can see
//! it) and in persistent storage. Token and user are written and removed as
//! a pair in both; a pair that is only half present is never trusted.

use crate::{
    cookies::{TOKEN_KEY, USER_KEY},
    error::StoreError,
    redirect::{is_login_path, logout_destination, LogoutReason},
    session::{AdminUser, Session},
};
use std::{cell::RefCell, collections::BTreeMap};
use tracing::{debug, warn};

/// Key/value storage for session entries. Values are opaque strings; the
/// backend owns any transport encoding it needs.
pub trait SessionBackend {
    fn name(&self) -> &'static str;

    fn read(&self, key: &'static str) -> Option<String>;

    /// # Errors
    /// Returns an error if the value could not be stored.
    fn write(&self, key: &'static str, value: &str) -> Result<(), StoreError>;

    /// # Errors
    /// Returns an error if the value could not be removed.
    fn remove(&self, key: &'static str) -> Result<(), StoreError>;
}

#[derive(Debug, PartialEq, Eq)]
enum Slot {
    Empty,
    Partial,
    Complete(Session),
}

fn read_slot<B: SessionBackend>(backend: &B) -> Slot {
    let token = backend.read(TOKEN_KEY).filter(|value| !value.is_empty());
    let user = backend.read(USER_KEY).filter(|value| !value.is_empty());

    match (token, user) {
        (None, None) => Slot::Empty,
        (Some(token), Some(user)) => AdminUser::from_json(&user)
            .and_then(|user| Session::new(token, user))
            .map_or(Slot::Partial, Slot::Complete),
        _ => Slot::Partial,
    }
}

fn clear_backend<B: SessionBackend>(backend: &B) -> Result<(), StoreError> {
    let token = backend.remove(TOKEN_KEY);
    let user = backend.remove(USER_KEY);
    token.and(user)
}

fn write_backend<B: SessionBackend>(backend: &B, token: &str, user: &str) -> Result<(), StoreError> {
    backend.write(TOKEN_KEY, token)?;
    backend.write(USER_KEY, user)
}

/// Cookie-first session store with a persistent fallback.
pub struct SessionStore<C, P> {
    cookies: C,
    persistent: P,
}

impl<C: SessionBackend, P: SessionBackend> SessionStore<C, P> {
    pub const fn new(cookies: C, persistent: P) -> Self {
        Self {
            cookies,
            persistent,
        }
    }

    /// Read the session, preferring cookies. Half-written remnants found on
    /// the way are purged. A session recovered from persistent storage is
    /// copied back into cookies.
    pub fn load(&self) -> Option<Session> {
        match read_slot(&self.cookies) {
            Slot::Complete(session) => return Some(session),
            Slot::Partial => {
                warn!(backend = self.cookies.name(), "discarding partial session");
                if let Err(err) = clear_backend(&self.cookies) {
                    warn!(backend = self.cookies.name(), "failed to purge partial session: {err}");
                }
            }
            Slot::Empty => {}
        }

        match read_slot(&self.persistent) {
            Slot::Complete(session) => {
                debug!(backend = self.persistent.name(), "session restored");
                if let Err(err) = self.resync_cookies(&session) {
                    warn!(backend = self.cookies.name(), "failed to restore session cookies: {err}");
                }
                Some(session)
            }
            Slot::Partial => {
                warn!(backend = self.persistent.name(), "discarding partial session");
                if let Err(err) = clear_backend(&self.persistent) {
                    warn!(backend = self.persistent.name(), "failed to purge partial session: {err}");
                }
                None
            }
            Slot::Empty => None,
        }
    }

    /// Write the session to both backends. If any write fails everything is
    /// rolled back, so no backend is left holding half a session.
    ///
    /// # Errors
    /// Returns the first write error after rolling back.
    pub fn save(&self, session: &Session) -> Result<(), StoreError> {
        let user = serde_json::to_string(session.user())?;

        let written = write_backend(&self.persistent, session.token(), &user)
            .and_then(|()| write_backend(&self.cookies, session.token(), &user));

        if let Err(err) = written {
            warn!("session write failed, rolling back: {err}");
            if let Err(rollback) = self.clear() {
                warn!("session rollback incomplete: {rollback}");
            }
            return Err(err);
        }

        debug!(user_id = %session.user().id, "session saved");
        Ok(())
    }

    /// Remove the session from every backend. All removals are attempted
    /// even if one fails.
    ///
    /// # Errors
    /// Returns the first removal error.
    pub fn clear(&self) -> Result<(), StoreError> {
        let cookies = clear_backend(&self.cookies);
        let persistent = clear_backend(&self.persistent);
        cookies.and(persistent)
    }

    /// Drop a session the backend refused. Returns the login page to send
    /// the browser to, or `None` when `current_path` already is the login
    /// page. A failed removal is logged; the redirect still happens.
    pub fn end_rejected(&self, current_path: &str) -> Option<String> {
        if let Err(err) = self.clear() {
            warn!("failed to clear rejected session: {err}");
        }
        (!is_login_path(current_path)).then(|| logout_destination(Some(LogoutReason::Unauthorized)))
    }

    fn resync_cookies(&self, session: &Session) -> Result<(), StoreError> {
        let user = serde_json::to_string(session.user())?;
        write_backend(&self.cookies, session.token(), &user)
    }

    pub const fn cookies(&self) -> &C {
        &self.cookies
    }

    pub const fn persistent(&self) -> &P {
        &self.persistent
    }
}

/// In-memory backend, used off-browser and in tests.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    name: &'static str,
    entries: RefCell<BTreeMap<&'static str, String>>,
    fail_writes_for: Option<&'static str>,
}

impl MemoryBackend {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// A backend whose writes to `key` always fail.
    #[must_use]
    pub fn failing_on(name: &'static str, key: &'static str) -> Self {
        Self {
            name,
            fail_writes_for: Some(key),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl SessionBackend for MemoryBackend {
    fn name(&self) -> &'static str {
        self.name
    }

    fn read(&self, key: &'static str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn write(&self, key: &'static str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes_for == Some(key) {
            return Err(StoreError::Write {
                key,
                reason: "quota exceeded".to_string(),
            });
        }
        self.entries.borrow_mut().insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: &'static str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    fn session() -> Session {
        Session::new(
            "header.payload.signature",
            AdminUser {
                id: "7".to_string(),
                email: "admin@borabond.com".to_string(),
                role: Role::SuperAdmin,
            },
        )
        .unwrap()
    }

    fn store() -> SessionStore<MemoryBackend, MemoryBackend> {
        SessionStore::new(MemoryBackend::new("cookie"), MemoryBackend::new("local"))
    }

    #[test]
    fn save_then_load_round_trips() {
        let store = store();
        store.save(&session()).unwrap();
        assert_eq!(store.load(), Some(session()));
        assert!(!store.cookies().is_empty());
        assert!(!store.persistent().is_empty());
    }

    #[test]
    fn clear_removes_everything() {
        let store = store();
        store.save(&session()).unwrap();
        store.clear().unwrap();
        assert!(store.cookies().is_empty());
        assert!(store.persistent().is_empty());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn token_without_user_is_logged_out_and_purged() {
        let store = store();
        store.persistent().write(TOKEN_KEY, "a.b.c").unwrap();
        assert_eq!(store.load(), None);
        assert!(store.persistent().is_empty());
    }

    #[test]
    fn user_without_token_is_logged_out_and_purged() {
        let store = store();
        store
            .cookies()
            .write(USER_KEY, r#"{"id":"1","email":"a@b.c","role":"USER"}"#)
            .unwrap();
        assert_eq!(store.load(), None);
        assert!(store.cookies().is_empty());
    }

    #[test]
    fn unparseable_user_is_partial() {
        let store = store();
        store.persistent().write(TOKEN_KEY, "a.b.c").unwrap();
        store.persistent().write(USER_KEY, "{broken").unwrap();
        assert_eq!(store.load(), None);
        assert!(store.persistent().is_empty());
    }

    #[test]
    fn falls_back_to_persistent_and_restores_cookies() {
        let store = store();
        let user = serde_json::to_string(session().user()).unwrap();
        store.persistent().write(TOKEN_KEY, session().token()).unwrap();
        store.persistent().write(USER_KEY, &user).unwrap();

        assert_eq!(store.load(), Some(session()));
        assert_eq!(store.cookies().read(TOKEN_KEY).as_deref(), Some(session().token()));
    }

    #[test]
    fn rejected_session_is_cleared_and_sent_to_login() {
        let store = store();
        store.save(&session()).unwrap();

        assert_eq!(
            store.end_rejected("/dashboard/bonds").as_deref(),
            Some("/login?message=unauthorized")
        );
        assert!(store.cookies().is_empty());
        assert!(store.persistent().is_empty());
        assert_eq!(store.load(), None);
    }

    #[test]
    fn rejection_on_login_page_stays_put() {
        let store = store();
        store.save(&session()).unwrap();

        assert_eq!(store.end_rejected("/login"), None);
        assert!(store.cookies().is_empty());
        assert!(store.persistent().is_empty());
    }

    #[test]
    fn partial_cookie_falls_through_to_persistent() {
        let store = store();
        store.save(&session()).unwrap();
        store.cookies().remove(USER_KEY).unwrap();

        assert_eq!(store.load(), Some(session()));
    }

    #[test]
    fn failed_save_rolls_back_both_backends() {
        let store = SessionStore::new(
            MemoryBackend::failing_on("cookie", USER_KEY),
            MemoryBackend::new("local"),
        );
        assert!(store.save(&session()).is_err());
        assert!(store.cookies().is_empty());
        assert!(store.persistent().is_empty());
        assert_eq!(store.load(), None);
    }
}
