//! Shared frontend plumbing: the API transport, runtime configuration,
//! browser storage backends, console logging and build metadata.
//!
//! ## Session flow
//!
//! 1. **Login:** `POST /api/admin/login` returns `{user, token}`. The pair is
//!    written to cookies (read by the edge gate) and to local storage.
//! 2. **Requests:** every call attaches `Authorization: Bearer <token>` when a
//!    session exists. A 401 clears both stores and reloads `/login`.
//! 3. **Hydration:** on load the session is read back from cookies first, then
//!    local storage, without a network round-trip unless revalidation is
//!    configured.
//!
//! Callers must never log the token or the password.

pub(crate) mod api;
pub(crate) mod build_info;
pub(crate) mod config;
pub(crate) mod logging;
pub(crate) mod storage;

pub(crate) use admin_session::AppError;

/// Milliseconds since the Unix epoch, from the browser clock.
pub(crate) fn now_ms() -> u64 {
    let now = js_sys::Date::now();
    if now.is_finite() && now > 0.0 {
        now as u64
    } else {
        0
    }
}

/// Today as `YYYY-MM-DD` (UTC).
pub(crate) fn today_iso() -> String {
    chrono::Utc::now().date_naive().to_string()
}
