//! Auth feature: login against the admin API, session hydration from
//! browser storage, and the client-side route guard. This module touches
//! security boundaries and must avoid logging the token or the password.
//!
//! The guard is a UX layer only. The edge gate and the backend make the
//! authoritative decisions.

pub(crate) mod client;
mod guards;
pub(crate) mod state;

pub(crate) use guards::RequireRole;
