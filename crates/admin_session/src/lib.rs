//! # Admin session primitives
//!
//! Shared by the edge server (`borabond-admin`) and the browser dashboard
//! (`apps/web`). Everything here is plain data and pure functions, so it
//! builds for both native targets and `wasm32-unknown-unknown`.
//!
//! ## Session model
//!
//! A session is a bearer token plus the admin user it was issued for. The two
//! are always written and cleared together; a reader that finds only one of
//! them treats the session as absent and purges the remnant.
//!
//! ## Authorization
//!
//! Roles form a strict hierarchy (`USER < ADMIN < SUPER_ADMIN`) and every
//! check, whether in the edge gate, the route guard or a page, goes through
//! [`role_satisfies`].
//!
//! ## Inactivity
//!
//! [`InactivityMonitor`] is a clock-agnostic state machine: the caller feeds
//! it millisecond timestamps and reacts to the transitions it reports.

pub mod api;
pub mod cookies;
pub mod error;
pub mod gate;
pub mod guard;
pub mod inactivity;
pub mod redirect;
pub mod role;
pub mod session;
pub mod store;

pub use error::{AppError, StoreError};
pub use guard::{DenyReason, GuardState, RedirectLatch};
pub use inactivity::{InactivityConfig, InactivityMonitor, Phase, Transition};
pub use redirect::LogoutReason;
pub use role::{role_satisfies, Role};
pub use session::{AdminUser, Session};
pub use store::{SessionBackend, SessionStore};
