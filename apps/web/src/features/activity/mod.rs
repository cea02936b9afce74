//! Recent activity feed shown on the dashboard overview.

pub(crate) mod client;
