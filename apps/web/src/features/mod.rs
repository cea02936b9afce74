//! Domain-level frontend features and their API clients. Routes import these
//! modules to keep view code focused, while parsing and validation live in
//! `dashboard_model`.

pub(crate) mod activity;
pub(crate) mod auth;
pub(crate) mod bonds;
pub(crate) mod customers;
pub(crate) mod cybrid;
pub(crate) mod inactivity;
pub(crate) mod ledger;
pub(crate) mod purchases;
pub(crate) mod settings;
