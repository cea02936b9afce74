//! Cybrid book transfers and trades. Customer ids are looked up once per
//! customer and cached in local storage.

pub(crate) mod cache;
pub(crate) mod client;
