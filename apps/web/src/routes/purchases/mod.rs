//! Bond purchases: list with filters and totals, the next coupon payment,
//! and the create-purchase form.

mod create;
mod list;

pub(crate) use list::PurchasesPage;
