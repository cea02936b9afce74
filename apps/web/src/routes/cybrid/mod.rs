//! Cybrid operations: USD book transfers and USDC trades for a customer.
//! Both resolve the customer's Cybrid id first, cached locally per user.

mod picker;
mod trades;
mod transfers;

pub(crate) use trades::CybridPage;
pub(crate) use transfers::BookTransfersPage;

use crate::{
    app_lib::AppError,
    components::{Alert, AlertKind},
    features::cybrid::cache,
};
use dashboard_model::cybrid::{CustomerIdMapping, CybridCustomer};
use leptos::prelude::*;

/// Outcome shown above the customer list after an operation.
type Notice = Option<(AlertKind, String)>;

#[component]
fn NoticeBanner(notice: RwSignal<Notice>) -> impl IntoView {
    move || notice.get().map(|(kind, message)| view! { <Alert kind=kind message=message /> })
}

async fn resolve_customer(
    customer: CybridCustomer,
) -> Result<(CybridCustomer, CustomerIdMapping), AppError> {
    let user_id = customer.require_user_id()?.to_string();
    let mapping = cache::resolve(&user_id).await?;
    Ok((customer, mapping))
}
