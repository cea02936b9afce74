use super::{picker::CustomerPicker, resolve_customer, Notice, NoticeBanner};
use crate::{
    components::{Alert, AlertKind, Button, ButtonKind, Modal, INPUT_CLASS, LABEL_CLASS},
    features::{auth::RequireRole, cybrid::client},
    routes::paths::{self, required_role},
};
use dashboard_model::cybrid::{CustomerIdMapping, CybridCustomer, TransferRequest};
use leptos::prelude::*;
use tracing::{info, warn};

#[component]
pub fn BookTransfersPage() -> impl IntoView {
    view! {
        <RequireRole role=required_role(paths::BOOK_TRANSFERS)>
            <BookTransfers />
        </RequireRole>
    }
}

#[component]
fn BookTransfers() -> impl IntoView {
    let notice = RwSignal::new(None::<(AlertKind, String)>);
    let target = RwSignal::new(None::<(CybridCustomer, CustomerIdMapping)>);

    let resolve = Action::new_local(|customer: &CybridCustomer| resolve_customer(customer.clone()));
    let busy = Signal::derive(move || {
        resolve
            .input()
            .with(|input| input.as_ref().and_then(|c| c.user_id.clone()))
    });

    Effect::new(move |_| match resolve.value().get() {
        Some(Ok(resolved)) => target.set(Some(resolved)),
        Some(Err(err)) => {
            warn!("customer id lookup failed: {err}");
            notice.set(Some((AlertKind::Error, format!("Error fetching customer ID: {err}"))));
        }
        None => {}
    });

    view! {
        <div class="space-y-6">
            <div class="space-y-1">
                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Book Transfers"</h1>
                <p class="text-sm text-gray-500 dark:text-gray-400">
                    "Withdraw USD from a customer's fiat account. The source account is resolved by the backend."
                </p>
            </div>

            <NoticeBanner notice=notice />

            <CustomerPicker
                action_label="Transfer"
                on_select=Callback::new(move |customer: CybridCustomer| {
                    notice.set(None);
                    resolve.dispatch(customer);
                })
                busy=busy
            />

            {move || target.get().map(|(customer, mapping)| view! {
                <TransferDialog
                    customer=customer
                    mapping=mapping
                    on_done=Callback::new(move |result: Notice| {
                        target.set(None);
                        notice.set(result);
                    })
                />
            })}
        </div>
    }
}

#[component]
fn TransferDialog(
    customer: CybridCustomer,
    mapping: CustomerIdMapping,
    on_done: Callback<Notice>,
) -> impl IntoView {
    let amount = RwSignal::new(String::new());
    let form_error = RwSignal::new(None::<String>);
    let name = customer.full_name();
    let guid = mapping.cybrid_customer_id.clone();
    let mapping = StoredValue::new(mapping);

    let submit = Action::new_local(|request: &TransferRequest| {
        let request = request.clone();
        async move { client::create_transfer(&request).await }
    });

    Effect::new(move |_| match submit.value().get() {
        Some(Ok(_)) => {
            info!("book transfer initiated");
            on_done.run(Some((AlertKind::Success, "Book transfer initiated successfully!".to_string())));
        }
        Some(Err(err)) => form_error.set(Some(format!("Book transfer failed: {err}"))),
        None => {}
    });

    let on_submit = move |event: leptos::ev::SubmitEvent| {
        event.prevent_default();
        form_error.set(None);
        let request = mapping.with_value(|m| TransferRequest::build(Some(m), &amount.get_untracked()));
        match request {
            Ok(request) => {
                submit.dispatch(request);
            }
            Err(err) => form_error.set(Some(err.to_string())),
        }
    };

    view! {
        <Modal title="Book transfer" on_close=Callback::new(move |()| on_done.run(None))>
            <form class="space-y-5" on:submit=on_submit>
                <div class="text-sm text-gray-700 dark:text-gray-300 space-y-1">
                    <p><strong>"Customer: "</strong>{name}</p>
                    <p><strong>"Cybrid customer: "</strong><span class="font-mono text-xs">{guid}</span></p>
                    <p><strong>"Asset: "</strong>"USD, withdrawal"</p>
                </div>
                <div>
                    <label class=LABEL_CLASS for="transfer_amount">"Amount (USD)"</label>
                    <input
                        id="transfer_amount"
                        type="text"
                        inputmode="decimal"
                        class=INPUT_CLASS
                        placeholder="100.00"
                        prop:value=move || amount.get()
                        on:input=move |event| amount.set(event_target_value(&event))
                    />
                </div>

                {move || form_error.get().map(|message| view! { <Alert kind=AlertKind::Error message=message /> })}

                <div class="flex justify-end gap-3">
                    <Button kind=ButtonKind::Secondary on_click=Callback::new(move |_| on_done.run(None))>
                        "Cancel"
                    </Button>
                    <Button button_type="submit" disabled=submit.pending()>
                        "Submit transfer"
                    </Button>
                </div>
            </form>
        </Modal>
    }
}
