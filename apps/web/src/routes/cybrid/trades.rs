use super::{picker::CustomerPicker, resolve_customer, Notice, NoticeBanner};
use crate::{
    components::{Alert, AlertKind, Button, ButtonKind, Modal, INPUT_CLASS, LABEL_CLASS},
    features::{
        auth::RequireRole,
        cybrid::{cache, client},
    },
    routes::paths::{self, required_role},
};
use dashboard_model::cybrid::{
    CustomerIdMapping, CybridCustomer, FinalizeTradeRequest, TradeRequest, TRADE_SYMBOL,
};
use leptos::prelude::*;
use tracing::{info, warn};

#[component]
pub fn CybridPage() -> impl IntoView {
    view! {
        <RequireRole role=required_role(paths::CYBRID)>
            <Trades />
        </RequireRole>
    }
}

#[component]
fn Trades() -> impl IntoView {
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

    // Finalizing never looks the id up; a trade must have cached it first.
    let finalize = Action::new_local(|customer: &CybridCustomer| {
        let request = FinalizeTradeRequest::build(customer, &cache::load());
        let name = customer.short_name().to_string();
        async move {
            let request = request?;
            client::finalize_trade(&request).await?;
            Ok::<_, crate::app_lib::AppError>(name)
        }
    });

    Effect::new(move |_| match finalize.value().get() {
        Some(Ok(name)) => {
            info!("trade finalized");
            notice.set(Some((AlertKind::Success, format!("Trade finalized for {name}"))));
        }
        Some(Err(err)) => notice.set(Some((AlertKind::Error, format!("Finalize trade failed: {err}")))),
        None => {}
    });

    view! {
        <div class="space-y-6">
            <div class="space-y-1">
                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Cybrid Trades"</h1>
                <p class="text-sm text-gray-500 dark:text-gray-400">
                    "Buy USDC for a customer, then finalize the trade once it is quoted."
                </p>
            </div>

            <NoticeBanner notice=notice />

            <CustomerPicker
                action_label="Initiate trade"
                on_select=Callback::new(move |customer: CybridCustomer| {
                    notice.set(None);
                    resolve.dispatch(customer);
                })
                on_finalize=Callback::new(move |customer: CybridCustomer| {
                    notice.set(None);
                    finalize.dispatch(customer);
                })
                busy=busy
            />

            {move || target.get().map(|(customer, mapping)| view! {
                <TradeDialog
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
fn TradeDialog(
    customer: CybridCustomer,
    mapping: CustomerIdMapping,
    on_done: Callback<Notice>,
) -> impl IntoView {
    let amount = RwSignal::new(String::new());
    let form_error = RwSignal::new(None::<String>);
    let name = customer.full_name();
    let guid = mapping.cybrid_customer_id.clone();
    let mapping = StoredValue::new(mapping);

    let submit = Action::new_local(|request: &TradeRequest| {
        let request = request.clone();
        async move { client::create_trade(&request).await }
    });

    Effect::new(move |_| match submit.value().get() {
        Some(Ok(_)) => {
            info!("trade initiated");
            on_done.run(Some((AlertKind::Success, "Trade initiated successfully!".to_string())));
        }
        Some(Err(err)) => form_error.set(Some(format!("Trade failed: {err}"))),
        None => {}
    });

    let on_submit = move |event: leptos::ev::SubmitEvent| {
        event.prevent_default();
        form_error.set(None);
        let request = mapping.with_value(|m| TradeRequest::build(Some(m), &amount.get_untracked()));
        match request {
            Ok(request) => {
                submit.dispatch(request);
            }
            Err(err) => form_error.set(Some(err.to_string())),
        }
    };

    view! {
        <Modal title="Initiate trade" on_close=Callback::new(move |()| on_done.run(None))>
            <form class="space-y-5" on:submit=on_submit>
                <div class="text-sm text-gray-700 dark:text-gray-300 space-y-1">
                    <p><strong>"Customer: "</strong>{name}</p>
                    <p><strong>"Cybrid customer: "</strong><span class="font-mono text-xs">{guid}</span></p>
                    <p><strong>"Symbol: "</strong>{TRADE_SYMBOL}", buy"</p>
                </div>
                <div>
                    <label class=LABEL_CLASS for="trade_amount">"Amount (USD)"</label>
                    <input
                        id="trade_amount"
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
                        "Initiate trade"
                    </Button>
                </div>
            </form>
        </Modal>
    }
}
