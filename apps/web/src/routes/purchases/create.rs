use crate::{
    app_lib::AppError,
    components::{Alert, AlertKind, Button, ButtonKind, Modal, Spinner, INPUT_CLASS, LABEL_CLASS},
    features::{bonds::client as bonds, customers::client as customers, purchases::client},
};
use dashboard_model::{
    bonds::Bond,
    customers::{selectable, Customer},
    format::compact_currency,
    purchases::CreatePurchaseRequest,
};
use leptos::prelude::*;
use tracing::info;

/// Customers and active bonds the form can pick from.
async fn load_options() -> Result<(Vec<Customer>, Vec<Bond>), AppError> {
    let customers = selectable(customers::list_customers().await?);
    let bonds = bonds::list_bonds()
        .await?
        .into_iter()
        .filter(|bond| bond.is_active)
        .collect();
    Ok((customers, bonds))
}

#[component]
pub fn CreatePurchase(on_created: Callback<String>, on_cancel: Callback<()>) -> impl IntoView {
    let options = LocalResource::new(|| async { load_options().await });

    view! {
        <Modal title="New purchase" on_close=on_cancel>
            <Suspense fallback=move || view! { <Spinner /> }>
                {move || match options.get() {
                    None => view! { <Spinner /> }.into_any(),
                    Some(Err(err)) => view! { <Alert kind=AlertKind::Error message=err.to_string() /> }.into_any(),
                    Some(Ok((customers, bonds))) => view! {
                        <PurchaseForm customers=customers bonds=bonds on_created=on_created on_cancel=on_cancel />
                    }.into_any(),
                }}
            </Suspense>
        </Modal>
    }
}

#[component]
fn PurchaseForm(
    customers: Vec<Customer>,
    bonds: Vec<Bond>,
    on_created: Callback<String>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let customer_id = RwSignal::new(String::new());
    let bond_id = RwSignal::new(String::new());
    let amount = RwSignal::new(String::new());
    let form_error = RwSignal::new(None::<String>);

    let customer_options = customers
        .iter()
        .map(|c| (c.user_id.clone(), c.picker_label()))
        .collect::<Vec<_>>();
    let bond_options = bonds
        .iter()
        .map(|b| {
            let label = format!(
                "{} ({} available)",
                b.display_name,
                compact_currency(b.available_amount, &b.currency)
            );
            (b.id.clone(), label)
        })
        .collect::<Vec<_>>();
    let customers = StoredValue::new(customers);
    let bonds = StoredValue::new(bonds);

    let create = Action::new_local(|request: &CreatePurchaseRequest| {
        let request = request.clone();
        async move { client::create_purchase(&request).await }
    });

    Effect::new(move |_| match create.value().get() {
        Some(Ok(message)) => {
            info!("purchase created");
            on_created.run(message.unwrap_or_else(|| "Purchase created.".to_string()));
        }
        Some(Err(err)) => form_error.set(Some(err.to_string())),
        None => {}
    });

    let on_submit = move |event: leptos::ev::SubmitEvent| {
        event.prevent_default();
        form_error.set(None);
        let request = customers.with_value(|customers| {
            bonds.with_value(|bonds| {
                let customer_id = customer_id.get_untracked();
                let bond_id = bond_id.get_untracked();
                CreatePurchaseRequest::build(
                    customers.iter().find(|c| c.user_id == customer_id),
                    bonds.iter().find(|b| b.id == bond_id),
                    &amount.get_untracked(),
                )
            })
        });
        match request {
            Ok(request) => {
                create.dispatch(request);
            }
            Err(err) => form_error.set(Some(err.to_string())),
        }
    };

    view! {
        <form class="space-y-5" on:submit=on_submit>
            <div>
                <label class=LABEL_CLASS for="purchase_customer">"Customer"</label>
                <select
                    id="purchase_customer"
                    class=INPUT_CLASS
                    on:change=move |event| customer_id.set(event_target_value(&event))
                >
                    <option value="">"Select a customer"</option>
                    {customer_options
                        .into_iter()
                        .map(|(id, label)| view! { <option value=id>{label}</option> })
                        .collect_view()}
                </select>
            </div>
            <div>
                <label class=LABEL_CLASS for="purchase_bond">"Bond"</label>
                <select
                    id="purchase_bond"
                    class=INPUT_CLASS
                    on:change=move |event| bond_id.set(event_target_value(&event))
                >
                    <option value="">"Select a bond"</option>
                    {bond_options
                        .into_iter()
                        .map(|(id, label)| view! { <option value=id>{label}</option> })
                        .collect_view()}
                </select>
            </div>
            <div>
                <label class=LABEL_CLASS for="purchase_amount">"Amount"</label>
                <input
                    id="purchase_amount"
                    type="text"
                    inputmode="decimal"
                    class=INPUT_CLASS
                    placeholder="10,000"
                    prop:value=move || amount.get()
                    on:input=move |event| amount.set(event_target_value(&event))
                />
            </div>

            {move || form_error.get().map(|message| view! { <Alert kind=AlertKind::Error message=message /> })}

            <div class="flex justify-end gap-3">
                <Button kind=ButtonKind::Secondary on_click=Callback::new(move |_| on_cancel.run(()))>
                    "Cancel"
                </Button>
                <Button button_type="submit" disabled=create.pending()>
                    "Create purchase"
                </Button>
            </div>
        </form>
    }
}
