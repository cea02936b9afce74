use crate::{
    components::{ErrorPanel, Spinner, CARD_CLASS, INPUT_CLASS, TD_CLASS, TH_CLASS},
    features::cybrid::client,
};
use dashboard_model::{
    cybrid::{search, CybridCustomer},
    format::{group_thousands, short_date},
};
use leptos::prelude::*;

/// Searchable customer table. `on_select` starts the page's primary
/// operation; `on_finalize`, when given, adds a second row action.
#[component]
pub fn CustomerPicker(
    action_label: &'static str,
    on_select: Callback<CybridCustomer>,
    #[prop(optional)] on_finalize: Option<Callback<CybridCustomer>>,
    /// `user_id` of the row with a request in flight.
    #[prop(into)]
    busy: Signal<Option<String>>,
) -> impl IntoView {
    let customers = LocalResource::new(|| async { client::list_customers().await });
    let term = RwSignal::new(String::new());

    view! {
        <input
            type="search"
            class=INPUT_CLASS
            placeholder="Search name, email or user id"
            on:input=move |event| term.set(event_target_value(&event))
        />
        <Suspense fallback=move || view! { <Spinner /> }>
            {move || match customers.get() {
                None => view! { <Spinner /> }.into_any(),
                Some(Err(err)) => view! {
                    <ErrorPanel error=err on_retry=Callback::new(move |()| customers.refetch()) />
                }.into_any(),
                Some(Ok(list)) => {
                    let rows = term.with(|term| search(&list, term).into_iter().cloned().collect::<Vec<_>>());
                    view! {
                        <div class=CARD_CLASS>
                            <table class="min-w-full divide-y divide-gray-200 dark:divide-gray-700">
                                <thead class="bg-gray-50 dark:bg-gray-900/50">
                                    <tr>
                                        <th class=TH_CLASS>"Customer"</th>
                                        <th class=TH_CLASS>"Verification"</th>
                                        <th class=TH_CLASS>"Bonds"</th>
                                        <th class=TH_CLASS>"Value"</th>
                                        <th class=TH_CLASS>"Joined"</th>
                                        <th class=format!("{TH_CLASS} text-right")>"Actions"</th>
                                    </tr>
                                </thead>
                                <tbody class="divide-y divide-gray-200 dark:divide-gray-700">
                                    {if rows.is_empty() {
                                        view! {
                                            <tr>
                                                <td colspan="6" class="px-6 py-12 text-center text-sm text-gray-500 dark:text-gray-400">
                                                    "No customers found."
                                                </td>
                                            </tr>
                                        }.into_any()
                                    } else {
                                        rows.into_iter().map(|customer| view! {
                                            <PickerRow
                                                customer=customer
                                                action_label=action_label
                                                on_select=on_select
                                                on_finalize=on_finalize
                                                busy=busy
                                            />
                                        }).collect_view().into_any()
                                    }}
                                </tbody>
                            </table>
                        </div>
                    }.into_any()
                }
            }}
        </Suspense>
    }
}

#[component]
fn PickerRow(
    customer: CybridCustomer,
    action_label: &'static str,
    on_select: Callback<CybridCustomer>,
    on_finalize: Option<Callback<CybridCustomer>>,
    busy: Signal<Option<String>>,
) -> impl IntoView {
    let user_id = customer.user_id.clone();
    let is_busy = move || busy.with(|b| b.is_some() && *b == user_id);
    let name = customer.full_name();
    let email = customer.email.clone().unwrap_or_default();
    let verification = customer.verification_status.clone().unwrap_or_else(|| "-".to_string());
    let bonds = customer.total_bonds.unwrap_or_default();
    let value = customer.total_value.map(group_thousands).unwrap_or_else(|| "-".to_string());
    let joined = customer.created_at.as_deref().map(short_date).unwrap_or_default();
    let selected = customer.clone();

    view! {
        <tr class="hover:bg-gray-50 dark:hover:bg-gray-700/50 transition-colors">
            <td class=TD_CLASS>
                <div class="font-medium text-gray-900 dark:text-white">
                    {if name.is_empty() { "Unnamed customer".to_string() } else { name }}
                </div>
                <div class="text-xs text-gray-500">{email}</div>
            </td>
            <td class=TD_CLASS>{verification}</td>
            <td class=TD_CLASS>{bonds}</td>
            <td class=TD_CLASS>{value}</td>
            <td class=TD_CLASS>{joined}</td>
            <td class=format!("{TD_CLASS} text-right space-x-3")>
                <button
                    type="button"
                    class="text-blue-600 hover:text-blue-800 dark:text-blue-400 disabled:opacity-50"
                    disabled=is_busy.clone()
                    on:click=move |_| on_select.run(selected.clone())
                >
                    {move || if is_busy() { "Fetching..." } else { action_label }}
                </button>
                {on_finalize.map(|on_finalize| view! {
                    <button
                        type="button"
                        class="text-emerald-600 hover:text-emerald-800 dark:text-emerald-400"
                        on:click=move |_| on_finalize.run(customer.clone())
                    >
                        "Finalize"
                    </button>
                })}
            </td>
        </tr>
    }
}
