//! Bond catalogue with search and country, tenor and status filters.

use crate::{
    components::{ErrorPanel, Spinner, StatCard, CARD_CLASS, INPUT_CLASS, TD_CLASS, TH_CLASS},
    features::bonds::client,
};
use dashboard_model::{
    bonds::{active_count, unique_countries, unique_tenors, Bond, BondFilter},
    format::{compact_currency, short_date},
    ActiveFilter,
};
use leptos::prelude::*;

#[component]
pub fn BondsPage() -> impl IntoView {
    let bonds = LocalResource::new(|| async { client::list_bonds().await });

    view! {
        <div class="space-y-6">
            <div class="space-y-1">
                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Bonds"</h1>
                <p class="text-sm text-gray-500 dark:text-gray-400">
                    "Government bonds currently offered on the platform."
                </p>
            </div>
            <Suspense fallback=move || view! { <Spinner /> }>
                {move || match bonds.get() {
                    None => view! { <Spinner /> }.into_any(),
                    Some(Err(err)) => view! {
                        <ErrorPanel error=err on_retry=Callback::new(move |()| bonds.refetch()) />
                    }.into_any(),
                    Some(Ok(list)) => view! { <BondCatalogue bonds=list /> }.into_any(),
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn BondCatalogue(bonds: Vec<Bond>) -> impl IntoView {
    let filter = RwSignal::new(BondFilter::default());
    let countries = unique_countries(&bonds);
    let tenors = unique_tenors(&bonds);
    let total = bonds.len();
    let active = active_count(&bonds);
    let bonds = StoredValue::new(bonds);

    let rows = move || {
        bonds.with_value(|bonds| {
            filter.with(|filter| filter.apply(bonds).into_iter().cloned().collect::<Vec<_>>())
        })
    };

    view! {
        <div class="grid gap-4 sm:grid-cols-2">
            <StatCard label="Total bonds" value=total.to_string() icon="account_balance" />
            <StatCard label="Active bonds" value=active.to_string() icon="check_circle" />
        </div>

        <div class="grid gap-4 md:grid-cols-4">
            <input
                type="search"
                class=INPUT_CLASS
                placeholder="Search name, code, country or ISIN"
                on:input=move |event| filter.update(|f| f.search = event_target_value(&event))
            />
            <select
                class=INPUT_CLASS
                aria-label="Country"
                on:change=move |event| {
                    let value = event_target_value(&event);
                    filter.update(|f| f.country = (!value.is_empty()).then_some(value));
                }
            >
                <option value="">"All countries"</option>
                {countries.into_iter().map(|c| view! { <option value=c.clone()>{c}</option> }).collect_view()}
            </select>
            <select
                class=INPUT_CLASS
                aria-label="Tenor"
                on:change=move |event| {
                    let tenor = event_target_value(&event).parse::<u32>().ok();
                    filter.update(|f| f.tenor = tenor);
                }
            >
                <option value="">"All tenors"</option>
                {tenors
                    .into_iter()
                    .map(|t| view! { <option value=t.to_string()>{format!("{t} years")}</option> })
                    .collect_view()}
            </select>
            <select
                class=INPUT_CLASS
                aria-label="Status"
                on:change=move |event| {
                    let status = ActiveFilter::from_value(&event_target_value(&event));
                    filter.update(|f| f.status = status);
                }
            >
                <option value="all">"All statuses"</option>
                <option value="active">"Active"</option>
                <option value="inactive">"Inactive"</option>
            </select>
        </div>

        <div class=CARD_CLASS>
            <table class="min-w-full divide-y divide-gray-200 dark:divide-gray-700">
                <thead class="bg-gray-50 dark:bg-gray-900/50">
                    <tr>
                        <th class=TH_CLASS>"Bond"</th>
                        <th class=TH_CLASS>"Country"</th>
                        <th class=TH_CLASS>"Tenor"</th>
                        <th class=TH_CLASS>"Coupon"</th>
                        <th class=TH_CLASS>"Yield (bid / offer)"</th>
                        <th class=TH_CLASS>"Available"</th>
                        <th class=TH_CLASS>"Maturity"</th>
                        <th class=TH_CLASS>"Status"</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-gray-200 dark:divide-gray-700">
                    {move || {
                        let rows = rows();
                        if rows.is_empty() {
                            return view! {
                                <tr>
                                    <td colspan="8" class="px-6 py-12 text-center text-sm text-gray-500 dark:text-gray-400">
                                        "No bonds match the current filters."
                                    </td>
                                </tr>
                            }.into_any();
                        }
                        rows.into_iter().map(|bond| view! { <BondRow bond=bond /> }).collect_view().into_any()
                    }}
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn BondRow(bond: Bond) -> impl IntoView {
    let (status, status_class) = if bond.is_active {
        ("Active", "text-emerald-600 dark:text-emerald-400")
    } else {
        ("Inactive", "text-gray-400")
    };
    view! {
        <tr class="hover:bg-gray-50 dark:hover:bg-gray-700/50 transition-colors">
            <td class=TD_CLASS>
                <div class="font-medium text-gray-900 dark:text-white">{bond.display_name.clone()}</div>
                <div class="text-xs text-gray-500">
                    {bond.instrument_code.clone()}
                    {bond.isin.clone().map(|isin| format!(" · {isin}"))}
                </div>
            </td>
            <td class=TD_CLASS>{bond.country.clone()}</td>
            <td class=TD_CLASS>{format!("{}Y", bond.tenor)}</td>
            <td class=TD_CLASS>{format!("{:.2}%", bond.coupon_rate)}</td>
            <td class=TD_CLASS>{format!("{:.2}% / {:.2}%", bond.bid_yield, bond.offer_yield)}</td>
            <td class=TD_CLASS>{compact_currency(bond.available_amount, &bond.currency)}</td>
            <td class=TD_CLASS>{short_date(&bond.maturity_date)}</td>
            <td class=format!("{TD_CLASS} {status_class}")>{status}</td>
        </tr>
    }
}
