//! Ledger of credits and debits with search, type and date filters. Totals
//! cover every entry regardless of the filter.

use crate::{
    components::{ErrorPanel, Spinner, StatCard, CARD_CLASS, INPUT_CLASS, TD_CLASS, TH_CLASS},
    features::ledger::client,
};
use dashboard_model::{
    format::{dollars, group_thousands, short_date},
    ledger::{totals, EntryType, LedgerEntry, LedgerFilter},
};
use leptos::prelude::*;

#[component]
pub fn LedgerPage() -> impl IntoView {
    let entries = LocalResource::new(|| async { client::list_entries().await });

    view! {
        <div class="space-y-6">
            <div class="space-y-1">
                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Ledger"</h1>
                <p class="text-sm text-gray-500 dark:text-gray-400">
                    "Every credit and debit recorded against customer accounts."
                </p>
            </div>
            <Suspense fallback=move || view! { <Spinner /> }>
                {move || match entries.get() {
                    None => view! { <Spinner /> }.into_any(),
                    Some(Err(err)) => view! {
                        <ErrorPanel error=err on_retry=Callback::new(move |()| entries.refetch()) />
                    }.into_any(),
                    Some(Ok(list)) => view! { <LedgerBook entries=list /> }.into_any(),
                }}
            </Suspense>
        </div>
    }
}

#[component]
fn LedgerBook(entries: Vec<LedgerEntry>) -> impl IntoView {
    let filter = RwSignal::new(LedgerFilter::default());
    let summary = totals(&entries);
    let entries = StoredValue::new(entries);

    let rows = move || {
        entries.with_value(|all| {
            filter.with(|f| f.apply(all).into_iter().cloned().collect::<Vec<_>>())
        })
    };

    view! {
        <div class="grid gap-4 sm:grid-cols-3">
            <StatCard label="Total credits" value=dollars(summary.credits) icon="arrow_downward" />
            <StatCard label="Total debits" value=dollars(summary.debits) icon="arrow_upward" />
            <StatCard label="Net balance" value=dollars(summary.balance()) icon="account_balance_wallet" />
        </div>

        <div class="grid gap-4 md:grid-cols-3">
            <input
                type="search"
                class=INPUT_CLASS
                placeholder="Search description, customer or reference"
                on:input=move |event| filter.update(|f| f.search = event_target_value(&event))
            />
            <select
                class=INPUT_CLASS
                aria-label="Entry type"
                on:change=move |event| {
                    let entry_type = match event_target_value(&event).as_str() {
                        "Credit" => Some(EntryType::Credit),
                        "Debit" => Some(EntryType::Debit),
                        _ => None,
                    };
                    filter.update(|f| f.entry_type = entry_type);
                }
            >
                <option value="All">"All types"</option>
                <option value=EntryType::Credit.as_str()>"Credits"</option>
                <option value=EntryType::Debit.as_str()>"Debits"</option>
            </select>
            <input
                type="date"
                class=INPUT_CLASS
                aria-label="Date"
                on:input=move |event| {
                    let date = event_target_value(&event);
                    filter.update(|f| f.date = (!date.is_empty()).then_some(date));
                }
            />
        </div>

        <div class=CARD_CLASS>
            <table class="min-w-full divide-y divide-gray-200 dark:divide-gray-700">
                <thead class="bg-gray-50 dark:bg-gray-900/50">
                    <tr>
                        <th class=TH_CLASS>"Date"</th>
                        <th class=TH_CLASS>"Description"</th>
                        <th class=TH_CLASS>"Customer"</th>
                        <th class=TH_CLASS>"Reference"</th>
                        <th class=format!("{TH_CLASS} text-right")>"Amount"</th>
                        <th class=format!("{TH_CLASS} text-right")>"Balance"</th>
                        <th class=TH_CLASS>"Status"</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-gray-200 dark:divide-gray-700">
                    {move || {
                        let rows = rows();
                        if rows.is_empty() {
                            return view! {
                                <tr>
                                    <td colspan="7" class="px-6 py-12 text-center text-sm text-gray-500 dark:text-gray-400">
                                        "No ledger entries match the current filters."
                                    </td>
                                </tr>
                            }.into_any();
                        }
                        rows.into_iter().map(|entry| view! { <EntryRow entry=entry /> }).collect_view().into_any()
                    }}
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn EntryRow(entry: LedgerEntry) -> impl IntoView {
    let amount_class = match entry.entry_type {
        EntryType::Credit => "text-emerald-600 dark:text-emerald-400",
        EntryType::Debit => "text-red-600 dark:text-red-400",
    };
    let amount = format!("{}{}", entry.entry_type.sign(), group_thousands(entry.amount));
    view! {
        <tr class="hover:bg-gray-50 dark:hover:bg-gray-700/50 transition-colors">
            <td class=TD_CLASS>{short_date(&entry.date)}</td>
            <td class=TD_CLASS>
                <div class="text-gray-900 dark:text-white">{entry.description.clone()}</div>
                <div class="text-xs text-gray-500">{entry.bond.clone()}</div>
            </td>
            <td class=TD_CLASS>{entry.customer.clone()}</td>
            <td class=format!("{TD_CLASS} font-mono text-xs")>{entry.reference.clone()}</td>
            <td class=format!("{TD_CLASS} text-right font-medium {amount_class}")>{amount}</td>
            <td class=format!("{TD_CLASS} text-right")>{group_thousands(entry.balance)}</td>
            <td class=TD_CLASS>{entry.status.clone()}</td>
        </tr>
    }
}
