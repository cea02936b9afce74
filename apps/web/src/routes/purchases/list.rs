use crate::{
    app_lib::today_iso,
    components::{
        Alert, AlertKind, Button, ErrorPanel, Spinner, StatCard, CARD_CLASS, INPUT_CLASS, TD_CLASS,
        TH_CLASS,
    },
    features::purchases::client,
    routes::purchases::create::CreatePurchase,
};
use dashboard_model::{
    format::{compact_currency, group_thousands, short_date},
    purchases::{totals, unique_customers, NextPayment, Purchase, PurchaseFilter},
    ActiveFilter,
};
use leptos::prelude::*;

#[component]
pub fn PurchasesPage() -> impl IntoView {
    let purchases = LocalResource::new(|| async { client::list_purchases().await });
    let next = LocalResource::new(|| async { client::next_payment().await });
    let creating = RwSignal::new(false);
    let notice = RwSignal::new(None::<String>);

    let on_created = Callback::new(move |message: String| {
        creating.set(false);
        notice.set(Some(message));
        purchases.refetch();
        next.refetch();
    });

    view! {
        <div class="space-y-6">
            <div class="flex flex-wrap items-end justify-between gap-4">
                <div class="space-y-1">
                    <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Purchases"</h1>
                    <p class="text-sm text-gray-500 dark:text-gray-400">
                        "Bond purchases made by customers."
                    </p>
                </div>
                <Button on_click=Callback::new(move |_| creating.set(true))>
                    "New purchase"
                </Button>
            </div>

            {move || notice.get().map(|message| view! { <Alert kind=AlertKind::Success message=message /> })}

            <Suspense fallback=|| ()>
                {move || match next.get() {
                    Some(Ok(payment)) => Some(view! { <NextPaymentCard payment=payment /> }),
                    _ => None,
                }}
            </Suspense>

            <Suspense fallback=move || view! { <Spinner /> }>
                {move || match purchases.get() {
                    None => view! { <Spinner /> }.into_any(),
                    Some(Err(err)) => view! {
                        <ErrorPanel error=err on_retry=Callback::new(move |()| purchases.refetch()) />
                    }.into_any(),
                    Some(Ok(list)) => view! { <PurchaseBook purchases=list /> }.into_any(),
                }}
            </Suspense>

            {move || creating.get().then(|| view! {
                <CreatePurchase on_created=on_created on_cancel=Callback::new(move |()| creating.set(false)) />
            })}
        </div>
    }
}

#[component]
fn NextPaymentCard(payment: NextPayment) -> impl IntoView {
    let days = dashboard_model::format::days_until(&payment.next_payment_date, &today_iso());
    let bond = payment
        .available_bond
        .as_ref()
        .map(|bond| bond.display_name.clone())
        .or_else(|| payment.purchase.as_ref().map(|p| p.bond_name().to_string()))
        .unwrap_or_default();
    let countdown = match days {
        Some(0) => "today".to_string(),
        Some(1) => "in 1 day".to_string(),
        Some(n) if n > 1 => format!("in {n} days"),
        Some(n) => format!("{} days ago", n.abs()),
        None => String::new(),
    };

    view! {
        <div class="flex items-center gap-4 p-5 bg-blue-50 dark:bg-blue-900/30 border border-blue-200 dark:border-blue-800 rounded-lg">
            <span class="material-symbols-outlined text-3xl text-blue-600 dark:text-blue-300">"event"</span>
            <div>
                <p class="text-sm text-blue-700 dark:text-blue-200">"Next coupon payment"</p>
                <p class="text-lg font-semibold text-gray-900 dark:text-white">
                    {short_date(&payment.next_payment_date)} " " <span class="text-sm font-normal">{countdown}</span>
                </p>
                <p class="text-xs text-gray-500 dark:text-gray-400">{bond}</p>
            </div>
        </div>
    }
}

#[component]
fn PurchaseBook(purchases: Vec<Purchase>) -> impl IntoView {
    let filter = RwSignal::new(PurchaseFilter::default());
    let summary = totals(&purchases);
    let customers = unique_customers(&purchases);
    let purchases = StoredValue::new(purchases);
    let today = today_iso();

    let rows = move || {
        purchases.with_value(|all| {
            filter.with(|f| f.apply(all).into_iter().cloned().collect::<Vec<_>>())
        })
    };

    view! {
        <div class="grid gap-4 sm:grid-cols-3">
            <StatCard label="Purchases" value=summary.count.to_string() icon="shopping_cart" />
            <StatCard label="Active" value=summary.active.to_string() icon="check_circle" />
            <StatCard label="Total invested" value=group_thousands(summary.amount) icon="payments" />
        </div>

        <div class="grid gap-4 md:grid-cols-3">
            <input
                type="search"
                class=INPUT_CLASS
                placeholder="Search customer, email, bond or ISIN"
                on:input=move |event| filter.update(|f| f.search = event_target_value(&event))
            />
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
            <select
                class=INPUT_CLASS
                aria-label="Customer"
                on:change=move |event| {
                    let value = event_target_value(&event);
                    filter.update(|f| f.customer = (!value.is_empty()).then_some(value));
                }
            >
                <option value="">"All customers"</option>
                {customers
                    .into_iter()
                    .map(|(id, name)| view! { <option value=id>{name}</option> })
                    .collect_view()}
            </select>
        </div>

        <div class=CARD_CLASS>
            <table class="min-w-full divide-y divide-gray-200 dark:divide-gray-700">
                <thead class="bg-gray-50 dark:bg-gray-900/50">
                    <tr>
                        <th class=TH_CLASS>"Customer"</th>
                        <th class=TH_CLASS>"Bond"</th>
                        <th class=TH_CLASS>"Amount"</th>
                        <th class=TH_CLASS>"Net income"</th>
                        <th class=TH_CLASS>"Next coupon"</th>
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
                                    <td colspan="7" class="px-6 py-12 text-center text-sm text-gray-500 dark:text-gray-400">
                                        "No purchases found."
                                    </td>
                                </tr>
                            }.into_any();
                        }
                        let today = today.clone();
                        rows.into_iter()
                            .map(|purchase| view! { <PurchaseRow purchase=purchase today=today.clone() /> })
                            .collect_view()
                            .into_any()
                    }}
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn PurchaseRow(purchase: Purchase, today: String) -> impl IntoView {
    let next_coupon = purchase.next_coupon_date.as_deref().map(|date| {
        match purchase.days_to_next_coupon(&today) {
            Some(days) if days >= 0 => format!("{} ({days}d)", short_date(date)),
            _ => short_date(date),
        }
    });
    let email = purchase
        .user_profiles
        .as_ref()
        .map(|profile| profile.email.clone())
        .unwrap_or_default();
    let status = if purchase.is_active { "Active" } else { "Inactive" };

    view! {
        <tr class="hover:bg-gray-50 dark:hover:bg-gray-700/50 transition-colors">
            <td class=TD_CLASS>
                <div class="font-medium text-gray-900 dark:text-white">{purchase.customer_name()}</div>
                <div class="text-xs text-gray-500">{email}</div>
            </td>
            <td class=TD_CLASS>{purchase.bond_name().to_string()}</td>
            <td class=TD_CLASS>{compact_currency(purchase.amount, purchase.currency())}</td>
            <td class=TD_CLASS>{compact_currency(purchase.net_income, purchase.currency())}</td>
            <td class=TD_CLASS>{next_coupon.unwrap_or_else(|| "-".to_string())}</td>
            <td class=TD_CLASS>{purchase.maturity_date.as_deref().map(short_date).unwrap_or_default()}</td>
            <td class=TD_CLASS>{status}</td>
        </tr>
    }
}
