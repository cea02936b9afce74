//! Dashboard overview: the recent activity feed with a type filter.

use crate::{
    components::{ErrorPanel, Spinner, INPUT_CLASS},
    features::activity::client,
};
use chrono::{DateTime, Utc};
use dashboard_model::{
    activity::{ActivityKind, ActivityQuery, RecentActivity, DEFAULT_LIMIT},
    format::time_ago,
};
use leptos::prelude::*;

const fn kind_icon(kind: ActivityKind) -> &'static str {
    match kind {
        ActivityKind::User => "person_add",
        ActivityKind::Purchase => "shopping_cart",
        ActivityKind::Bond => "account_balance",
        ActivityKind::Payment => "payments",
    }
}

fn badge_class(color: &str) -> &'static str {
    match color {
        "green" => "bg-emerald-100 text-emerald-700 dark:bg-emerald-900/40 dark:text-emerald-300",
        "purple" => "bg-purple-100 text-purple-700 dark:bg-purple-900/40 dark:text-purple-300",
        "orange" | "yellow" => "bg-amber-100 text-amber-700 dark:bg-amber-900/40 dark:text-amber-300",
        "red" => "bg-red-100 text-red-700 dark:bg-red-900/40 dark:text-red-300",
        _ => "bg-blue-100 text-blue-700 dark:bg-blue-900/40 dark:text-blue-300",
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let (kind, set_kind) = signal::<Option<ActivityKind>>(None);

    let feed = LocalResource::new(move || {
        let query = ActivityQuery {
            kind: kind.get(),
            limit: kind.get().map(|_| DEFAULT_LIMIT),
            days: None,
        };
        async move { client::recent_activity(query).await }
    });

    view! {
        <div class="space-y-6">
            <div class="flex flex-wrap items-end justify-between gap-4">
                <div class="space-y-1">
                    <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Dashboard"</h1>
                    <p class="text-sm text-gray-500 dark:text-gray-400">
                        "Latest activity across customers, purchases, bonds and payments."
                    </p>
                </div>
                <div class="w-48">
                    <select
                        class=INPUT_CLASS
                        aria-label="Activity type"
                        on:change=move |event| {
                            set_kind.set(ActivityKind::from_value(&event_target_value(&event)));
                        }
                    >
                        <option value="all">"All activity"</option>
                        {ActivityKind::ALL
                            .into_iter()
                            .map(|k| view! { <option value=k.as_str()>{k.label()}</option> })
                            .collect_view()}
                    </select>
                </div>
            </div>

            <div class="bg-white dark:bg-gray-800 shadow-sm border border-gray-200 dark:border-gray-700 rounded-lg">
                <Suspense fallback=move || view! { <div class="p-12 flex justify-center"><Spinner /></div> }>
                    {move || match feed.get() {
                        None => view! { <div class="p-12 flex justify-center"><Spinner /></div> }.into_any(),
                        Some(Err(err)) => view! {
                            <div class="p-4">
                                <ErrorPanel error=err on_retry=Callback::new(move |()| feed.refetch()) />
                            </div>
                        }.into_any(),
                        Some(Ok(rows)) if rows.is_empty() => view! {
                            <p class="p-12 text-center text-sm text-gray-500 dark:text-gray-400">
                                "No recent activity."
                            </p>
                        }.into_any(),
                        Some(Ok(rows)) => {
                            let now = Utc::now();
                            view! {
                                <ul class="divide-y divide-gray-200 dark:divide-gray-700">
                                    {rows.into_iter().map(|row| view! { <ActivityRow row=row now=now /> }).collect_view()}
                                </ul>
                            }.into_any()
                        }
                    }}
                </Suspense>
            </div>
        </div>
    }
}

#[component]
fn ActivityRow(row: RecentActivity, now: DateTime<Utc>) -> impl IntoView {
    let when = time_ago(&row.created_at, now);
    view! {
        <li class="flex items-start gap-4 px-6 py-4">
            <span class=format!("material-symbols-outlined rounded-full p-2 text-xl {}", badge_class(&row.color))>
                {kind_icon(row.kind)}
            </span>
            <div class="flex-1 min-w-0">
                <p class="text-sm text-gray-900 dark:text-white">{row.message}</p>
                <p class="text-xs text-gray-500 dark:text-gray-400">{row.kind.label()} " · " {when}</p>
            </div>
        </li>
    }
}
