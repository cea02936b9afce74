//! Customer list guarded for admins. Filtering is local; edits and deletes
//! go to the backend, which remains the authority on who may do them.

use crate::{
    components::{
        Alert, AlertKind, Button, ButtonKind, ErrorPanel, Modal, Spinner, StatCard, CARD_CLASS,
        INPUT_CLASS, TD_CLASS, TH_CLASS,
    },
    features::{auth::RequireRole, customers::client},
    routes::{
        paths::{self, required_role},
        users::edit::EditCustomer,
    },
};
use dashboard_model::{
    customers::{status_counts, Customer, CustomerFilter, CustomerStatus, UserType},
    format::short_date,
};
use leptos::prelude::*;
use tracing::info;

#[component]
pub fn UsersPage() -> impl IntoView {
    view! {
        <RequireRole role=required_role(paths::USERS)>
            <CustomerAdmin />
        </RequireRole>
    }
}

#[component]
fn CustomerAdmin() -> impl IntoView {
    let customers = LocalResource::new(|| async { client::list_customers().await });
    let editing = RwSignal::new(None::<Customer>);
    let deleting = RwSignal::new(None::<Customer>);
    let notice = RwSignal::new(None::<String>);

    let on_saved = Callback::new(move |message: String| {
        editing.set(None);
        notice.set(Some(message));
        customers.refetch();
    });

    view! {
        <div class="space-y-6">
            <div class="space-y-1">
                <h1 class="text-2xl font-semibold text-gray-900 dark:text-white">"Users"</h1>
                <p class="text-sm text-gray-500 dark:text-gray-400">
                    "View and manage registered customers."
                </p>
            </div>

            {move || notice.get().map(|message| view! { <Alert kind=AlertKind::Success message=message /> })}

            <Suspense fallback=move || view! { <Spinner /> }>
                {move || match customers.get() {
                    None => view! { <Spinner /> }.into_any(),
                    Some(Err(err)) => view! {
                        <ErrorPanel error=err on_retry=Callback::new(move |()| customers.refetch()) />
                    }.into_any(),
                    Some(Ok(list)) => view! {
                        <CustomerTable customers=list editing=editing deleting=deleting />
                    }.into_any(),
                }}
            </Suspense>

            {move || editing.get().map(|customer| view! {
                <EditCustomer
                    customer=customer
                    on_saved=on_saved
                    on_cancel=Callback::new(move |()| editing.set(None))
                />
            })}
            {move || deleting.get().map(|customer| view! {
                <ConfirmDelete
                    customer=customer
                    on_done=Callback::new(move |message: String| {
                        deleting.set(None);
                        notice.set(Some(message));
                        customers.refetch();
                    })
                    on_cancel=Callback::new(move |()| deleting.set(None))
                />
            })}
        </div>
    }
}

#[component]
fn CustomerTable(
    customers: Vec<Customer>,
    editing: RwSignal<Option<Customer>>,
    deleting: RwSignal<Option<Customer>>,
) -> impl IntoView {
    let filter = RwSignal::new(CustomerFilter::default());
    let counts = status_counts(&customers);
    let customers = StoredValue::new(customers);

    let rows = move || {
        customers.with_value(|all| {
            filter.with(|f| f.apply(all).into_iter().cloned().collect::<Vec<_>>())
        })
    };

    view! {
        <div class="grid gap-4 sm:grid-cols-2 lg:grid-cols-5">
            <StatCard label="Total" value=counts.total.to_string() icon="group" />
            <StatCard label="Active" value=counts.active.to_string() icon="check_circle" />
            <StatCard label="Pending" value=counts.pending.to_string() icon="hourglass_top" />
            <StatCard label="Inactive" value=counts.inactive.to_string() icon="block" />
            <StatCard label="Admins" value=counts.admins.to_string() icon="shield_person" />
        </div>

        <div class="grid gap-4 md:grid-cols-3">
            <input
                type="search"
                class=INPUT_CLASS
                placeholder="Search name or email"
                on:input=move |event| filter.update(|f| f.search = event_target_value(&event))
            />
            <select
                class=INPUT_CLASS
                aria-label="Status"
                on:change=move |event| {
                    let status = CustomerStatus::from_value(&event_target_value(&event));
                    filter.update(|f| f.status = status);
                }
            >
                <option value="all">"All statuses"</option>
                <option value="active">"Active"</option>
                <option value="pending">"Pending"</option>
                <option value="inactive">"Inactive"</option>
            </select>
            <select
                class=INPUT_CLASS
                aria-label="User type"
                on:change=move |event| {
                    let user_type = UserType::from_value(&event_target_value(&event));
                    filter.update(|f| f.user_type = user_type);
                }
            >
                <option value="all">"All types"</option>
                <option value="customer">"Customers"</option>
                <option value="admin">"Admins"</option>
            </select>
        </div>

        <div class=CARD_CLASS>
            <table class="min-w-full divide-y divide-gray-200 dark:divide-gray-700">
                <thead class="bg-gray-50 dark:bg-gray-900/50">
                    <tr>
                        <th class=TH_CLASS>"Name"</th>
                        <th class=TH_CLASS>"Email"</th>
                        <th class=TH_CLASS>"Status"</th>
                        <th class=TH_CLASS>"Type"</th>
                        <th class=TH_CLASS>"Verification"</th>
                        <th class=TH_CLASS>"Joined"</th>
                        <th class=format!("{TH_CLASS} text-right")>"Actions"</th>
                    </tr>
                </thead>
                <tbody class="divide-y divide-gray-200 dark:divide-gray-700">
                    {move || {
                        let rows = rows();
                        if rows.is_empty() {
                            return view! {
                                <tr>
                                    <td colspan="7" class="px-6 py-12 text-center text-sm text-gray-500 dark:text-gray-400">
                                        "No users found."
                                    </td>
                                </tr>
                            }.into_any();
                        }
                        rows.into_iter()
                            .map(|customer| view! { <CustomerRow customer=customer editing=editing deleting=deleting /> })
                            .collect_view()
                            .into_any()
                    }}
                </tbody>
            </table>
        </div>
    }
}

#[component]
fn CustomerRow(
    customer: Customer,
    editing: RwSignal<Option<Customer>>,
    deleting: RwSignal<Option<Customer>>,
) -> impl IntoView {
    let joined = customer.created_at.as_deref().map(short_date).unwrap_or_default();
    let for_edit = customer.clone();
    let for_delete = customer.clone();
    view! {
        <tr class="hover:bg-gray-50 dark:hover:bg-gray-700/50 transition-colors">
            <td class=format!("{TD_CLASS} font-medium text-gray-900 dark:text-white")>{customer.name()}</td>
            <td class=TD_CLASS>{customer.email.clone()}</td>
            <td class=TD_CLASS>{customer.status.as_str()}</td>
            <td class=TD_CLASS>{customer.user_type.as_str()}</td>
            <td class=TD_CLASS>{customer.verification_status.as_str()}</td>
            <td class=TD_CLASS>{joined}</td>
            <td class=format!("{TD_CLASS} text-right space-x-3")>
                <button
                    type="button"
                    class="text-blue-600 hover:text-blue-800 dark:text-blue-400"
                    on:click=move |_| editing.set(Some(for_edit.clone()))
                >
                    "Edit"
                </button>
                <button
                    type="button"
                    class="text-red-600 hover:text-red-800 dark:text-red-400"
                    on:click=move |_| deleting.set(Some(for_delete.clone()))
                >
                    "Delete"
                </button>
            </td>
        </tr>
    }
}

#[component]
fn ConfirmDelete(
    customer: Customer,
    on_done: Callback<String>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let name = customer.name();
    let user_id = customer.user_id.clone();
    let delete = Action::new_local(move |id: &String| {
        let id = id.clone();
        async move { client::delete_customer(&id).await }
    });

    Effect::new(move |_| {
        if let Some(Ok(message)) = delete.value().get() {
            info!("customer deleted");
            on_done.run(message.unwrap_or_else(|| "User deleted.".to_string()));
        }
    });

    view! {
        <Modal title="Delete user" on_close=on_cancel>
            <div class="space-y-4">
                <p class="text-sm text-gray-700 dark:text-gray-300">
                    "Delete " <strong>{name}</strong> "? This cannot be undone."
                </p>
                {move || match delete.value().get() {
                    Some(Err(err)) => Some(view! { <Alert kind=AlertKind::Error message=err.to_string() /> }),
                    _ => None,
                }}
                <div class="flex justify-end gap-3">
                    <Button kind=ButtonKind::Secondary on_click=Callback::new(move |_| on_cancel.run(()))>
                        "Cancel"
                    </Button>
                    <Button
                        kind=ButtonKind::Danger
                        disabled=delete.pending()
                        on_click=Callback::new(move |_| {
                            delete.dispatch(user_id.clone());
                        })
                    >
                        "Delete"
                    </Button>
                </div>
            </div>
        </Modal>
    }
}
