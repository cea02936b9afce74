//! Side navigation for signed-in admins. Entries above the admin's role are
//! hidden; the pages themselves still check.

use crate::{
    app_lib::build_info,
    features::auth::state::use_auth,
    routes::paths::{is_active, visible_nav, NavItem},
};
use admin_session::Role;
use leptos::prelude::*;
use leptos_router::{components::A, hooks::use_location};

#[component]
pub fn Sidebar(#[prop(into)] open: Signal<bool>, on_navigate: Callback<()>) -> impl IntoView {
    let auth = use_auth();
    let pathname = use_location().pathname;

    let items = move || -> Vec<&'static NavItem> {
        visible_nav(auth.role().unwrap_or(Role::User)).collect()
    };

    view! {
        <aside
            class="w-64 flex-shrink-0 md:flex flex-col border-r border-gray-200 dark:border-gray-800 bg-white dark:bg-gray-900 overflow-y-auto"
            class:hidden=move || !open.get()
        >
            <nav class="flex-1 px-4 py-6 space-y-1">
                <For
                    each=items
                    key=|item| item.path
                    children=move |item| {
                        let active = move || pathname.with(|current| is_active(item.path, current));
                        view! {
                            <A
                                href=item.path
                                {..}
                                class="group flex items-center px-2 py-2 text-sm font-medium rounded-md transition-colors"
                                class=("text-blue-600", active)
                                class=("bg-blue-50", active)
                                class=("dark:bg-blue-900", active)
                                class=("text-gray-600", move || !active())
                                class=("hover:bg-gray-50", move || !active())
                                class=("dark:text-gray-300", move || !active())
                                on:click=move |_| on_navigate.run(())
                            >
                                <span class="material-symbols-outlined mr-3 text-xl">{item.icon}</span>
                                {item.label}
                            </A>
                        }
                    }
                />
            </nav>

            <div class="p-4 border-t border-gray-100 dark:border-gray-800">
                <p class="text-[10px] text-gray-400 font-mono text-center uppercase tracking-tighter">
                    "BoraBond Admin " {build_info::short_commit()}
                </p>
            </div>
        </aside>
    }
}
