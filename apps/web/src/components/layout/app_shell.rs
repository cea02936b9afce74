//! Dashboard chrome: header with the signed-in admin and sign-out, the
//! sidebar, and the content container. Navigation remains client-side;
//! the edge gate and the backend enforce access control.

use crate::{components::layout::Sidebar, features::auth::state::use_auth, routes::paths};
use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn AppShell(children: Children) -> impl IntoView {
    let (menu_open, set_menu_open) = signal(false);
    let auth = use_auth();

    let identity = move || {
        auth.user()
            .map(|user| format!("{} ({})", user.email, user.role.label()))
            .unwrap_or_default()
    };

    view! {
        <div class="min-h-screen flex flex-col">
            <header class="border-b border-gray-200 dark:border-gray-800 dark:bg-gray-900">
                <div class="flex flex-wrap items-center justify-between mx-auto p-4">
                    <div class="flex items-center gap-3">
                        <button
                            type="button"
                            class="inline-flex items-center p-2 w-10 h-10 justify-center text-sm text-gray-500 rounded-lg md:hidden hover:bg-gray-100 focus:outline-none focus:ring-2 focus:ring-gray-200 dark:text-gray-400 dark:hover:bg-gray-700"
                            aria-expanded=move || menu_open.get().to_string()
                            on:click=move |_| set_menu_open.update(|open| *open = !*open)
                        >
                            <span class="sr-only">"Open main menu"</span>
                            <span class="material-symbols-outlined">"menu"</span>
                        </button>
                        <A href=paths::DASHBOARD {..} class="flex items-center space-x-3">
                            <img src="/logo.svg" class="h-8" alt="BoraBond" />
                            <span class="font-semibold whitespace-nowrap dark:text-white">
                                "BoraBond Admin"
                            </span>
                        </A>
                    </div>
                    <div class="flex items-center gap-4">
                        <span class="hidden sm:inline text-sm text-gray-600 dark:text-gray-300">
                            {identity}
                        </span>
                        <button
                            type="button"
                            class="text-sm font-medium text-gray-900 hover:text-blue-700 dark:text-white dark:hover:text-blue-500"
                            on:click=move |_| auth.logout(None)
                        >
                            "Sign Out"
                        </button>
                    </div>
                </div>
            </header>
            <div class="flex flex-1">
                <Sidebar open=menu_open on_navigate=Callback::new(move |()| set_menu_open.set(false)) />
                <main class="flex-1 min-w-0">
                    <div class="container mx-auto p-4 mt-2">{children()}</div>
                </main>
            </div>
        </div>
    }
}
