use crate::components::Button;
use admin_session::inactivity::format_countdown;
use leptos::prelude::*;

#[component]
pub fn WarningDialog(
    remaining_ms: u64,
    on_stay: Callback<()>,
    on_logout: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="fixed inset-0 z-50 flex items-center justify-center p-4 bg-black/50 backdrop-blur-sm">
            <div
                class="bg-white dark:bg-gray-800 rounded-xl shadow-xl border border-gray-200 dark:border-gray-700 w-full max-w-md p-6 space-y-4"
                role="alertdialog"
                aria-labelledby="idle-title"
            >
                <div class="flex items-center gap-3">
                    <span class="material-symbols-outlined text-3xl text-amber-500">"timer"</span>
                    <h2 id="idle-title" class="text-lg font-semibold text-gray-900 dark:text-white">
                        "Session Timeout Warning"
                    </h2>
                </div>
                <p class="text-sm text-gray-600 dark:text-gray-300">
                    "You have been inactive for a while. For your security you will be signed out in "
                    <span class="font-mono font-semibold">{format_countdown(remaining_ms)}</span>
                    "."
                </p>
                <div class="pt-2 flex flex-col-reverse sm:flex-row gap-3 sm:justify-end">
                    <button
                        type="button"
                        on:click=move |_| on_logout.run(())
                        class="px-5 py-2.5 text-sm font-medium text-gray-700 bg-white border border-gray-300 rounded-lg hover:bg-gray-50 dark:bg-gray-800 dark:text-gray-300 dark:border-gray-600 dark:hover:bg-gray-700"
                    >
                        "Log out now"
                    </button>
                    <Button on_click=Callback::new(move |_| on_stay.run(()))>"Stay logged in"</Button>
                </div>
            </div>
        </div>
    }
}
