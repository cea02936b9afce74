use leptos::prelude::*;

#[component]
pub fn StatCard(
    label: &'static str,
    #[prop(into)] value: Signal<String>,
    icon: &'static str,
) -> impl IntoView {
    view! {
        <div class="p-5 bg-white dark:bg-gray-800 rounded-lg border border-gray-200 dark:border-gray-700 shadow-sm">
            <div class="flex items-center justify-between">
                <p class="text-sm font-medium text-gray-500 dark:text-gray-400">{label}</p>
                <span class="material-symbols-outlined text-gray-400">{icon}</span>
            </div>
            <p class="mt-2 text-2xl font-semibold text-gray-900 dark:text-white">{move || value.get()}</p>
        </div>
    }
}
