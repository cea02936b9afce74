use leptos::prelude::*;

/// Loading indicator; `label` is shown beside it and read by screen readers.
#[component]
pub fn Spinner(#[prop(optional)] label: Option<&'static str>) -> impl IntoView {
    view! {
        <div class="inline-flex items-center gap-3" role="status" aria-live="polite">
            <div
                class="h-7 w-7 animate-spin rounded-full border-4 border-blue-200 border-t-blue-600"
                aria-hidden="true"
            ></div>
            <span
                class="text-sm text-gray-500 dark:text-gray-400"
                class:sr-only=label.is_none()
            >
                {label.unwrap_or("Loading")}
            </span>
        </div>
    }
}
