//! Alert banners for success and error messages. Messages must be safe to render
//! and should never include secrets or tokens.

use admin_session::AppError;
use leptos::prelude::*;

#[derive(Clone, Copy)]
/// Supported alert styles.
pub enum AlertKind {
    Error,
    Success,
    Info,
}

/// Renders a styled alert banner.
#[component]
pub fn Alert(kind: AlertKind, #[prop(into)] message: String) -> impl IntoView {
    let class = match kind {
        AlertKind::Error => {
            "rounded-lg border border-red-200 bg-red-50 px-4 py-3 text-sm text-red-700 dark:border-red-400 dark:bg-red-900/30 dark:text-red-200"
        }
        AlertKind::Success => {
            "rounded-lg border border-emerald-200 bg-emerald-50 px-4 py-3 text-sm text-emerald-700 dark:border-emerald-400 dark:bg-emerald-900/30 dark:text-emerald-200"
        }
        AlertKind::Info => {
            "rounded-lg border border-blue-200 bg-blue-50 px-4 py-3 text-sm text-blue-700 dark:border-blue-400 dark:bg-blue-900/30 dark:text-blue-200"
        }
    };

    view! { <div class=class role="alert">{message}</div> }
}

/// Load failure with a retry action.
#[component]
pub fn ErrorPanel(error: AppError, on_retry: Callback<()>) -> impl IntoView {
    let hint = match error.status() {
        0 => Some("Check that the backend is running and reachable."),
        408 => Some("The server took too long to answer."),
        _ => None,
    };

    view! {
        <div class="rounded-lg border border-red-200 bg-red-50 px-4 py-4 text-sm text-red-700 dark:border-red-400 dark:bg-red-900/30 dark:text-red-200 space-y-3" role="alert">
            <p class="font-medium">{error.to_string()}</p>
            {hint.map(|hint| view! { <p class="text-xs">{hint}</p> })}
            <button
                type="button"
                class="inline-flex items-center gap-1 text-sm font-medium underline"
                on:click=move |_| on_retry.run(())
            >
                <span class="material-symbols-outlined text-base">"refresh"</span>
                "Try again"
            </button>
        </div>
    }
}
