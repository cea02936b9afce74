use crate::{components::Spinner, features::auth::state::use_auth, routes::paths};
use admin_session::{
    guard::{self, DenyReason, GuardState},
    redirect::login_redirect,
    RedirectLatch, Role,
};
use leptos::prelude::*;
use leptos_router::{
    components::A,
    hooks::{use_location, use_navigate},
};
use tracing::debug;

/// Renders `children` only for a signed-in admin holding at least `role`.
/// Without a session it redirects to the login page once per denial; with
/// too low a role it shows an access-denied panel instead.
#[component]
pub fn RequireRole(#[prop(optional)] role: Option<Role>, children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let location = use_location();
    let navigate = use_navigate();

    let state = Memo::new(move |_| {
        let is_loading = auth.is_loading.get();
        auth.session
            .with(|session| guard::evaluate(is_loading, session.as_ref(), role))
    });
    let latch = StoredValue::new(RedirectLatch::new());

    Effect::new(move |_| {
        let current = state.get();
        let fire = latch
            .try_update_value(|latch| latch.observe(current))
            .unwrap_or(false);
        if fire {
            // UX-only guard; real access control lives in the edge gate and the API.
            let target = login_redirect(&location.pathname.get_untracked());
            debug!(%target, "redirecting unauthenticated visitor");
            navigate(&target, Default::default());
        }
    });

    view! {
        {move || match state.get() {
            GuardState::Allowed => children().into_any(),
            GuardState::Denied(DenyReason::InsufficientRole { required, actual }) => {
                view! { <AccessDenied required=required actual=actual /> }.into_any()
            }
            GuardState::Checking | GuardState::Denied(DenyReason::Unauthenticated) => {
                view! {
                    <div class="flex justify-center items-center min-h-[50vh]">
                        <Spinner label="Checking session" />
                    </div>
                }
                .into_any()
            }
        }}
    }
}

/// Shown when the signed-in admin lacks the role a page requires.
#[component]
pub fn AccessDenied(required: Role, actual: Role) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[50vh] text-center px-4">
            <div class="p-8 bg-white dark:bg-gray-800 rounded-xl shadow-sm border border-gray-200 dark:border-gray-700 max-w-md w-full">
                <span class="material-symbols-outlined text-6xl text-red-600 mb-4">"lock"</span>
                <h2 class="text-2xl font-bold text-gray-900 dark:text-white mb-2">"Access Denied"</h2>
                <p class="text-gray-500 dark:text-gray-400 mb-2 text-sm">
                    "This page requires the " {required.label()} " role."
                </p>
                <p class="text-gray-500 dark:text-gray-400 mb-6 text-sm">
                    "You are signed in as " {actual.label()} "."
                </p>
                <A
                    href=paths::DASHBOARD
                    {..}
                    class="inline-flex items-center px-6 py-3 text-base font-medium text-white bg-blue-700 rounded-lg hover:bg-blue-800 transition-all"
                >
                    <span class="material-symbols-outlined mr-2 text-xl">"dashboard"</span>
                    "Go to Dashboard"
                </A>
            </div>
        </div>
    }
}
