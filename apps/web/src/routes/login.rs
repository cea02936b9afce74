//! Admin sign-in. Shows why the previous session ended (from `?message=`)
//! and returns to `?redirect=` after a successful login when it is a safe
//! in-app path.

use crate::components::{Alert, AlertKind, Button, Spinner, INPUT_CLASS, LABEL_CLASS};
use crate::features::auth::state::use_auth;
use admin_session::{redirect::safe_return_path, LogoutReason};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

#[derive(Clone)]
struct LoginInput {
    email: String,
    password: String,
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();
    let query = use_query_map();
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (form_error, set_form_error) = signal::<Option<String>>(None);

    let notice = move || {
        query
            .with(|q| q.get("message"))
            .and_then(|code| LogoutReason::from_code(&code))
            .map(LogoutReason::notice)
    };
    let return_to = move || safe_return_path(query.with_untracked(|q| q.get("redirect")).as_deref());

    // Signed-in admins never see the form.
    Effect::new({
        let navigate = navigate.clone();
        move |_| {
            if !auth.is_loading.get() && auth.is_authenticated.get() {
                navigate(&return_to(), Default::default());
            }
        }
    });

    let login_action = Action::new_local(move |input: &LoginInput| {
        let input = input.clone();
        async move { auth.login(input.email, input.password).await }
    });

    let on_submit = move |event: SubmitEvent| {
        event.prevent_default();
        set_form_error.set(None);

        let email_value = email.get_untracked().trim().to_string();
        let password_value = password.get_untracked();
        if email_value.is_empty() || password_value.is_empty() {
            set_form_error.set(Some("Email and password are required.".to_string()));
            return;
        }

        login_action.dispatch(LoginInput {
            email: email_value,
            password: password_value,
        });
    };

    let error_message = move || {
        form_error
            .get()
            .or_else(|| auth.last_error.with(|err| err.as_ref().map(ToString::to_string)))
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-gray-50 dark:bg-gray-900 px-4">
            <div class="w-full max-w-sm p-6 bg-white dark:bg-gray-800 border border-gray-200 dark:border-gray-700 rounded-xl shadow-sm">
                <div class="flex flex-col items-center mb-6">
                    <img src="/logo.svg" class="h-10 mb-2" alt="BoraBond" />
                    <h1 class="text-xl font-semibold text-gray-900 dark:text-white">
                        "BoraBond Admin"
                    </h1>
                    <p class="text-sm text-gray-500 dark:text-gray-400">"Sign in to continue"</p>
                </div>

                {move || notice().map(|text| view! {
                    <div class="mb-4">
                        <Alert kind=AlertKind::Info message=text />
                    </div>
                })}

                <form on:submit=on_submit>
                    <div class="mb-5">
                        <label class=LABEL_CLASS for="email">"Email"</label>
                        <input
                            id="email"
                            type="email"
                            class=INPUT_CLASS
                            autocomplete="email"
                            placeholder="admin@borabond.com"
                            required
                            on:input=move |event| set_email.set(event_target_value(&event))
                        />
                    </div>
                    <div class="mb-5">
                        <label class=LABEL_CLASS for="password">"Password"</label>
                        <input
                            id="password"
                            type="password"
                            class=INPUT_CLASS
                            autocomplete="current-password"
                            required
                            on:input=move |event| set_password.set(event_target_value(&event))
                        />
                    </div>
                    <Button button_type="submit" disabled=login_action.pending()>
                        "Sign In"
                    </Button>
                    {move || {
                        login_action
                            .pending()
                            .get()
                            .then_some(view! { <div class="mt-4"><Spinner /></div> })
                    }}
                    {move || {
                        error_message()
                            .map(|message| {
                                view! {
                                    <div class="mt-4">
                                        <Alert kind=AlertKind::Error message=message />
                                    </div>
                                }
                            })
                    }}
                </form>
            </div>
        </div>
    }
}

/// `/` forwards to the dashboard or the login page once the session is known.
#[component]
pub fn HomeRedirect() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    Effect::new(move |_| {
        if auth.is_loading.get() {
            return;
        }
        let target = if auth.is_authenticated.get() {
            crate::routes::paths::DASHBOARD
        } else {
            crate::routes::paths::LOGIN
        };
        navigate(target, Default::default());
    });

    view! {
        <div class="flex justify-center items-center min-h-screen">
            <Spinner />
        </div>
    }
}
