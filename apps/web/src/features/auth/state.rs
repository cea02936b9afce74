//! Auth session state and context for the frontend. The provider hydrates the
//! session once on mount from browser storage (cookies first, then local
//! storage) and exposes derived signals for guards, layout and routes.

use crate::{
    app_lib::{
        config::{AppConfig, HydrationPolicy},
        storage::session_store,
        AppError,
    },
    features::auth::client,
};
use admin_session::{redirect::logout_destination, AdminUser, LogoutReason, Role, Session};
use leptos::{prelude::*, task::spawn_local};
use tracing::{debug, info, warn};

#[derive(Clone, Copy)]
/// Auth session context shared through Leptos.
pub struct AuthContext {
    pub session: RwSignal<Option<Session>>,
    /// `true` until the stored session has been read back.
    pub is_loading: RwSignal<bool>,
    pub is_authenticated: Signal<bool>,
    /// Why the last login attempt failed.
    pub last_error: RwSignal<Option<AppError>>,
}

impl AuthContext {
    fn new() -> Self {
        let session = RwSignal::new(None::<Session>);
        let is_authenticated = Signal::derive(move || session.with(Option::is_some));
        Self {
            session,
            is_loading: RwSignal::new(true),
            is_authenticated,
            last_error: RwSignal::new(None),
        }
    }

    pub fn user(&self) -> Option<AdminUser> {
        self.session.with(|session| session.as_ref().map(|s| s.user().clone()))
    }

    pub fn role(&self) -> Option<Role> {
        self.session.with(|session| session.as_ref().map(Session::role))
    }

    /// Signs in and persists the session to every store. Failures are logged
    /// and recorded in `last_error`; the current session is left untouched.
    pub async fn login(self, email: String, password: String) -> bool {
        self.last_error.set(None);

        let data = match client::login(&email, &password).await {
            Ok(data) => data,
            Err(err) => {
                warn!("login failed: {err}");
                self.last_error.set(Some(err));
                return false;
            }
        };

        let Some(session) = Session::new(data.token, data.user) else {
            warn!("login response carried an incomplete session");
            self.last_error.set(Some(AppError::Parse {
                status: 200,
                message: "login response is missing the token or user".to_string(),
            }));
            return false;
        };

        if let Err(err) = session_store().save(&session) {
            warn!("failed to persist session: {err}");
            self.last_error.set(Some(err.into()));
            return false;
        }

        info!(user_id = %session.user().id, role = %session.role(), "signed in");
        self.session.set(Some(session));
        true
    }

    /// Clears the session everywhere and reloads the login page, tagged with
    /// `reason` when one is given.
    pub fn logout(self, reason: Option<LogoutReason>) {
        if let Err(err) = session_store().clear() {
            warn!("failed to clear stored session: {err}");
        }
        self.session.set(None);
        info!(reason = reason.map(LogoutReason::code), "signed out");

        let destination = logout_destination(reason);
        match web_sys::window() {
            Some(window) => {
                if let Err(err) = window.location().set_href(&destination) {
                    warn!("failed to navigate to {destination}: {err:?}");
                }
            }
            None => warn!("no window to navigate to {destination}"),
        }
    }
}

/// Provides auth context and hydrates the session once on mount.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let auth = AuthContext::new();
    provide_context(auth);

    let restored = session_store().load();
    let policy = AppConfig::load().hydration_policy();
    debug!(restored = restored.is_some(), ?policy, "session hydrated");

    if let (Some(session), HydrationPolicy::Revalidate) = (&restored, policy) {
        let token = session.token().to_string();
        spawn_local(async move {
            match client::validate_token(&token).await {
                Ok(true) => debug!("stored session is still valid"),
                Ok(false) => {
                    info!("stored session was rejected by the backend");
                    auth.logout(Some(LogoutReason::Unauthorized));
                }
                Err(err) => warn!("could not revalidate stored session, keeping it: {err}"),
            }
        });
    }

    auth.session.set(restored);
    auth.is_loading.set(false);

    view! { {children()} }
}

/// Returns the current auth context or a fallback empty context.
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(AuthContext::new)
}
