use crate::features::{auth::state::AuthProvider, inactivity::InactivityWatcher};
use crate::routes::AppRoutes;
use leptos::prelude::*;
use leptos_router::components::Router;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <Router>
            <AuthProvider>
                <InactivityWatcher />
                <AppRoutes />
            </AuthProvider>
        </Router>
    }
}
