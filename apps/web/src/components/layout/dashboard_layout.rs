use crate::{components::layout::AppShell, features::auth::RequireRole};
use admin_session::Role;
use leptos::prelude::*;
use leptos_router::components::Outlet;

/// Parent of every `/dashboard` page: any signed-in admin gets the shell,
/// pages add their own role requirement on top.
#[component]
pub fn DashboardLayout() -> impl IntoView {
    view! {
        <RequireRole role=Role::User>
            <AppShell>
                <Outlet />
            </AppShell>
        </RequireRole>
    }
}
