//! Route table. Every dashboard page sits under [`DashboardLayout`], which
//! requires a session; pages needing more than USER wrap themselves in
//! `RequireRole`.

mod bonds;
mod cybrid;
mod dashboard;
mod ledger;
mod login;
mod not_found;
pub(crate) mod paths;
mod purchases;
mod settings;
mod users;

use crate::components::DashboardLayout;
use bonds::BondsPage;
use cybrid::{BookTransfersPage, CybridPage};
use dashboard::DashboardPage;
use ledger::LedgerPage;
use leptos::prelude::*;
use leptos_router::components::{ParentRoute, Route, Routes};
use leptos_router::path;
use login::{HomeRedirect, LoginPage};
use not_found::NotFoundPage;
use purchases::PurchasesPage;
use settings::SettingsPage;
use users::UsersPage;

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <NotFoundPage /> }>
            <Route path=path!("/") view=HomeRedirect />
            <Route path=path!("/login") view=LoginPage />
            <ParentRoute path=path!("/dashboard") view=DashboardLayout>
                <Route path=path!("") view=DashboardPage />
                <Route path=path!("bonds") view=BondsPage />
                <Route path=path!("users") view=UsersPage />
                <Route path=path!("purchases") view=PurchasesPage />
                <Route path=path!("ledger") view=LedgerPage />
                <Route path=path!("book-transfers") view=BookTransfersPage />
                <Route path=path!("cybrid") view=CybridPage />
                <Route path=path!("settings") view=SettingsPage />
                <Route path=path!("*any") view=NotFoundPage />
            </ParentRoute>
        </Routes>
    }
}
