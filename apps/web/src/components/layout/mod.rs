//! Layout components shared across routes.

mod app_shell;
mod dashboard_layout;
mod sidebar;

pub(crate) use app_shell::AppShell;
pub(crate) use dashboard_layout::DashboardLayout;
pub(crate) use sidebar::Sidebar;
