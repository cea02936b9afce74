//! Route paths and the role each dashboard page requires. The sidebar and
//! the page guards both read from [`NAV`].

pub use admin_session::redirect::{DASHBOARD_PATH as DASHBOARD, LOGIN_PATH as LOGIN};
use admin_session::{role_satisfies, Role};

pub const BONDS: &str = "/dashboard/bonds";
pub const USERS: &str = "/dashboard/users";
pub const PURCHASES: &str = "/dashboard/purchases";
pub const LEDGER: &str = "/dashboard/ledger";
pub const BOOK_TRANSFERS: &str = "/dashboard/book-transfers";
pub const CYBRID: &str = "/dashboard/cybrid";
pub const SETTINGS: &str = "/dashboard/settings";

pub struct NavItem {
    pub path: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
    pub role: Role,
}

pub const NAV: [NavItem; 8] = [
    NavItem { path: DASHBOARD, label: "Dashboard", icon: "dashboard", role: Role::User },
    NavItem { path: BONDS, label: "Bonds", icon: "account_balance", role: Role::User },
    NavItem { path: USERS, label: "Users", icon: "group", role: Role::Admin },
    NavItem { path: PURCHASES, label: "Purchases", icon: "shopping_cart", role: Role::User },
    NavItem { path: LEDGER, label: "Ledger", icon: "receipt_long", role: Role::User },
    NavItem { path: BOOK_TRANSFERS, label: "Book Transfers", icon: "swap_horiz", role: Role::Admin },
    NavItem { path: CYBRID, label: "Cybrid Trades", icon: "currency_exchange", role: Role::Admin },
    NavItem { path: SETTINGS, label: "Settings", icon: "settings", role: Role::SuperAdmin },
];

/// Role needed for `path`; unknown paths need none beyond a session.
pub fn required_role(path: &str) -> Role {
    NAV.iter()
        .find(|item| item.path == path)
        .map_or(Role::User, |item| item.role)
}

pub fn visible_nav(role: Role) -> impl Iterator<Item = &'static NavItem> {
    NAV.iter().filter(move |item| role_satisfies(item.role, role))
}

/// The overview matches exactly, every other entry by prefix.
pub fn is_active(item_path: &str, current: &str) -> bool {
    if item_path == DASHBOARD {
        current == DASHBOARD || current == "/dashboard/"
    } else {
        current == item_path || current.starts_with(&format!("{item_path}/"))
    }
}
