//! Shared UI components exported for routes and features.

pub(crate) mod layout;
pub(crate) mod ui;

pub(crate) use layout::DashboardLayout;
pub(crate) use ui::{
    Alert, AlertKind, Button, ButtonKind, Checkbox, ErrorPanel, Modal, Spinner, StatCard, TextField,
};

/// Tailwind classes shared by every text input and select.
pub(crate) const INPUT_CLASS: &str = "bg-gray-50 border border-gray-300 text-gray-900 text-sm rounded-lg focus:ring-blue-500 focus:border-blue-500 block w-full p-2.5 dark:bg-gray-700 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white dark:focus:ring-blue-500 dark:focus:border-blue-500";

pub(crate) const LABEL_CLASS: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";

pub(crate) const TH_CLASS: &str = "px-6 py-3 text-left text-xs font-medium text-gray-500 dark:text-gray-400 uppercase tracking-wider";

pub(crate) const TD_CLASS: &str = "px-6 py-4 whitespace-nowrap text-sm text-gray-700 dark:text-gray-300";

pub(crate) const CARD_CLASS: &str = "overflow-x-auto bg-white dark:bg-gray-800 shadow-sm border border-gray-200 dark:border-gray-700 rounded-lg";
