mod alert;
mod button;
mod field;
mod modal;
mod spinner;
mod stat_card;

pub(crate) use alert::{Alert, AlertKind, ErrorPanel};
pub(crate) use button::{Button, ButtonKind};
pub(crate) use field::{Checkbox, TextField};
pub(crate) use modal::Modal;
pub(crate) use spinner::Spinner;
pub(crate) use stat_card::StatCard;
