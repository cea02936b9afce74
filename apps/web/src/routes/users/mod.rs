//! Customer administration: list with filters, edit and delete.

mod edit;
mod list;

pub(crate) use list::UsersPage;
