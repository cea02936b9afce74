use crate::app_lib::{api, AppError};
use dashboard_model::ledger::LedgerEntry;

pub async fn list_entries() -> Result<Vec<LedgerEntry>, AppError> {
    api::get_envelope("/api/ledger").await
}
