use crate::app_lib::{api, AppError};
use dashboard_model::bonds::Bond;

pub async fn list_bonds() -> Result<Vec<Bond>, AppError> {
    api::get_envelope("/api/bonds").await
}
