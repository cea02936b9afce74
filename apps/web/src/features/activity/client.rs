use crate::app_lib::{api, AppError};
use dashboard_model::activity::{ActivityQuery, RecentActivity};

/// Unfiltered queries hit the plain feed, anything else the filtered one.
pub async fn recent_activity(query: ActivityQuery) -> Result<Vec<RecentActivity>, AppError> {
    api::get_envelope(&query.path()).await
}
