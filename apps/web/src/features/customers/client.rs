//! Client helpers for the customer endpoints. Authorization is enforced by
//! the backend; these only keep the paths in one place.

use crate::app_lib::{api, AppError};
use admin_session::cookies::encode_component;
use dashboard_model::customers::{Customer, CustomerUpdate};

const CUSTOMERS_PATH: &str = "/api/bonds/customers";

fn customer_path(user_id: &str) -> Result<String, AppError> {
    let trimmed = user_id.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("Customer id is required.".to_string()));
    }
    Ok(format!("{CUSTOMERS_PATH}/{}", encode_component(trimmed)))
}

pub async fn list_customers() -> Result<Vec<Customer>, AppError> {
    api::get_envelope(CUSTOMERS_PATH).await
}

/// Validates the form before anything is sent.
pub async fn update_customer(user_id: &str, update: &CustomerUpdate) -> Result<Option<String>, AppError> {
    update.validate()?;
    api::put_ack(&customer_path(user_id)?, update).await
}

pub async fn delete_customer(user_id: &str) -> Result<Option<String>, AppError> {
    api::delete_ack(&customer_path(user_id)?).await
}
