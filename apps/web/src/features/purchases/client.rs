use crate::app_lib::{api, AppError};
use dashboard_model::purchases::{CreatePurchaseRequest, NextPayment, Purchase};

pub async fn list_purchases() -> Result<Vec<Purchase>, AppError> {
    api::get_envelope("/api/bonds/purchases").await
}

pub async fn next_payment() -> Result<NextPayment, AppError> {
    api::get_envelope("/api/bonds/purchases/next-payment").await
}

pub async fn create_purchase(request: &CreatePurchaseRequest) -> Result<Option<String>, AppError> {
    api::post_ack("/api/bonds/purchase", request).await
}
