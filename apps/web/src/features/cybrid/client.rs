use crate::app_lib::{api, AppError};
use dashboard_model::cybrid::{
    customer_id_path, CustomerIdMapping, CybridCustomer, FinalizeTradeRequest, TradeRequest,
    TransferRequest, FINALIZE_TRADE_PATH, TRADE_PATH, TRANSFER_PATH,
};

pub async fn list_customers() -> Result<Vec<CybridCustomer>, AppError> {
    api::get_envelope("/api/bonds/customers").await
}

pub async fn fetch_customer_id(user_id: &str) -> Result<CustomerIdMapping, AppError> {
    api::get_envelope(&customer_id_path(user_id)).await
}

pub async fn create_transfer(request: &TransferRequest) -> Result<Option<String>, AppError> {
    api::post_ack(TRANSFER_PATH, request).await
}

pub async fn create_trade(request: &TradeRequest) -> Result<Option<String>, AppError> {
    api::post_ack(TRADE_PATH, request).await
}

pub async fn finalize_trade(request: &FinalizeTradeRequest) -> Result<Option<String>, AppError> {
    api::post_ack(FINALIZE_TRADE_PATH, request).await
}
