//! Client wrappers for the admin auth endpoints.

use crate::app_lib::{api, AppError};
use admin_session::session::{LoginData, LoginRequest};
use serde::Serialize;
use wasm_bindgen::JsValue;

const LOGIN_PATH: &str = "/api/admin/login";
const VALIDATE_TOKEN_PATH: &str = "/api/admin/validate-token";
const UPDATE_ACTIVITY_PATH: &str = "/api/admin/update-activity";

/// Exchanges credentials for a token and the admin user.
pub async fn login(email: &str, password: &str) -> Result<LoginData, AppError> {
    api::post_login(LOGIN_PATH, &LoginRequest { email, password }).await
}

/// `Ok(false)` when the backend rejects the token; transport failures are
/// returned as errors so the caller can decide.
pub async fn validate_token(token: &str) -> Result<bool, AppError> {
    match api::get_ack_with_token(VALIDATE_TOKEN_PATH, token).await {
        Ok(_) => Ok(true),
        Err(AppError::Unauthorized | AppError::Rejected { .. }) => Ok(false),
        Err(AppError::Http { status: 403, .. }) => Ok(false),
        Err(err) => Err(err),
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActivityHeartbeat {
    last_activity: String,
}

/// Tells the backend when the admin was last active.
pub async fn update_activity(at_ms: u64) -> Result<(), AppError> {
    let last_activity: String = js_sys::Date::new(&JsValue::from_f64(at_ms as f64))
        .to_iso_string()
        .into();
    api::post_ack(UPDATE_ACTIVITY_PATH, &ActivityHeartbeat { last_activity })
        .await
        .map(|_| ())
}
