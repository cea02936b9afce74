//! Browser transport for the backend API. Every request goes through
//! [`send`], which applies the configured timeout, attaches the bearer token
//! and hands the raw response to `admin_session::api` for decoding. Typed
//! per-endpoint wrappers live in each feature's `client` module.

use super::{config::AppConfig, storage::session_store};
use admin_session::{
    api::{build_url, decode_ack, decode_envelope, decode_login, request_headers, ResponseBody},
    AppError,
};
use gloo_net::http::{Request, RequestBuilder, Response};
use gloo_timers::callback::Timeout;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};
use web_sys::AbortController;

#[derive(Clone, Copy, Debug)]
enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    fn builder(self, url: &str) -> RequestBuilder {
        match self {
            Self::Get => Request::get(url),
            Self::Post => Request::post(url),
            Self::Put => Request::put(url),
            Self::Delete => Request::delete(url),
        }
    }
}

/// Fetches an enveloped `data` payload.
pub async fn get_envelope<T: DeserializeOwned>(path: &str) -> Result<T, AppError> {
    let (status, body) = send(Method::Get, path, None, stored_token()).await?;
    intercept(decode_envelope(status, body))
}

/// Posts JSON and returns the enveloped `data` payload.
pub async fn post_envelope<B: Serialize, T: DeserializeOwned>(
    path: &str,
    body: &B,
) -> Result<T, AppError> {
    let payload = encode(body)?;
    let (status, body) = send(Method::Post, path, Some(payload), stored_token()).await?;
    intercept(decode_envelope(status, body))
}

/// Posts JSON and returns the backend's `message`, if any.
pub async fn post_ack<B: Serialize>(path: &str, body: &B) -> Result<Option<String>, AppError> {
    let payload = encode(body)?;
    let (status, body) = send(Method::Post, path, Some(payload), stored_token()).await?;
    intercept(decode_ack(status, body))
}

pub async fn put_ack<B: Serialize>(path: &str, body: &B) -> Result<Option<String>, AppError> {
    let payload = encode(body)?;
    let (status, body) = send(Method::Put, path, Some(payload), stored_token()).await?;
    intercept(decode_ack(status, body))
}

pub async fn delete_ack(path: &str) -> Result<Option<String>, AppError> {
    let (status, body) = send(Method::Delete, path, None, stored_token()).await?;
    intercept(decode_ack(status, body))
}

/// `GET` with an explicit token. A 401 is returned to the caller instead of
/// ending the session.
pub async fn get_ack_with_token(path: &str, token: &str) -> Result<Option<String>, AppError> {
    let (status, body) = send(Method::Get, path, None, Some(token.to_string())).await?;
    decode_ack(status, body)
}

/// Posts credentials. A 401 here means bad credentials, not an expired
/// session; it comes back with the backend's message.
pub async fn post_login<B: Serialize, T: DeserializeOwned>(path: &str, body: &B) -> Result<T, AppError> {
    let payload = encode(body)?;
    let (status, body) = send(Method::Post, path, Some(payload), None).await?;
    decode_login(status, body)
}

fn stored_token() -> Option<String> {
    session_store().load().map(|session| session.token().to_string())
}

fn encode<B: Serialize>(body: &B) -> Result<String, AppError> {
    serde_json::to_string(body).map_err(|err| AppError::Serialization(err.to_string()))
}

/// Ends the session on 401: clears every store and reloads the login page.
fn intercept<T>(result: Result<T, AppError>) -> Result<T, AppError> {
    if matches!(result, Err(AppError::Unauthorized)) {
        end_session();
    }
    result
}

fn end_session() {
    let location = web_sys::window().map(|window| window.location());
    let current = location
        .as_ref()
        .and_then(|location| location.pathname().ok())
        .unwrap_or_default();
    let (Some(destination), Some(location)) = (session_store().end_rejected(&current), location)
    else {
        return;
    };
    if let Err(err) = location.set_href(&destination) {
        warn!("failed to redirect to login: {err:?}");
    }
}

/// Maps network errors into `AppError` variants with timeout detection.
fn map_request_error(err: gloo_net::Error, timeout_ms: u32) -> AppError {
    let message = err.to_string();
    let lowered = message.to_lowercase();

    if lowered.contains("timeout") || lowered.contains("abort") {
        AppError::Timeout(timeout_ms)
    } else {
        AppError::Network(message)
    }
}

/// Sends a request with an abort timeout to avoid hanging UI state.
async fn send_with_timeout(
    timeout_ms: u32,
    build_request: impl FnOnce(&web_sys::AbortSignal) -> Result<Request, AppError>,
) -> Result<Response, AppError> {
    let controller = AbortController::new()
        .map_err(|_| AppError::Config("Failed to initialize request timeout.".to_string()))?;
    let signal = controller.signal();
    let timeout_controller = controller.clone();
    let _timeout = Timeout::new(timeout_ms, move || timeout_controller.abort());

    let request = build_request(&signal)?;
    request
        .send()
        .await
        .map_err(|err| map_request_error(err, timeout_ms))
}

async fn send(
    method: Method,
    path: &str,
    payload: Option<String>,
    token: Option<String>,
) -> Result<(u16, ResponseBody), AppError> {
    let config = AppConfig::load();
    let url = build_url(&config.api_base_url, path);
    let headers = request_headers(token.as_deref());

    debug!(method = method.as_str(), path, "api request");
    let response = send_with_timeout(config.request_timeout_ms, |signal| {
        let mut builder = method.builder(&url).abort_signal(Some(signal));
        for (name, value) in &headers {
            builder = builder.header(name, value);
        }
        match payload {
            Some(payload) => builder.body(payload),
            None => builder.build(),
        }
        .map_err(|err| AppError::Serialization(format!("Failed to build request: {err}")))
    })
    .await
    .inspect_err(|err| warn!(method = method.as_str(), path, "api request failed: {err}"))?;

    let status = response.status();
    let content_type = response.headers().get("content-type");
    let text = response.text().await.map_err(|err| AppError::Parse {
        status,
        message: err.to_string(),
    })?;
    debug!(method = method.as_str(), path, status, "api response");

    Ok((status, ResponseBody::from_parts(content_type.as_deref(), text)))
}
