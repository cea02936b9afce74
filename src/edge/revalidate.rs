//! Optional backend check of the session token, used when the shallow
//! cookie check is not enough.

use crate::APP_USER_AGENT;
use admin_session::api::build_url;
use anyhow::Result;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

pub const VALIDATE_TOKEN_PATH: &str = "/api/admin/validate-token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
    Rejected,
    /// Backend did not answer in time or at all.
    Unreachable,
}

#[derive(Deserialize)]
struct Envelope {
    #[serde(default = "default_success")]
    success: bool,
}

const fn default_success() -> bool {
    true
}

#[derive(Debug, Clone)]
pub struct Revalidator {
    client: Client,
    url: String,
}

impl Revalidator {
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(api_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            url: build_url(api_url, VALIDATE_TOKEN_PATH),
        })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Ask the backend whether `token` is still good.
    pub async fn check(&self, token: &str) -> Verdict {
        let response = match self.client.get(&self.url).bearer_auth(token).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!("Token revalidation failed: {err}");
                return Verdict::Unreachable;
            }
        };

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            debug!(%status, "Backend rejected session token");
            return Verdict::Rejected;
        }
        if !status.is_success() {
            warn!(%status, "Unexpected token revalidation status");
            return Verdict::Unreachable;
        }

        match response.json::<Envelope>().await {
            Ok(Envelope { success: true }) => Verdict::Valid,
            Ok(Envelope { success: false }) => Verdict::Rejected,
            // A 2xx without a JSON envelope still means the token was accepted.
            Err(_) => Verdict::Valid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        let revalidator =
            Revalidator::new("https://api.borabond.com/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            revalidator.url(),
            "https://api.borabond.com/api/admin/validate-token"
        );
    }

    async fn fake_backend() -> String {
        use axum::{
            http::{HeaderMap, StatusCode},
            routing::get,
            Json, Router,
        };

        let app = Router::new().route(
            VALIDATE_TOKEN_PATH,
            get(|headers: HeaderMap| async move {
                match headers.get("authorization").and_then(|v| v.to_str().ok()) {
                    Some("Bearer good.token.sig") => {
                        (StatusCode::OK, Json(serde_json::json!({"success": true})))
                    }
                    Some("Bearer stale.token.sig") => {
                        (StatusCode::OK, Json(serde_json::json!({"success": false})))
                    }
                    _ => (
                        StatusCode::UNAUTHORIZED,
                        Json(serde_json::json!({"message": "Invalid token"})),
                    ),
                }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_backend_verdicts() {
        let revalidator = Revalidator::new(&fake_backend().await, Duration::from_secs(2)).unwrap();
        assert_eq!(revalidator.check("good.token.sig").await, Verdict::Valid);
        assert_eq!(revalidator.check("stale.token.sig").await, Verdict::Rejected);
        assert_eq!(revalidator.check("forged.token.sig").await, Verdict::Rejected);
    }

    #[tokio::test]
    async fn test_unreachable_backend() {
        // Port 9 (discard) on loopback is not expected to serve HTTP.
        let revalidator = Revalidator::new("http://127.0.0.1:9", Duration::from_millis(300)).unwrap();
        assert_eq!(revalidator.check("a.b.c").await, Verdict::Unreachable);
    }
}
