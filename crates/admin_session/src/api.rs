//! Transport-independent half of the API client: URL building, headers,
//! body normalisation and the mapping from HTTP outcomes to [`AppError`].
//! The browser transport in `apps/web` feeds raw responses through here.

use crate::error::AppError;
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;

pub const DEFAULT_API_URL: &str = "http://localhost:9000";
pub const DEFAULT_TIMEOUT_MS: u32 = 30_000;
const MAX_ERROR_CHARS: usize = 200;

/// Join a base URL and a path with exactly one slash between them.
#[must_use]
pub fn build_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Validate an API base URL and strip its trailing slash.
///
/// # Errors
/// `Config` when the value is not an absolute `http`/`https` URL.
pub fn normalize_base_url(raw: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    let parsed = url::Url::parse(trimmed)
        .map_err(|err| AppError::Config(format!("invalid API URL `{trimmed}`: {err}")))?;
    match parsed.scheme() {
        "http" | "https" if parsed.has_host() => Ok(trimmed.trim_end_matches('/').to_string()),
        _ => Err(AppError::Config(format!(
            "API URL must be an absolute http(s) URL: `{trimmed}`"
        ))),
    }
}

/// Headers sent with every request. `Authorization` is present iff a
/// non-empty token is available.
#[must_use]
pub fn request_headers(token: Option<&str>) -> Vec<(&'static str, String)> {
    let mut headers = vec![
        ("Content-Type", "application/json".to_string()),
        ("Accept", "application/json".to_string()),
    ];
    if let Some(token) = token.filter(|token| !token.is_empty()) {
        headers.push(("Authorization", format!("Bearer {token}")));
    }
    headers
}

/// A response body, normalised regardless of content type.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(Value),
    Text(String),
    Empty,
}

impl ResponseBody {
    /// JSON content types are parsed; a JSON body that fails to parse is kept
    /// as text so the error path can still show it.
    #[must_use]
    pub fn from_parts(content_type: Option<&str>, text: String) -> Self {
        if text.trim().is_empty() {
            return Self::Empty;
        }
        let is_json = content_type.is_some_and(|ct| ct.to_ascii_lowercase().contains("json"));
        if is_json {
            serde_json::from_str(&text).map_or(Self::Text(text), Self::Json)
        } else {
            Self::Text(text)
        }
    }

    fn field(&self, name: &str) -> Option<String> {
        match self {
            Self::Json(value) => value
                .get(name)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            Self::Text(_) | Self::Empty => None,
        }
    }

    fn raw(&self) -> Option<String> {
        match self {
            Self::Json(value) => Some(value.to_string()),
            Self::Text(text) => Some(text.clone()),
            Self::Empty => None,
        }
    }
}

/// Error text precedence: body `message`, body `error`, text body,
/// `HTTP <status>`.
#[must_use]
pub fn error_message(status: u16, body: &ResponseBody) -> String {
    body.field("message")
        .or_else(|| body.field("error"))
        .or_else(|| match body {
            ResponseBody::Text(text) if !text.trim().is_empty() => Some(sanitize(text)),
            _ => None,
        })
        .unwrap_or_else(|| format!("HTTP {status}"))
}

fn sanitize(body: &str) -> String {
    body.trim().chars().take(MAX_ERROR_CHARS).collect()
}

/// Map a completed HTTP exchange to a body or an error.
///
/// # Errors
/// `Unauthorized` for 401, `Http` for any other non-2xx status.
pub fn check_status(status: u16, body: ResponseBody) -> Result<ResponseBody, AppError> {
    if status == 401 {
        return Err(AppError::Unauthorized);
    }
    if (200..300).contains(&status) {
        return Ok(body);
    }
    Err(AppError::Http {
        status,
        message: error_message(status, &body),
        body: body.raw().map(|raw| sanitize(&raw)),
    })
}

/// Standard backend envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap `data`, treating `success: false` as a rejection.
    ///
    /// # Errors
    /// `Rejected` when the backend reports failure, `Parse` when `data` is
    /// missing from a successful envelope.
    pub fn into_data(self, status: u16) -> Result<T, AppError> {
        if !self.success {
            return Err(self.rejection(status));
        }
        self.data.ok_or_else(|| AppError::Parse {
            status,
            message: "response is missing `data`".to_string(),
        })
    }

    /// Accept an envelope without caring about `data`.
    ///
    /// # Errors
    /// `Rejected` when the backend reports failure.
    pub fn into_ack(self, status: u16) -> Result<Option<String>, AppError> {
        if self.success {
            Ok(self.message)
        } else {
            Err(self.rejection(status))
        }
    }

    fn rejection(self, status: u16) -> AppError {
        AppError::Rejected {
            status,
            message: self
                .message
                .or(self.error)
                .unwrap_or_else(|| "Request was rejected by the server".to_string()),
        }
    }
}

/// Decode a successful body into `T`.
///
/// # Errors
/// `Parse` when the body is not JSON or does not match `T`.
pub fn decode<T: DeserializeOwned>(status: u16, body: ResponseBody) -> Result<T, AppError> {
    let value = match body {
        ResponseBody::Json(value) => value,
        ResponseBody::Empty => Value::Null,
        ResponseBody::Text(text) => {
            return Err(AppError::Parse {
                status,
                message: format!("expected JSON, got: {}", sanitize(&text)),
            })
        }
    };
    serde_json::from_value(value).map_err(|err| AppError::Parse {
        status,
        message: err.to_string(),
    })
}

/// Full pipeline for enveloped endpoints: status check, decode, unwrap.
///
/// # Errors
/// Any error from [`check_status`], [`decode`] or [`ApiEnvelope::into_data`].
pub fn decode_envelope<T: DeserializeOwned>(status: u16, body: ResponseBody) -> Result<T, AppError> {
    let body = check_status(status, body)?;
    decode::<ApiEnvelope<T>>(status, body)?.into_data(status)
}

/// Like [`decode_envelope`] for endpoints whose `data` is irrelevant.
/// A 2xx with no body is an ack without a message; a plain-text body is
/// taken as the message.
///
/// # Errors
/// Any error from [`check_status`], [`decode`] or [`ApiEnvelope::into_ack`].
pub fn decode_ack(status: u16, body: ResponseBody) -> Result<Option<String>, AppError> {
    match check_status(status, body)? {
        ResponseBody::Empty => Ok(None),
        ResponseBody::Text(text) => Ok(Some(sanitize(&text))),
        body @ ResponseBody::Json(_) => decode::<ApiEnvelope<Value>>(status, body)?.into_ack(status),
    }
}

/// [`decode_envelope`] for the credentials exchange. A 401 there means the
/// credentials were refused, so the backend's explanation is kept instead of
/// becoming [`AppError::Unauthorized`].
///
/// # Errors
/// `Http` with status 401 for refused credentials, otherwise as
/// [`decode_envelope`].
pub fn decode_login<T: DeserializeOwned>(status: u16, body: ResponseBody) -> Result<T, AppError> {
    if status == 401 {
        let message = Some(error_message(status, &body))
            .filter(|message| message != "HTTP 401")
            .unwrap_or_else(|| "Invalid email or password".to_string());
        return Err(AppError::Http {
            status,
            message,
            body: body.raw().map(|raw| sanitize(&raw)),
        });
    }
    decode_envelope(status, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn url_joining() {
        assert_eq!(build_url("http://localhost:9000/", "/api/bonds"), "http://localhost:9000/api/bonds");
        assert_eq!(build_url("http://api", "api/ledger"), "http://api/api/ledger");
        assert_eq!(build_url("", "/api/bonds"), "/api/bonds");
    }

    #[test]
    fn base_url_validation() {
        assert_eq!(
            normalize_base_url(" https://api.borabond.com/ ").unwrap(),
            "https://api.borabond.com"
        );
        assert!(normalize_base_url("localhost:9000").is_err());
        assert!(normalize_base_url("ftp://files.example").is_err());
    }

    #[test]
    fn bearer_only_with_token() {
        let with = request_headers(Some("a.b.c"));
        assert!(with.contains(&("Authorization", "Bearer a.b.c".to_string())));
        assert!(!request_headers(None).iter().any(|(name, _)| *name == "Authorization"));
        assert!(!request_headers(Some("")).iter().any(|(name, _)| *name == "Authorization"));
    }

    #[test]
    fn body_normalisation() {
        assert_eq!(
            ResponseBody::from_parts(Some("application/json; charset=utf-8"), r#"{"a":1}"#.into()),
            ResponseBody::Json(json!({"a": 1}))
        );
        assert_eq!(
            ResponseBody::from_parts(Some("text/html"), "<h1>oops</h1>".into()),
            ResponseBody::Text("<h1>oops</h1>".into())
        );
        assert_eq!(
            ResponseBody::from_parts(Some("application/json"), "{bad".into()),
            ResponseBody::Text("{bad".into())
        );
        assert_eq!(ResponseBody::from_parts(None, "  ".into()), ResponseBody::Empty);
    }

    #[test]
    fn error_message_precedence() {
        let both = ResponseBody::Json(json!({"message": "m", "error": "e"}));
        assert_eq!(error_message(400, &both), "m");
        let error_only = ResponseBody::Json(json!({"error": "e"}));
        assert_eq!(error_message(400, &error_only), "e");
        assert_eq!(error_message(502, &ResponseBody::Text("Bad gateway".into())), "Bad gateway");
        assert_eq!(error_message(500, &ResponseBody::Empty), "HTTP 500");
        assert_eq!(error_message(500, &ResponseBody::Json(json!({}))), "HTTP 500");
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            check_status(401, ResponseBody::Empty),
            Err(AppError::Unauthorized)
        );
        let err = check_status(404, ResponseBody::Json(json!({"message": "No such customer"})))
            .unwrap_err();
        assert_eq!(err.status(), 404);
        assert_eq!(err.to_string(), "No such customer");
        assert!(check_status(204, ResponseBody::Empty).is_ok());
    }

    #[test]
    fn envelope_unwrapping() {
        let ok = ResponseBody::Json(json!({"success": true, "data": [1, 2], "count": 2}));
        let data: Vec<u32> = decode_envelope(200, ok).unwrap();
        assert_eq!(data, vec![1, 2]);

        let rejected = ResponseBody::Json(json!({"success": false, "message": "Insufficient bond availability"}));
        let err = decode_envelope::<Vec<u32>>(200, rejected).unwrap_err();
        assert_eq!(
            err,
            AppError::Rejected {
                status: 200,
                message: "Insufficient bond availability".into()
            }
        );

        let missing = ResponseBody::Json(json!({"success": true}));
        assert!(matches!(
            decode_envelope::<Vec<u32>>(200, missing),
            Err(AppError::Parse { .. })
        ));
    }

    #[test]
    fn ack_ignores_data() {
        let ok = ResponseBody::Json(json!({"success": true, "message": "Deleted"}));
        assert_eq!(decode_ack(200, ok).unwrap().as_deref(), Some("Deleted"));
    }

    #[test]
    fn ack_accepts_bodiless_and_text_success() {
        assert_eq!(decode_ack(204, ResponseBody::Empty), Ok(None));
        assert_eq!(
            decode_ack(200, ResponseBody::Text("Deleted".into())).unwrap().as_deref(),
            Some("Deleted")
        );
        assert!(matches!(
            decode_ack(500, ResponseBody::Empty),
            Err(AppError::Http { status: 500, .. })
        ));
    }

    #[test]
    fn refused_login_keeps_backend_message() {
        let refused = ResponseBody::Json(json!({"success": false, "message": "Invalid email or password"}));
        let err = decode_login::<Value>(401, refused).unwrap_err();
        assert_eq!(err.status(), 401);
        assert_eq!(err.to_string(), "Invalid email or password");

        let bare = decode_login::<Value>(401, ResponseBody::Empty).unwrap_err();
        assert_eq!(bare.to_string(), "Invalid email or password");

        // Data fetches still treat 401 as an ended session.
        let fetch = decode_envelope::<Value>(401, ResponseBody::Json(json!({"message": "Token expired"})));
        assert_eq!(fetch, Err(AppError::Unauthorized));
    }

    #[test]
    fn envelope_without_data_field_decodes_to_none() {
        let envelope: ApiEnvelope<Vec<u32>> =
            serde_json::from_value(json!({"success": true, "message": "ok"})).unwrap();
        assert!(envelope.data.is_none());
    }

    #[test]
    fn text_success_body_is_a_parse_error() {
        let err = decode::<Value>(200, ResponseBody::Text("OK".into())).unwrap_err();
        assert!(matches!(err, AppError::Parse { status: 200, .. }));
    }
}
