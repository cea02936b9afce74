use thiserror::Error;

/// Failure taxonomy for every dashboard request.
///
/// `status()` follows one convention across variants: `0` means the request
/// never reached the server, `408` is a client-side timeout, anything else
/// is the HTTP status the backend answered with.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),
    #[error(
        "Unable to reach the server ({0}). Make sure the backend is running and accepts requests from this origin (CORS)."
    )]
    Network(String),
    #[error("Request timed out after {0} ms")]
    Timeout(u32),
    #[error("{message}")]
    Http {
        status: u16,
        message: String,
        body: Option<String>,
    },
    #[error("Your session is no longer valid. Please sign in again.")]
    Unauthorized,
    #[error("{message}")]
    Rejected { status: u16, message: String },
    #[error("Unexpected response from server: {message}")]
    Parse { status: u16, message: String },
    #[error("Failed to encode request: {0}")]
    Serialization(String),
    #[error("{0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl AppError {
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::Timeout(_) => 408,
            Self::Http { status, .. }
            | Self::Rejected { status, .. }
            | Self::Parse { status, .. } => *status,
            Self::Unauthorized => 401,
            Self::Config(_)
            | Self::Network(_)
            | Self::Serialization(_)
            | Self::Validation(_)
            | Self::Storage(_) => 0,
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        self.status() == 404
    }

    /// Validation errors are produced locally and never sent anywhere.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("failed to write {key}: {reason}")]
    Write { key: &'static str, reason: String },
    #[error("failed to remove {key}: {reason}")]
    Remove { key: &'static str, reason: String },
    #[error("failed to encode session: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_convention() {
        assert_eq!(AppError::Network("refused".into()).status(), 0);
        assert_eq!(AppError::Timeout(30_000).status(), 408);
        assert_eq!(AppError::Unauthorized.status(), 401);
        let http = AppError::Http {
            status: 404,
            message: "Not found".into(),
            body: None,
        };
        assert_eq!(http.status(), 404);
        assert!(http.is_not_found());
        assert_eq!(AppError::Validation("x".into()).status(), 0);
    }

    #[test]
    fn network_message_has_remediation_hint() {
        let message = AppError::Network("connection refused".into()).to_string();
        assert!(message.contains("backend is running"));
        assert!(message.contains("CORS"));
    }

    #[test]
    fn store_error_converts() {
        let err: AppError = StoreError::Unavailable("no window".into()).into();
        assert!(matches!(err, AppError::Storage(ref m) if m.contains("no window")));
    }
}
