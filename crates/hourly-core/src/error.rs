use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("authentication expired; log in again")]
    AuthenticationExpired,
    #[error("token refresh failed: {reason}")]
    TokenRefreshFailed { reason: String },
    #[error("request failed: {status} {message}")]
    Http {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] TokenStoreError),
    #[error("refusing to use http:// without --insecure: {0}")]
    InsecureAddress(String),
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

impl ClientError {
    pub fn refresh_failed(reason: impl Into<String>) -> Self {
        Self::TokenRefreshFailed {
            reason: reason.into(),
        }
    }

    /// True for the errors that end the session and need a new login.
    pub fn is_session_error(&self) -> bool {
        matches!(
            self,
            Self::AuthenticationExpired | Self::TokenRefreshFailed { .. }
        )
    }

    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(err) => err.status(),
            _ => None,
        }
    }
}

#[derive(Debug, Error, Clone)]
pub enum TokenStoreError {
    #[error("token store unavailable: {0}")]
    Unavailable(String),
    #[error("failed to write {key}: {message}")]
    Write { key: String, message: String },
    #[error("failed to read {key}: {message}")]
    Read { key: String, message: String },
}
