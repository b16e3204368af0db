use thiserror::Error;

/// Errors surfaced by a generative model call
#[derive(Debug, Error)]
pub enum ModelError {
    /// No credentials were configured, so no request was sent
    #[error("model client is not configured: {0}")]
    NotConfigured(String),

    /// The request did not complete within the per-call timeout
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Transport-level failure (DNS, TLS, connection reset, ...)
    #[error("HTTP error: {0}")]
    Http(String),

    /// The API answered with a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The response body could not be understood
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for ModelError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ModelError::Timeout(err.to_string())
        } else if err.is_decode() {
            ModelError::InvalidResponse(err.to_string())
        } else {
            ModelError::Http(err.to_string())
        }
    }
}

pub type Result<T> = std::result::Result<T, ModelError>;
