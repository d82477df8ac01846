//! Error types for the management client.

use thiserror::Error;

/// Errors surfaced by the REST layer.
///
/// Remote failures keep whatever status/code the service supplied; nothing is
/// retried or reinterpreted at this level.
#[derive(Error, Debug)]
pub enum RestError {
    #[error("authentication failed: check the configured token")]
    AuthenticationFailed,

    #[error("404 Not Found: the requested resource does not exist")]
    NotFound,

    #[error("HTTP {code}: {message}")]
    Api { code: u16, message: String },

    #[error("server error (5xx): {0}")]
    Server(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("unexpected response body: {0}")]
    Deserialize(#[from] serde_json::Error),

    #[error("invalid base URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type for management client operations.
pub type Result<T> = std::result::Result<T, RestError>;
