//! Error types for Mambo API calls.

/// Error from Mambo API operations.
#[derive(Debug, thiserror::Error)]
pub enum MamboError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// Request signing error.
    #[error("OAuth error")]
    OAuth(#[from] mambo_oauth::OAuthError),

    /// Invalid client configuration.
    #[error("configuration error")]
    Config(#[from] mambo_config::ConfigError),

    /// Argument rejected before any request was made.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
