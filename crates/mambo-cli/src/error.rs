//! CLI error types.

use mambo::MamboError;
use mambo_config::ConfigError;
use mambo_oauth::OAuthError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Api(#[from] MamboError),

    #[error("{0}")]
    OAuth(#[from] OAuthError),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
