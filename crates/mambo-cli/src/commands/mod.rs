//! CLI command implementations.

pub(crate) mod request;
pub(crate) mod sign;
pub(crate) mod verify;

use std::path::PathBuf;

use clap::Args;
use mambo_config::{CliSettings, Config, SignatureMethodKind};
use mambo_oauth::{HmacSha1, Plaintext, SignatureMethod, Token, TokenKind};
use tracing::debug;

pub(crate) use request::RequestArgs;
pub(crate) use sign::SignArgs;
pub(crate) use verify::VerifyArgs;

use crate::error::CliError;

/// Connection and credential options shared by all commands.
#[derive(Args, Debug, Default)]
pub(crate) struct ApiArgs {
    /// Path to configuration file (default: auto-discover mambo.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// API server URL (overrides config).
    #[arg(long, env = "MAMBO_SERVER_URL")]
    server_url: Option<String>,

    /// Public key (overrides config).
    #[arg(long, env = "MAMBO_PUBLIC_KEY")]
    public_key: Option<String>,

    /// Private key (overrides config).
    #[arg(long, env = "MAMBO_PRIVATE_KEY", hide_env_values = true)]
    private_key: Option<String>,

    /// Request timeout in seconds (overrides config).
    #[arg(long)]
    timeout: Option<u64>,

    /// HMAC-SHA1 or PLAINTEXT (overrides config).
    #[arg(long, value_parser = parse_signature_method)]
    signature_method: Option<SignatureMethodKind>,
}

impl ApiArgs {
    /// Load the configuration with these options applied on top.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            server_url: self.server_url.clone(),
            public_key: self.public_key.clone(),
            private_key: self.private_key.clone(),
            timeout_secs: self.timeout,
            signature_method: self.signature_method,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        debug!(
            config_path = ?config.config_path,
            server_url = %config.api.server_url,
            signature_method = %config.api.signature_method,
            "Loaded configuration"
        );
        Ok(config)
    }
}

/// Access token for three-legged requests.
#[derive(Args, Debug, Default)]
pub(crate) struct TokenArgs {
    /// Access token key.
    #[arg(long, requires = "token_secret")]
    token: Option<String>,

    /// Access token secret.
    #[arg(long, requires = "token", hide_env_values = true, env = "MAMBO_TOKEN_SECRET")]
    token_secret: Option<String>,
}

impl TokenArgs {
    pub(crate) fn token(&self) -> Option<Token> {
        match (&self.token, &self.token_secret) {
            (Some(key), Some(secret)) => {
                Some(Token::new(key.as_str(), secret.as_str(), TokenKind::Access))
            }
            _ => None,
        }
    }
}

fn parse_signature_method(value: &str) -> Result<SignatureMethodKind, String> {
    value.parse().map_err(|e: mambo_config::ConfigError| e.to_string())
}

pub(crate) fn signature_method(kind: SignatureMethodKind) -> Box<dyn SignatureMethod> {
    match kind {
        SignatureMethodKind::HmacSha1 => Box::new(HmacSha1),
        SignatureMethodKind::Plaintext => Box::new(Plaintext),
    }
}
