//! Configuration management for the Mambo SDK.
//!
//! Parses `mambo.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `api.server_url`
//! - `api.public_key`
//! - `api.private_key`

mod expand;

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override API server URL.
    pub server_url: Option<String>,
    /// Override API public key.
    pub public_key: Option<String>,
    /// Override API private key.
    pub private_key: Option<String>,
    /// Override request timeout.
    pub timeout_secs: Option<u64>,
    /// Override request signature method.
    pub signature_method: Option<SignatureMethodKind>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mambo.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Mambo API connection settings.
    pub api: ApiConfig,
    /// OAuth verification settings.
    pub oauth: OAuthConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Signature method used to sign outgoing API requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum SignatureMethodKind {
    #[default]
    #[serde(rename = "HMAC-SHA1")]
    HmacSha1,
    #[serde(rename = "PLAINTEXT")]
    Plaintext,
}

impl SignatureMethodKind {
    /// Wire name (`oauth_signature_method` value).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::HmacSha1 => "HMAC-SHA1",
            Self::Plaintext => "PLAINTEXT",
        }
    }
}

impl fmt::Display for SignatureMethodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SignatureMethodKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HMAC-SHA1" => Ok(Self::HmacSha1),
            "PLAINTEXT" => Ok(Self::Plaintext),
            other => Err(ConfigError::Validation(format!(
                "unsupported signature method '{other}', expected HMAC-SHA1 or PLAINTEXT"
            ))),
        }
    }
}

/// Mambo API connection configuration.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API server base URL.
    pub server_url: String,
    /// Public key, used as the OAuth consumer key.
    pub public_key: String,
    /// Private key, used as the OAuth consumer secret.
    pub private_key: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Signature method for outgoing requests.
    pub signature_method: SignatureMethodKind,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            server_url: "https://api.mambo.io".to_owned(),
            public_key: String::new(),
            private_key: String::new(),
            timeout_secs: 30,
            signature_method: SignatureMethodKind::default(),
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("server_url", &self.server_url)
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .field("signature_method", &self.signature_method)
            .finish()
    }
}

impl ApiConfig {
    /// Validate that the credentials are set and the URL is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any field is empty or has invalid format.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server_url, "api.server_url")?;
        require_http_url(&self.server_url, "api.server_url")?;
        require_non_empty(&self.public_key, "api.public_key")?;
        require_non_empty(&self.private_key, "api.private_key")?;
        if self.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs cannot be 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// OAuth verification configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OAuthConfig {
    /// Allowed clock skew between client and server, in seconds.
    pub timestamp_threshold_secs: u64,
}

impl Default for OAuthConfig {
    fn default() -> Self {
        Self {
            timestamp_threshold_secs: 300,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`api.private_key`").
        field: String,
        /// Error message (e.g., "${`MAMBO_PRIVATE_KEY`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mambo.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied after loading, allowing CLI arguments to take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(server_url) = &settings.server_url {
            self.api.server_url.clone_from(server_url);
        }
        if let Some(public_key) = &settings.public_key {
            self.api.public_key.clone_from(public_key);
        }
        if let Some(private_key) = &settings.private_key {
            self.api.private_key.clone_from(private_key);
        }
        if let Some(timeout_secs) = settings.timeout_secs {
            self.api.timeout_secs = timeout_secs;
        }
        if let Some(signature_method) = settings.signature_method {
            self.api.signature_method = signature_method;
        }
    }

    /// Get validated API configuration.
    ///
    /// Use this instead of accessing the `api` field directly when the command
    /// talks to the Mambo API.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if credentials are missing or invalid.
    pub fn require_api(&self) -> Result<&ApiConfig, ConfigError> {
        self.api.validate()?;
        Ok(&self.api)
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Credentials are only checked by [`require_api`](Self::require_api), so
    /// commands that never call the API work without them.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.api.server_url, "api.server_url")?;
        require_http_url(&self.api.server_url, "api.server_url")?;
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "api.timeout_secs cannot be 0".to_owned(),
            ));
        }
        if self.oauth.timestamp_threshold_secs == 0 {
            return Err(ConfigError::Validation(
                "oauth.timestamp_threshold_secs cannot be 0".to_owned(),
            ));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.api.server_url = expand::expand_env(&self.api.server_url, "api.server_url")?;
        self.api.public_key = expand::expand_env(&self.api.public_key, "api.public_key")?;
        self.api.private_key = expand::expand_env(&self.api.private_key, "api.private_key")?;
        Ok(())
    }
}

/// Search for config file in `start` and its parents.
fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILENAME);
        if candidate.exists() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}
