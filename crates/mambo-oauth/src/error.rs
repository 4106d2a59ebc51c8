//! Error types for OAuth 1.0 signing and verification.

use std::str::Utf8Error;

use crate::model::TokenKind;

/// Rejection or failure while signing or verifying an OAuth 1.0 request.
#[derive(Debug, thiserror::Error)]
pub enum OAuthError {
    /// `oauth_version` present and not `1.0`.
    #[error("OAuth version '{0}' not supported")]
    UnsupportedVersion(String),

    /// Missing `oauth_consumer_key` or unknown consumer.
    #[error("invalid consumer: {0}")]
    InvalidConsumer(String),

    /// Required token missing or unknown for the expected kind.
    #[error("invalid {kind} token: {key}")]
    InvalidToken {
        /// Token kind the server expected.
        kind: TokenKind,
        /// Token key from the request (empty when absent).
        key: String,
    },

    /// Required protocol parameter absent.
    #[error("missing {0} parameter, the parameter is required")]
    MissingParameter(&'static str),

    /// Timestamp outside the allowed clock-skew window.
    #[error("expired timestamp, yours {timestamp}, ours {now}")]
    ExpiredTimestamp {
        /// Timestamp sent by the client.
        timestamp: String,
        /// Server clock at verification time.
        now: u64,
    },

    /// Nonce already seen for this consumer and token.
    #[error("nonce already used: {0}")]
    NonceReused(String),

    /// Absent or unregistered `oauth_signature_method`.
    #[error("{}", unsupported_method_message(.method.as_deref(), .supported))]
    UnsupportedSignatureMethod {
        /// Method named by the request, if any.
        method: Option<String>,
        /// Names of the registered methods.
        supported: Vec<String>,
    },

    /// Signature did not verify.
    #[error("invalid signature")]
    InvalidSignature,

    /// Data store failure, forwarded unchanged.
    #[error("data store error")]
    Store(#[from] StoreError),

    /// RSA key loading/parsing error.
    #[error("RSA key error")]
    RsaKey(#[from] RsaKeyError),

    /// Signature computation failed.
    #[error("signing failed: {0}")]
    Signing(String),
}

fn unsupported_method_message(method: Option<&str>, supported: &[String]) -> String {
    match method {
        None => "no signature method parameter, this parameter is required".to_owned(),
        Some(name) => format!(
            "signature method '{name}' not supported, try one of the following: {}",
            supported.join(", ")
        ),
    }
}

/// Error raised by a [`DataStore`](crate::DataStore) implementation.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct StoreError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl StoreError {
    /// Create a store error with a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Human-readable message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// RSA key loading/parsing error.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RsaKeyError {
    /// Invalid UTF-8 in key material.
    #[error("invalid UTF-8 in key")]
    InvalidUtf8(#[from] Utf8Error),

    /// PKCS#1 private or public key parsing error.
    #[error("PKCS#1 key error")]
    Pkcs1(#[from] rsa::pkcs1::Error),

    /// PKCS#8 private key parsing error.
    #[error("PKCS#8 key error")]
    Pkcs8(#[from] rsa::pkcs8::Error),

    /// SPKI public key parsing error.
    #[error("public key error")]
    Spki(#[from] rsa::pkcs8::spki::Error),
}
