//! Consumer and token credentials.

use std::fmt;

use crate::encode::{encode, parse_pairs};
use crate::error::OAuthError;

/// Registered client application identity.
#[derive(Clone, PartialEq, Eq)]
pub struct Consumer {
    key: String,
    secret: String,
    callback_url: Option<String>,
}

impl Consumer {
    /// Create a consumer from its key and secret.
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
            callback_url: None,
        }
    }

    /// Attach a registered callback URL.
    #[must_use]
    pub fn with_callback_url(mut self, callback_url: impl Into<String>) -> Self {
        self.callback_url = Some(callback_url.into());
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn callback_url(&self) -> Option<&str> {
        self.callback_url.as_deref()
    }
}

impl fmt::Debug for Consumer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Consumer")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .field("callback_url", &self.callback_url)
            .finish()
    }
}

/// Whether a token is a pre-authorization request token or an access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Request,
    Access,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Request => f.write_str("request"),
            Self::Access => f.write_str("access"),
        }
    }
}

/// Request or access credential.
///
/// `Display` renders the token endpoint response body:
/// `oauth_token=<key>&oauth_token_secret=<secret>`.
#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    key: String,
    secret: String,
    kind: TokenKind,
}

impl Token {
    pub fn new(key: impl Into<String>, secret: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
            kind,
        }
    }

    /// Parse a token endpoint response body.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::MissingParameter`] if `oauth_token` or
    /// `oauth_token_secret` is absent.
    pub fn parse(body: &str, kind: TokenKind) -> Result<Self, OAuthError> {
        let params = parse_pairs(body.trim());
        let find = |name: &'static str| {
            params
                .iter()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.clone())
                .ok_or(OAuthError::MissingParameter(name))
        };
        Ok(Self::new(
            find("oauth_token")?,
            find("oauth_token_secret")?,
            kind,
        ))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "oauth_token={}&oauth_token_secret={}",
            encode(&self.key),
            encode(&self.secret)
        )
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .field("kind", &self.kind)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_serialization_encodes() {
        let token = Token::new("key one", "s&cret", TokenKind::Access);
        assert_eq!(
            token.to_string(),
            "oauth_token=key%20one&oauth_token_secret=s%26cret"
        );
    }

    #[test]
    fn test_token_parse_response() {
        let body = "oauth_token=abc%2B123&oauth_token_secret=xyz%3D789&oauth_callback_confirmed=true";
        let token = Token::parse(body, TokenKind::Request).unwrap();
        assert_eq!(token.key(), "abc+123");
        assert_eq!(token.secret(), "xyz=789");
        assert_eq!(token.kind(), TokenKind::Request);
    }

    #[test]
    fn test_token_parse_missing_secret() {
        let err = Token::parse("oauth_token=abc", TokenKind::Access).unwrap_err();
        assert!(matches!(
            err,
            OAuthError::MissingParameter("oauth_token_secret")
        ));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let consumer = Consumer::new("ck", "very-secret");
        let token = Token::new("tk", "token-secret", TokenKind::Access);
        assert!(!format!("{consumer:?}").contains("very-secret"));
        assert!(!format!("{token:?}").contains("token-secret"));
    }
}
