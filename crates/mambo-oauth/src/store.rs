//! Persistence port for consumers, tokens and nonces.

use crate::error::StoreError;
use crate::model::{Consumer, Token, TokenKind};

/// Lookups and token issuance backing an [`OAuthServer`](crate::OAuthServer).
///
/// Implemented by the host application. Calls may block; every method
/// returns `Result` so backend failures reach the caller unchanged.
/// `Ok(None)` from a lookup means "not found".
pub trait DataStore: Send + Sync {
    /// Find a registered consumer by key.
    fn lookup_consumer(&self, consumer_key: &str) -> Result<Option<Consumer>, StoreError>;

    /// Find a token of the given kind issued to `consumer`.
    fn lookup_token(
        &self,
        consumer: &Consumer,
        kind: TokenKind,
        token_key: &str,
    ) -> Result<Option<Token>, StoreError>;

    /// Record a nonce, returning `true` if it had already been seen for this
    /// consumer and token.
    fn lookup_nonce(
        &self,
        consumer: &Consumer,
        token: Option<&Token>,
        nonce: &str,
        timestamp: &str,
    ) -> Result<bool, StoreError>;

    /// Issue a request token.
    fn new_request_token(
        &self,
        consumer: &Consumer,
        callback: Option<&str>,
    ) -> Result<Token, StoreError>;

    /// Exchange a request token for an access token.
    ///
    /// Must invalidate `request_token` atomically with issuing the new token.
    fn new_access_token(
        &self,
        request_token: &Token,
        consumer: &Consumer,
        verifier: Option<&str>,
    ) -> Result<Token, StoreError>;
}

impl<S: DataStore + ?Sized> DataStore for std::sync::Arc<S> {
    fn lookup_consumer(&self, consumer_key: &str) -> Result<Option<Consumer>, StoreError> {
        (**self).lookup_consumer(consumer_key)
    }

    fn lookup_token(
        &self,
        consumer: &Consumer,
        kind: TokenKind,
        token_key: &str,
    ) -> Result<Option<Token>, StoreError> {
        (**self).lookup_token(consumer, kind, token_key)
    }

    fn lookup_nonce(
        &self,
        consumer: &Consumer,
        token: Option<&Token>,
        nonce: &str,
        timestamp: &str,
    ) -> Result<bool, StoreError> {
        (**self).lookup_nonce(consumer, token, nonce, timestamp)
    }

    fn new_request_token(
        &self,
        consumer: &Consumer,
        callback: Option<&str>,
    ) -> Result<Token, StoreError> {
        (**self).new_request_token(consumer, callback)
    }

    fn new_access_token(
        &self,
        request_token: &Token,
        consumer: &Consumer,
        verifier: Option<&str>,
    ) -> Result<Token, StoreError> {
        (**self).new_access_token(request_token, consumer, verifier)
    }
}
