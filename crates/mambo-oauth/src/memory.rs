//! In-memory [`DataStore`] for tests and single-process tools.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rand::RngExt;

use crate::error::StoreError;
use crate::model::{Consumer, Token, TokenKind};
use crate::store::DataStore;

struct PendingToken {
    token: Token,
    consumer_key: String,
    callback: Option<String>,
    verifier: Option<String>,
}

#[derive(Default)]
struct State {
    consumers: HashMap<String, Consumer>,
    request_tokens: HashMap<String, PendingToken>,
    /// token key -> (consumer key, token)
    access_tokens: HashMap<String, (String, Token)>,
    /// (consumer key, token key, nonce) -> timestamp
    nonces: HashMap<(String, String, String), String>,
}

/// Thread-safe in-memory store.
///
/// Request tokens must be authorized with
/// [`authorize_request_token`](Self::authorize_request_token) before they can
/// be exchanged, and the returned verifier must accompany the exchange.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a consumer.
    pub fn add_consumer(&self, consumer: Consumer) -> Result<(), StoreError> {
        self.write()?
            .consumers
            .insert(consumer.key().to_owned(), consumer);
        Ok(())
    }

    /// Builder-style [`add_consumer`](Self::add_consumer).
    ///
    /// The consumer is always inserted. A poisoned lock stays poisoned, so
    /// later lookups still report it as a [`StoreError`].
    #[must_use]
    pub fn with_consumer(mut self, consumer: Consumer) -> Self {
        self.state
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .consumers
            .insert(consumer.key().to_owned(), consumer);
        self
    }

    /// Insert an access token directly, bypassing the request-token flow.
    pub fn add_access_token(&self, consumer: &Consumer, token: Token) -> Result<(), StoreError> {
        let token = Token::new(token.key(), token.secret(), TokenKind::Access);
        self.write()?.access_tokens.insert(
            token.key().to_owned(),
            (consumer.key().to_owned(), token),
        );
        Ok(())
    }

    /// Mark a request token as authorized by the user and return its verifier.
    pub fn authorize_request_token(&self, token_key: &str) -> Result<String, StoreError> {
        let mut state = self.write()?;
        let pending = state
            .request_tokens
            .get_mut(token_key)
            .ok_or_else(|| StoreError::new(format!("unknown request token: {token_key}")))?;
        let verifier = random_key(8);
        pending.verifier = Some(verifier.clone());
        Ok(verifier)
    }

    /// Callback URL registered with a pending request token.
    pub fn callback_for(&self, token_key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .read()?
            .request_tokens
            .get(token_key)
            .and_then(|pending| pending.callback.clone()))
    }

    /// Forget every recorded nonce.
    pub fn purge_nonces(&self) -> Result<(), StoreError> {
        self.write()?.nonces.clear();
        Ok(())
    }

    /// Forget nonces whose timestamp is older than `cutoff` (Unix seconds).
    pub fn purge_nonces_before(&self, cutoff: u64) -> Result<(), StoreError> {
        self.write()?
            .nonces
            .retain(|_, timestamp| timestamp.parse::<u64>().is_ok_and(|ts| ts >= cutoff));
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, State>, StoreError> {
        self.state
            .read()
            .map_err(|_| StoreError::new("memory store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, State>, StoreError> {
        self.state
            .write()
            .map_err(|_| StoreError::new("memory store lock poisoned"))
    }
}

impl DataStore for MemoryStore {
    fn lookup_consumer(&self, consumer_key: &str) -> Result<Option<Consumer>, StoreError> {
        Ok(self.read()?.consumers.get(consumer_key).cloned())
    }

    fn lookup_token(
        &self,
        consumer: &Consumer,
        kind: TokenKind,
        token_key: &str,
    ) -> Result<Option<Token>, StoreError> {
        let state = self.read()?;
        let token = match kind {
            TokenKind::Request => state
                .request_tokens
                .get(token_key)
                .filter(|pending| pending.consumer_key == consumer.key())
                .map(|pending| pending.token.clone()),
            TokenKind::Access => state
                .access_tokens
                .get(token_key)
                .filter(|(owner, _)| owner == consumer.key())
                .map(|(_, token)| token.clone()),
        };
        Ok(token)
    }

    fn lookup_nonce(
        &self,
        consumer: &Consumer,
        token: Option<&Token>,
        nonce: &str,
        timestamp: &str,
    ) -> Result<bool, StoreError> {
        let key = (
            consumer.key().to_owned(),
            token.map_or_else(String::new, |t| t.key().to_owned()),
            nonce.to_owned(),
        );
        // Check and insert under one write lock.
        let seen = self
            .write()?
            .nonces
            .insert(key, timestamp.to_owned())
            .is_some();
        Ok(seen)
    }

    fn new_request_token(
        &self,
        consumer: &Consumer,
        callback: Option<&str>,
    ) -> Result<Token, StoreError> {
        let token = Token::new(random_key(16), random_key(16), TokenKind::Request);
        self.write()?.request_tokens.insert(
            token.key().to_owned(),
            PendingToken {
                token: token.clone(),
                consumer_key: consumer.key().to_owned(),
                callback: callback.map(str::to_owned),
                verifier: None,
            },
        );
        Ok(token)
    }

    fn new_access_token(
        &self,
        request_token: &Token,
        consumer: &Consumer,
        verifier: Option<&str>,
    ) -> Result<Token, StoreError> {
        let mut state = self.write()?;
        let pending = state
            .request_tokens
            .get(request_token.key())
            .filter(|pending| pending.consumer_key == consumer.key())
            .ok_or_else(|| {
                StoreError::new(format!("unknown request token: {}", request_token.key()))
            })?;
        match (pending.verifier.as_deref(), verifier) {
            (None, _) => return Err(StoreError::new("request token has not been authorized")),
            (Some(expected), Some(given)) if expected == given => {}
            _ => return Err(StoreError::new("verifier does not match")),
        }

        state.request_tokens.remove(request_token.key());
        let token = Token::new(random_key(16), random_key(16), TokenKind::Access);
        state.access_tokens.insert(
            token.key().to_owned(),
            (consumer.key().to_owned(), token.clone()),
        );
        Ok(token)
    }
}

fn random_key(len: usize) -> String {
    let mut rng = rand::rng();
    let bytes: Vec<u8> = (0..len).map(|_| rng.random()).collect();
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn consumer() -> Consumer {
        Consumer::new("ck", "cs")
    }

    #[test]
    fn test_with_consumer_registers() {
        let store = MemoryStore::new().with_consumer(consumer());
        assert_eq!(
            store.lookup_consumer("ck").unwrap().map(|c| c.secret().to_owned()),
            Some("cs".to_owned())
        );
    }

    #[test]
    fn test_with_consumer_on_poisoned_store_surfaces_error() {
        let store = MemoryStore::new();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.state.write().unwrap();
            panic!("writer panicked");
        }));

        let store = store.with_consumer(consumer());

        let err = store.lookup_consumer("ck").unwrap_err();
        assert!(err.message().contains("poisoned"));
    }

    #[test]
    fn test_nonce_check_and_insert() {
        let store = MemoryStore::new();
        assert!(!store.lookup_nonce(&consumer(), None, "n1", "100").unwrap());
        assert!(store.lookup_nonce(&consumer(), None, "n1", "100").unwrap());

        // Scoped per token
        let token = Token::new("tk", "ts", TokenKind::Access);
        assert!(!store.lookup_nonce(&consumer(), Some(&token), "n1", "100").unwrap());

        store.purge_nonces().unwrap();
        assert!(!store.lookup_nonce(&consumer(), None, "n1", "100").unwrap());
    }

    #[test]
    fn test_purge_nonces_before() {
        let store = MemoryStore::new();
        store.lookup_nonce(&consumer(), None, "old", "100").unwrap();
        store.lookup_nonce(&consumer(), None, "new", "200").unwrap();

        store.purge_nonces_before(150).unwrap();

        assert!(!store.lookup_nonce(&consumer(), None, "old", "100").unwrap());
        assert!(store.lookup_nonce(&consumer(), None, "new", "200").unwrap());
    }

    #[test]
    fn test_request_token_exchange_invalidates() {
        let store = MemoryStore::new().with_consumer(consumer());
        let request = store
            .new_request_token(&consumer(), Some("https://cb.example/x"))
            .unwrap();
        assert_eq!(
            store.callback_for(request.key()).unwrap().as_deref(),
            Some("https://cb.example/x")
        );

        let verifier = store.authorize_request_token(request.key()).unwrap();
        let access = store
            .new_access_token(&request, &consumer(), Some(&verifier))
            .unwrap();

        assert_eq!(access.kind(), TokenKind::Access);
        assert_ne!(access.key(), request.key());
        assert!(
            store
                .lookup_token(&consumer(), TokenKind::Request, request.key())
                .unwrap()
                .is_none()
        );
        assert_eq!(
            store
                .lookup_token(&consumer(), TokenKind::Access, access.key())
                .unwrap(),
            Some(access)
        );
        assert!(
            store
                .new_access_token(&request, &consumer(), Some(&verifier))
                .is_err()
        );
    }

    #[test]
    fn test_exchange_requires_authorization_and_verifier() {
        let store = MemoryStore::new();
        let request = store.new_request_token(&consumer(), None).unwrap();

        let err = store.new_access_token(&request, &consumer(), None).unwrap_err();
        assert_eq!(err.message(), "request token has not been authorized");

        store.authorize_request_token(request.key()).unwrap();
        let err = store
            .new_access_token(&request, &consumer(), Some("wrong"))
            .unwrap_err();
        assert_eq!(err.message(), "verifier does not match");

        // Still pending after a failed exchange
        assert!(
            store
                .lookup_token(&consumer(), TokenKind::Request, request.key())
                .unwrap()
                .is_some()
        );
    }

    #[test]
    fn test_tokens_scoped_to_consumer() {
        let store = MemoryStore::new();
        let token = Token::new("tk", "ts", TokenKind::Access);
        store.add_access_token(&consumer(), token).unwrap();

        let other = Consumer::new("other", "x");
        assert!(
            store
                .lookup_token(&other, TokenKind::Access, "tk")
                .unwrap()
                .is_none()
        );
        assert!(
            store
                .lookup_token(&consumer(), TokenKind::Access, "tk")
                .unwrap()
                .is_some()
        );
    }
}
