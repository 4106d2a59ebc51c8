//! Request verification and token issuance (RFC 5849 Section 3.2).

use std::fmt;

use tracing::{debug, warn};

use crate::error::OAuthError;
use crate::model::{Consumer, Token, TokenKind};
use crate::request::{
    OAUTH_CALLBACK, OAUTH_CONSUMER_KEY, OAUTH_NONCE, OAUTH_SIGNATURE, OAUTH_SIGNATURE_METHOD,
    OAUTH_TIMESTAMP, OAUTH_TOKEN, OAUTH_VERIFIER, OAUTH_VERSION, OAUTH_VERSION_PARAM,
    SignedRequest, unix_now,
};
use crate::signature::{SignatureMethod, SignatureMethods};
use crate::store::DataStore;

/// Default allowed clock skew in seconds.
pub const DEFAULT_TIMESTAMP_THRESHOLD: u64 = 300;

type Clock = Box<dyn Fn() -> u64 + Send + Sync>;

/// OAuth 1.0 service provider.
///
/// Every entry point runs the same pipeline: version check, consumer
/// lookup, optional token lookup, then the signature check (timestamp
/// window, signature method, nonce, signature). The first failing step
/// rejects the request.
pub struct OAuthServer<S> {
    store: S,
    methods: SignatureMethods,
    timestamp_threshold: u64,
    clock: Clock,
}

impl<S: DataStore> OAuthServer<S> {
    /// Create a server with no signature methods registered.
    pub fn new(store: S) -> Self {
        Self {
            store,
            methods: SignatureMethods::new(),
            timestamp_threshold: DEFAULT_TIMESTAMP_THRESHOLD,
            clock: Box::new(unix_now),
        }
    }

    /// Replace the signature method registry.
    #[must_use]
    pub fn with_signature_methods(mut self, methods: SignatureMethods) -> Self {
        self.methods = methods;
        self
    }

    /// Register one more signature method.
    #[must_use]
    pub fn with_signature_method(mut self, method: impl SignatureMethod + 'static) -> Self {
        self.methods.register(method);
        self
    }

    /// Allowed distance between the request timestamp and the server clock.
    #[must_use]
    pub fn with_timestamp_threshold(mut self, seconds: u64) -> Self {
        self.timestamp_threshold = seconds;
        self
    }

    /// Replace the wall clock (Unix seconds).
    #[must_use]
    pub fn with_clock(mut self, clock: impl Fn() -> u64 + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn signature_methods(&self) -> &SignatureMethods {
        &self.methods
    }

    /// Issue a request token for a consumer-signed request.
    pub fn fetch_request_token(&self, request: &SignedRequest) -> Result<Token, OAuthError> {
        self.issue_request_token(request).inspect_err(log_rejection)
    }

    /// Exchange the request token carried by `request` for an access token.
    pub fn fetch_access_token(&self, request: &SignedRequest) -> Result<Token, OAuthError> {
        self.exchange_request_token(request)
            .inspect_err(log_rejection)
    }

    /// Verify a request signed with an access token.
    pub fn verify_request(&self, request: &SignedRequest) -> Result<(Consumer, Token), OAuthError> {
        self.verify_with_access_token(request)
            .inspect_err(log_rejection)
    }

    /// Verify a two-legged request signed by the consumer alone.
    pub fn verify_consumer_request(&self, request: &SignedRequest) -> Result<Consumer, OAuthError> {
        self.verify_with_consumer(request).inspect_err(log_rejection)
    }

    fn issue_request_token(&self, request: &SignedRequest) -> Result<Token, OAuthError> {
        check_version(request)?;
        let consumer = self.consumer(request)?;
        self.check_signature(request, &consumer, None)?;
        let callback = request.parameter(OAUTH_CALLBACK);
        Ok(self.store.new_request_token(&consumer, callback)?)
    }

    fn exchange_request_token(&self, request: &SignedRequest) -> Result<Token, OAuthError> {
        check_version(request)?;
        let consumer = self.consumer(request)?;
        let token = self.token(request, &consumer, TokenKind::Request)?;
        self.check_signature(request, &consumer, Some(&token))?;
        let verifier = request.parameter(OAUTH_VERIFIER);
        Ok(self.store.new_access_token(&token, &consumer, verifier)?)
    }

    fn verify_with_access_token(
        &self,
        request: &SignedRequest,
    ) -> Result<(Consumer, Token), OAuthError> {
        check_version(request)?;
        let consumer = self.consumer(request)?;
        let token = self.token(request, &consumer, TokenKind::Access)?;
        self.check_signature(request, &consumer, Some(&token))?;
        Ok((consumer, token))
    }

    fn verify_with_consumer(&self, request: &SignedRequest) -> Result<Consumer, OAuthError> {
        check_version(request)?;
        let consumer = self.consumer(request)?;
        self.check_signature(request, &consumer, None)?;
        Ok(consumer)
    }

    fn consumer(&self, request: &SignedRequest) -> Result<Consumer, OAuthError> {
        let key = request
            .parameter(OAUTH_CONSUMER_KEY)
            .ok_or_else(|| OAuthError::InvalidConsumer("missing consumer key".to_owned()))?;
        self.store
            .lookup_consumer(key)?
            .ok_or_else(|| OAuthError::InvalidConsumer(key.to_owned()))
    }

    fn token(
        &self,
        request: &SignedRequest,
        consumer: &Consumer,
        kind: TokenKind,
    ) -> Result<Token, OAuthError> {
        let key = request.parameter(OAUTH_TOKEN).unwrap_or_default();
        let invalid = || OAuthError::InvalidToken {
            kind,
            key: key.to_owned(),
        };
        if key.is_empty() {
            return Err(invalid());
        }
        self.store
            .lookup_token(consumer, kind, key)?
            .ok_or_else(invalid)
    }

    fn check_signature(
        &self,
        request: &SignedRequest,
        consumer: &Consumer,
        token: Option<&Token>,
    ) -> Result<(), OAuthError> {
        let timestamp = request
            .parameter(OAUTH_TIMESTAMP)
            .ok_or(OAuthError::MissingParameter(OAUTH_TIMESTAMP))?;
        let nonce = request
            .parameter(OAUTH_NONCE)
            .ok_or(OAuthError::MissingParameter(OAUTH_NONCE))?;

        self.check_timestamp(timestamp)?;
        let method = self.signature_method(request)?;

        if self.store.lookup_nonce(consumer, token, nonce, timestamp)? {
            return Err(OAuthError::NonceReused(nonce.to_owned()));
        }

        let signature = request.parameter(OAUTH_SIGNATURE).unwrap_or_default();
        if !method.verify(request, consumer, token, signature)? {
            return Err(OAuthError::InvalidSignature);
        }
        debug!(
            consumer = consumer.key(),
            method = method.name(),
            "OAuth signature verified"
        );
        Ok(())
    }

    fn check_timestamp(&self, timestamp: &str) -> Result<(), OAuthError> {
        let now = (self.clock)();
        let within_window = timestamp
            .parse::<u64>()
            .is_ok_and(|ts| now.abs_diff(ts) <= self.timestamp_threshold);
        if within_window {
            Ok(())
        } else {
            Err(OAuthError::ExpiredTimestamp {
                timestamp: timestamp.to_owned(),
                now,
            })
        }
    }

    fn signature_method(
        &self,
        request: &SignedRequest,
    ) -> Result<&dyn SignatureMethod, OAuthError> {
        let name = request.parameter(OAUTH_SIGNATURE_METHOD);
        name.and_then(|name| self.methods.get(name))
            .ok_or_else(|| OAuthError::UnsupportedSignatureMethod {
                method: name.map(str::to_owned),
                supported: self.methods.names(),
            })
    }
}

impl<S> fmt::Debug for OAuthServer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthServer")
            .field("methods", &self.methods)
            .field("timestamp_threshold", &self.timestamp_threshold)
            .finish_non_exhaustive()
    }
}

fn check_version(request: &SignedRequest) -> Result<(), OAuthError> {
    let version = request.parameter(OAUTH_VERSION_PARAM).unwrap_or(OAUTH_VERSION);
    if version == OAUTH_VERSION {
        Ok(())
    } else {
        Err(OAuthError::UnsupportedVersion(version.to_owned()))
    }
}

fn log_rejection(err: &OAuthError) {
    warn!(error = %err, "OAuth request rejected");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::StoreError;
    use crate::memory::MemoryStore;
    use crate::signature::{HmacSha1, Plaintext};

    const NOW: u64 = 1_700_000_000;
    const URL: &str = "https://api.example.com/resource";

    fn consumer() -> Consumer {
        Consumer::new("ck", "cs")
    }

    fn access_token() -> Token {
        Token::new("tk", "ts", TokenKind::Access)
    }

    fn server() -> OAuthServer<MemoryStore> {
        let store = MemoryStore::new().with_consumer(consumer());
        store.add_access_token(&consumer(), access_token()).unwrap();
        OAuthServer::new(store)
            .with_signature_method(HmacSha1)
            .with_signature_method(Plaintext)
            .with_clock(|| NOW)
    }

    fn signed(
        token: Option<&Token>,
        timestamp: u64,
        nonce: &str,
        extra: &[(&str, &str)],
    ) -> SignedRequest {
        let mut request = SignedRequest::new("GET", URL)
            .with_parameter(OAUTH_CONSUMER_KEY, "ck")
            .with_parameter(OAUTH_NONCE, nonce)
            .with_parameter(OAUTH_TIMESTAMP, timestamp.to_string())
            .with_parameter(OAUTH_VERSION_PARAM, "1.0");
        if let Some(token) = token {
            request.set_parameter(OAUTH_TOKEN, token.key());
        }
        for (k, v) in extra {
            request.set_parameter(k, *v);
        }
        request.sign(&HmacSha1, &consumer(), token).unwrap();
        request
    }

    #[test]
    fn test_verify_request_accepts_valid_signature() {
        let token = access_token();
        let request = signed(Some(&token), NOW, "n1", &[("a", "1")]);

        let (consumer, verified) = server().verify_request(&request).unwrap();

        assert_eq!(consumer.key(), "ck");
        assert_eq!(verified, token);
    }

    #[test]
    fn test_two_legged_signing_key() {
        let request = SignedRequest::new("GET", URL)
            .with_parameter("a", "1")
            .with_parameter(OAUTH_CONSUMER_KEY, "ck")
            .with_parameter(OAUTH_NONCE, "n1")
            .with_parameter(OAUTH_TIMESTAMP, NOW.to_string())
            .with_parameter(OAUTH_SIGNATURE_METHOD, "HMAC-SHA1")
            .with_parameter(OAUTH_VERSION_PARAM, "1.0");
        let signature = HmacSha1.build_signature(&request, &consumer(), None).unwrap();

        assert_eq!(Plaintext.build_signature(&request, &consumer(), None).unwrap(), "cs&");
        assert!(HmacSha1.verify(&request, &consumer(), None, &signature).unwrap());
        assert!(!HmacSha1.verify(&request, &consumer(), None, "wrong").unwrap());

        let request = request.with_parameter(OAUTH_SIGNATURE, signature);
        assert_eq!(
            server().verify_consumer_request(&request).unwrap().key(),
            "ck"
        );
    }

    #[test]
    fn test_single_byte_flip_rejected() {
        let token = access_token();
        let request = signed(Some(&token), NOW, "n1", &[]);
        let signature = request.parameter(OAUTH_SIGNATURE).unwrap().as_bytes().to_vec();
        server().verify_request(&request).unwrap();

        for position in 0..signature.len() {
            let mut flipped = signature.clone();
            flipped[position] = if flipped[position] == b'A' { b'B' } else { b'A' };
            let mut tampered = request.clone();
            tampered.set_parameter(OAUTH_SIGNATURE, String::from_utf8(flipped).unwrap());

            // fresh server per attempt, otherwise the nonce check fires first
            assert!(
                matches!(
                    server().verify_request(&tampered),
                    Err(OAuthError::InvalidSignature)
                ),
                "flip at byte {position} was accepted"
            );
        }
    }

    #[test]
    fn test_timestamp_window_edges() {
        let token = access_token();
        let server = server();
        for (i, ts) in [NOW - 300, NOW + 300].into_iter().enumerate() {
            let request = signed(Some(&token), ts, &format!("ok{i}"), &[]);
            server.verify_request(&request).unwrap();
        }
        for (i, ts) in [NOW - 301, NOW + 301].into_iter().enumerate() {
            let request = signed(Some(&token), ts, &format!("late{i}"), &[]);
            assert!(matches!(
                server.verify_request(&request),
                Err(OAuthError::ExpiredTimestamp { now: NOW, .. })
            ));
        }
    }

    #[test]
    fn test_custom_threshold() {
        let token = access_token();
        let server = server().with_timestamp_threshold(10);
        let request = signed(Some(&token), NOW - 11, "n1", &[]);
        assert!(matches!(
            server.verify_request(&request),
            Err(OAuthError::ExpiredTimestamp { .. })
        ));
    }

    #[test]
    fn test_non_numeric_timestamp_is_expired() {
        let mut request = signed(Some(&access_token()), NOW, "n1", &[]);
        request.set_parameter(OAUTH_TIMESTAMP, "soon");
        assert!(matches!(
            server().verify_request(&request),
            Err(OAuthError::ExpiredTimestamp { .. })
        ));
    }

    #[test]
    fn test_nonce_reuse_until_purge() {
        let token = access_token();
        let server = server();
        let request = signed(Some(&token), NOW, "same", &[]);

        server.verify_request(&request).unwrap();
        assert!(matches!(
            server.verify_request(&request),
            Err(OAuthError::NonceReused(nonce)) if nonce == "same"
        ));

        server.store().purge_nonces().unwrap();
        server.verify_request(&request).unwrap();
    }

    #[test]
    fn test_missing_timestamp_and_nonce() {
        let token = access_token();
        let mut request = signed(Some(&token), NOW, "n1", &[]);
        request.remove_parameter(OAUTH_TIMESTAMP);
        assert!(matches!(
            server().verify_request(&request),
            Err(OAuthError::MissingParameter("oauth_timestamp"))
        ));

        let mut request = signed(Some(&token), NOW, "n1", &[]);
        request.remove_parameter(OAUTH_NONCE);
        assert!(matches!(
            server().verify_request(&request),
            Err(OAuthError::MissingParameter("oauth_nonce"))
        ));
    }

    #[test]
    fn test_version_check() {
        let token = access_token();
        let mut request = signed(Some(&token), NOW, "n1", &[]);
        request.set_parameter(OAUTH_VERSION_PARAM, "2.0");
        assert!(matches!(
            server().verify_request(&request),
            Err(OAuthError::UnsupportedVersion(v)) if v == "2.0"
        ));

        // Absent version defaults to 1.0
        let mut request = SignedRequest::new("GET", URL)
            .with_parameter(OAUTH_CONSUMER_KEY, "ck")
            .with_parameter(OAUTH_TOKEN, "tk")
            .with_parameter(OAUTH_NONCE, "n2")
            .with_parameter(OAUTH_TIMESTAMP, NOW.to_string());
        request.sign(&HmacSha1, &consumer(), Some(&token)).unwrap();
        server().verify_request(&request).unwrap();
    }

    #[test]
    fn test_unknown_consumer_and_token() {
        let mut request = signed(Some(&access_token()), NOW, "n1", &[]);
        request.set_parameter(OAUTH_CONSUMER_KEY, "nobody");
        assert!(matches!(
            server().verify_request(&request),
            Err(OAuthError::InvalidConsumer(key)) if key == "nobody"
        ));

        let request = signed(None, NOW, "n1", &[]);
        assert!(matches!(
            server().verify_request(&request),
            Err(OAuthError::InvalidToken { kind: TokenKind::Access, key }) if key.is_empty()
        ));
    }

    #[test]
    fn test_request_and_access_token_flow() {
        let server = server();
        let request = signed(None, NOW, "r1", &[(OAUTH_CALLBACK, "https://cb.example/x")]);
        let request_token = server.fetch_request_token(&request).unwrap();

        assert!(!request_token.key().is_empty());
        assert!(!request_token.secret().is_empty());
        assert_eq!(request_token.kind(), TokenKind::Request);

        let verifier = server
            .store()
            .authorize_request_token(request_token.key())
            .unwrap();
        let request = signed(
            Some(&request_token),
            NOW,
            "r2",
            &[(OAUTH_VERIFIER, verifier.as_str())],
        );
        let access = server.fetch_access_token(&request).unwrap();

        assert_eq!(access.kind(), TokenKind::Access);
        assert_ne!(access.key(), request_token.key());
        assert_ne!(access.secret(), request_token.secret());

        // The request token cannot be exchanged twice
        let replay = signed(
            Some(&request_token),
            NOW,
            "r3",
            &[(OAUTH_VERIFIER, verifier.as_str())],
        );
        assert!(matches!(
            server.fetch_access_token(&replay),
            Err(OAuthError::InvalidToken { kind: TokenKind::Request, .. })
        ));
    }

    #[derive(Default)]
    struct CountingStore {
        inner: MemoryStore,
        nonce_lookups: AtomicUsize,
    }

    impl DataStore for CountingStore {
        fn lookup_consumer(&self, key: &str) -> Result<Option<Consumer>, StoreError> {
            self.inner.lookup_consumer(key)
        }

        fn lookup_token(
            &self,
            consumer: &Consumer,
            kind: TokenKind,
            key: &str,
        ) -> Result<Option<Token>, StoreError> {
            self.inner.lookup_token(consumer, kind, key)
        }

        fn lookup_nonce(
            &self,
            consumer: &Consumer,
            token: Option<&Token>,
            nonce: &str,
            timestamp: &str,
        ) -> Result<bool, StoreError> {
            self.nonce_lookups.fetch_add(1, Ordering::SeqCst);
            self.inner.lookup_nonce(consumer, token, nonce, timestamp)
        }

        fn new_request_token(
            &self,
            consumer: &Consumer,
            callback: Option<&str>,
        ) -> Result<Token, StoreError> {
            self.inner.new_request_token(consumer, callback)
        }

        fn new_access_token(
            &self,
            token: &Token,
            consumer: &Consumer,
            verifier: Option<&str>,
        ) -> Result<Token, StoreError> {
            self.inner.new_access_token(token, consumer, verifier)
        }
    }

    #[test]
    fn test_unsupported_method_before_nonce_lookup() {
        let store = Arc::new(CountingStore::default());
        store.inner.add_consumer(consumer()).unwrap();
        store
            .inner
            .add_access_token(&consumer(), access_token())
            .unwrap();
        let server = OAuthServer::new(Arc::clone(&store))
            .with_signature_method(HmacSha1)
            .with_clock(|| NOW);

        let mut request = signed(Some(&access_token()), NOW, "n1", &[]);
        request.set_parameter(OAUTH_SIGNATURE_METHOD, "FOO");

        let err = server.verify_request(&request).unwrap_err();
        assert!(matches!(
            &err,
            OAuthError::UnsupportedSignatureMethod { method: Some(m), supported }
                if m == "FOO" && supported == &["HMAC-SHA1".to_owned()]
        ));
        assert_eq!(store.nonce_lookups.load(Ordering::SeqCst), 0);

        request.remove_parameter(OAUTH_SIGNATURE_METHOD);
        assert!(matches!(
            server.verify_request(&request),
            Err(OAuthError::UnsupportedSignatureMethod { method: None, .. })
        ));
    }

    struct FailingStore;

    impl DataStore for FailingStore {
        fn lookup_consumer(&self, _: &str) -> Result<Option<Consumer>, StoreError> {
            Err(StoreError::new("backend down"))
        }

        fn lookup_token(
            &self,
            _: &Consumer,
            _: TokenKind,
            _: &str,
        ) -> Result<Option<Token>, StoreError> {
            Ok(None)
        }

        fn lookup_nonce(
            &self,
            _: &Consumer,
            _: Option<&Token>,
            _: &str,
            _: &str,
        ) -> Result<bool, StoreError> {
            Ok(false)
        }

        fn new_request_token(&self, _: &Consumer, _: Option<&str>) -> Result<Token, StoreError> {
            Err(StoreError::new("backend down"))
        }

        fn new_access_token(
            &self,
            _: &Token,
            _: &Consumer,
            _: Option<&str>,
        ) -> Result<Token, StoreError> {
            Err(StoreError::new("backend down"))
        }
    }

    #[test]
    fn test_store_errors_are_forwarded() {
        let server = OAuthServer::new(FailingStore).with_signature_method(HmacSha1);
        let request = signed(None, NOW, "n1", &[]);
        match server.verify_consumer_request(&request) {
            Err(OAuthError::Store(err)) => assert_eq!(err.message(), "backend down"),
            other => panic!("expected store error, got {other:?}"),
        }
    }
}
