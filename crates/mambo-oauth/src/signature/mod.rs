//! Pluggable OAuth 1.0 signature methods.

mod hmac_sha1;
mod plaintext;
mod rsa_sha1;

use std::collections::BTreeMap;
use std::fmt;

pub use self::hmac_sha1::HmacSha1;
pub use self::plaintext::Plaintext;
pub use self::rsa_sha1::RsaSha1;

use crate::encode::encode;
use crate::error::OAuthError;
use crate::model::{Consumer, Token};
use crate::request::SignedRequest;

/// A named signature algorithm.
///
/// `verify` defaults to rebuilding the signature and comparing it in
/// constant time; methods that cannot reproduce a signature (RSA-SHA1)
/// override it.
pub trait SignatureMethod: Send + Sync {
    /// Value used for `oauth_signature_method`.
    fn name(&self) -> &str;

    /// Compute the signature of `request`.
    fn build_signature(
        &self,
        request: &SignedRequest,
        consumer: &Consumer,
        token: Option<&Token>,
    ) -> Result<String, OAuthError>;

    /// Check `signature` against `request`.
    fn verify(
        &self,
        request: &SignedRequest,
        consumer: &Consumer,
        token: Option<&Token>,
        signature: &str,
    ) -> Result<bool, OAuthError> {
        let built = self.build_signature(request, consumer, token)?;
        Ok(constant_time_eq(built.as_bytes(), signature.as_bytes()))
    }
}

/// Compare two byte strings without early exit.
///
/// Empty inputs and inputs of different length never match.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.is_empty() || b.is_empty() || a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Signing key shared by HMAC-SHA1 and PLAINTEXT: `enc(consumer_secret)&enc(token_secret)`.
pub(crate) fn signing_key(consumer: &Consumer, token: Option<&Token>) -> String {
    format!(
        "{}&{}",
        encode(consumer.secret()),
        encode(token.map_or("", Token::secret))
    )
}

/// Registered signature methods, keyed by name.
#[derive(Default)]
pub struct SignatureMethods {
    methods: BTreeMap<String, Box<dyn SignatureMethod>>,
}

impl SignatureMethods {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a method, replacing any method with the same name.
    pub fn register(&mut self, method: impl SignatureMethod + 'static) {
        self.methods.insert(method.name().to_owned(), Box::new(method));
    }

    /// Builder-style [`register`](Self::register).
    #[must_use]
    pub fn with(mut self, method: impl SignatureMethod + 'static) -> Self {
        self.register(method);
        self
    }

    pub fn get(&self, name: &str) -> Option<&dyn SignatureMethod> {
        self.methods.get(name).map(|method| &**method)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.methods.keys().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

impl fmt::Debug for SignatureMethods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.methods.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
        assert!(!constant_time_eq(b"", b""));
        assert!(!constant_time_eq(b"abc", b""));
    }

    #[test]
    fn test_signing_key_without_token() {
        let consumer = Consumer::new("ck", "s&c");
        assert_eq!(signing_key(&consumer, None), "s%26c&");
    }

    #[test]
    fn test_registry_lookup() {
        let methods = SignatureMethods::new().with(HmacSha1).with(Plaintext);
        assert_eq!(methods.names(), vec!["HMAC-SHA1", "PLAINTEXT"]);
        assert_eq!(methods.get("PLAINTEXT").map(SignatureMethod::name), Some("PLAINTEXT"));
        assert!(methods.get("RSA-SHA1").is_none());
    }
}
