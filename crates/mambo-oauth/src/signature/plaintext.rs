use super::{SignatureMethod, signing_key};
use crate::error::OAuthError;
use crate::model::{Consumer, Token};
use crate::request::SignedRequest;

/// PLAINTEXT (RFC 5849 Section 3.4.4). Only safe over TLS.
#[derive(Debug, Clone, Copy, Default)]
pub struct Plaintext;

impl SignatureMethod for Plaintext {
    fn name(&self) -> &str {
        "PLAINTEXT"
    }

    fn build_signature(
        &self,
        _request: &SignedRequest,
        consumer: &Consumer,
        token: Option<&Token>,
    ) -> Result<String, OAuthError> {
        Ok(signing_key(consumer, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TokenKind;

    #[test]
    fn test_plaintext_is_signing_key() {
        let request = SignedRequest::new("GET", "https://x.test/");
        let consumer = Consumer::new("ck", "cs");
        let token = Token::new("tk", "t s", TokenKind::Access);

        assert_eq!(
            Plaintext.build_signature(&request, &consumer, Some(&token)).unwrap(),
            "cs&t%20s"
        );
        assert_eq!(
            Plaintext.build_signature(&request, &consumer, None).unwrap(),
            "cs&"
        );
    }

    #[test]
    fn test_plaintext_verify() {
        let request = SignedRequest::new("GET", "https://x.test/");
        let consumer = Consumer::new("ck", "cs");
        assert!(Plaintext.verify(&request, &consumer, None, "cs&").unwrap());
        assert!(!Plaintext.verify(&request, &consumer, None, "cs&x").unwrap());
        assert!(!Plaintext.verify(&request, &consumer, None, "").unwrap());
    }
}
