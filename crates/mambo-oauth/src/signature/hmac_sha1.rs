use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use super::{SignatureMethod, signing_key};
use crate::error::OAuthError;
use crate::model::{Consumer, Token};
use crate::request::SignedRequest;

/// HMAC-SHA1 (RFC 5849 Section 3.4.2).
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacSha1;

impl SignatureMethod for HmacSha1 {
    fn name(&self) -> &str {
        "HMAC-SHA1"
    }

    fn build_signature(
        &self,
        request: &SignedRequest,
        consumer: &Consumer,
        token: Option<&Token>,
    ) -> Result<String, OAuthError> {
        let key = signing_key(consumer, token);
        let mut mac = Hmac::<Sha1>::new_from_slice(key.as_bytes())
            .map_err(|e| OAuthError::Signing(e.to_string()))?;
        mac.update(request.signature_base_string().as_bytes());
        Ok(BASE64_STANDARD.encode(mac.finalize().into_bytes()))
    }
}
