use std::fmt;

use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sha1::Sha1;

use super::SignatureMethod;
use crate::error::OAuthError;
use crate::key::{load_private_key, load_public_key};
use crate::model::{Consumer, Token};
use crate::request::SignedRequest;

/// Returns PEM key material for a request.
type CertFetcher = Box<dyn Fn(&SignedRequest) -> Result<String, OAuthError> + Send + Sync>;

/// RSA-SHA1 (RFC 5849 Section 3.4.3).
///
/// Key material is supplied per request by fetch callbacks, so a server can
/// look up the public certificate registered for the calling consumer.
/// Verification falls back to the public half of the private key when no
/// public certificate fetcher is set.
#[derive(Default)]
pub struct RsaSha1 {
    private_cert: Option<CertFetcher>,
    public_cert: Option<CertFetcher>,
}

impl RsaSha1 {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sign with a fixed private key.
    pub fn from_private_key(pem: &str) -> Result<Self, OAuthError> {
        load_private_key(pem.as_bytes())?;
        let pem = pem.to_owned();
        Ok(Self::new().with_private_cert(move |_| Ok(pem.clone())))
    }

    /// Verify with a fixed public key.
    pub fn from_public_key(pem: &str) -> Result<Self, OAuthError> {
        load_public_key(pem.as_bytes())?;
        let pem = pem.to_owned();
        Ok(Self::new().with_public_cert(move |_| Ok(pem.clone())))
    }

    #[must_use]
    pub fn with_private_cert(
        mut self,
        fetch: impl Fn(&SignedRequest) -> Result<String, OAuthError> + Send + Sync + 'static,
    ) -> Self {
        self.private_cert = Some(Box::new(fetch));
        self
    }

    #[must_use]
    pub fn with_public_cert(
        mut self,
        fetch: impl Fn(&SignedRequest) -> Result<String, OAuthError> + Send + Sync + 'static,
    ) -> Self {
        self.public_cert = Some(Box::new(fetch));
        self
    }

    fn private_key(&self, request: &SignedRequest) -> Result<RsaPrivateKey, OAuthError> {
        let fetch = self
            .private_cert
            .as_ref()
            .ok_or_else(|| OAuthError::Signing("no RSA private key configured".to_owned()))?;
        Ok(load_private_key(fetch(request)?.as_bytes())?)
    }

    fn public_key(&self, request: &SignedRequest) -> Result<RsaPublicKey, OAuthError> {
        match &self.public_cert {
            Some(fetch) => Ok(load_public_key(fetch(request)?.as_bytes())?),
            None => Ok(RsaPublicKey::from(&self.private_key(request)?)),
        }
    }
}

impl fmt::Debug for RsaSha1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaSha1")
            .field("private_cert", &self.private_cert.is_some())
            .field("public_cert", &self.public_cert.is_some())
            .finish()
    }
}

impl SignatureMethod for RsaSha1 {
    fn name(&self) -> &str {
        "RSA-SHA1"
    }

    fn build_signature(
        &self,
        request: &SignedRequest,
        _consumer: &Consumer,
        _token: Option<&Token>,
    ) -> Result<String, OAuthError> {
        let signing_key = SigningKey::<Sha1>::new(self.private_key(request)?);
        let signature = signing_key
            .try_sign(request.signature_base_string().as_bytes())
            .map_err(|e| OAuthError::Signing(e.to_string()))?;
        Ok(BASE64_STANDARD.encode(signature.to_bytes()))
    }

    fn verify(
        &self,
        request: &SignedRequest,
        _consumer: &Consumer,
        _token: Option<&Token>,
        signature: &str,
    ) -> Result<bool, OAuthError> {
        let Ok(bytes) = BASE64_STANDARD.decode(signature) else {
            return Ok(false);
        };
        let Ok(signature) = Signature::try_from(bytes.as_slice()) else {
            return Ok(false);
        };
        let verifying_key = VerifyingKey::<Sha1>::new(self.public_key(request)?);
        Ok(verifying_key
            .verify(request.signature_base_string().as_bytes(), &signature)
            .is_ok())
    }
}
