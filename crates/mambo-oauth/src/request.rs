//! Canonical OAuth 1.0 request and signature base string (RFC 5849 Section 3.4.1).

use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::RngExt;

use crate::encode::{encode, parse_authorization_header, parse_pairs};
use crate::error::OAuthError;
use crate::model::{Consumer, Token};
use crate::signature::SignatureMethod;

/// The only protocol version this crate speaks.
pub const OAUTH_VERSION: &str = "1.0";

pub const OAUTH_CALLBACK: &str = "oauth_callback";
pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
pub const OAUTH_NONCE: &str = "oauth_nonce";
pub const OAUTH_SIGNATURE: &str = "oauth_signature";
pub const OAUTH_SIGNATURE_METHOD: &str = "oauth_signature_method";
pub const OAUTH_TIMESTAMP: &str = "oauth_timestamp";
pub const OAUTH_TOKEN: &str = "oauth_token";
pub const OAUTH_VERIFIER: &str = "oauth_verifier";
pub const OAUTH_VERSION_PARAM: &str = "oauth_version";

/// Generate cryptographically random nonce (32 hex characters).
pub fn generate_nonce() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    hex::encode(bytes)
}

/// Current Unix time in seconds.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// An HTTP request described by its method, base URL and parameter multimap.
///
/// Parameters keep insertion order; ordering only matters for serialization,
/// never for the signature base string.
#[derive(Clone, PartialEq, Eq)]
pub struct SignedRequest {
    method: String,
    base_url: String,
    params: Vec<(String, String)>,
}

/// PLAINTEXT signatures are the secrets themselves, so `oauth_signature` is
/// always redacted.
impl fmt::Debug for SignedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let params: Vec<(&str, &str)> = self
            .params
            .iter()
            .map(|(name, value)| {
                let value = if name == OAUTH_SIGNATURE {
                    "<redacted>"
                } else {
                    value.as_str()
                };
                (name.as_str(), value)
            })
            .collect();
        f.debug_struct("SignedRequest")
            .field("method", &self.method)
            .field("base_url", &self.base_url)
            .field("params", &params)
            .finish()
    }
}

impl SignedRequest {
    /// Create a request for an already normalized base URL (no query string).
    pub fn new(method: &str, base_url: &str) -> Self {
        Self {
            method: method.to_uppercase(),
            base_url: base_url.to_owned(),
            params: Vec::new(),
        }
    }

    /// Create a request from a full URL.
    ///
    /// The query string is split into parameters and the base URL is
    /// normalized (RFC 5849 Section 3.4.1.2): lower-case scheme and host,
    /// default port dropped, fragment removed.
    pub fn from_url(method: &str, url: &str) -> Self {
        let without_fragment = url.split_once('#').map_or(url, |(u, _)| u);
        let (base, query) = match without_fragment.split_once('?') {
            Some((base, query)) => (base, parse_pairs(query)),
            None => (without_fragment, Vec::new()),
        };
        Self {
            method: method.to_uppercase(),
            base_url: normalize_base_url(base),
            params: query,
        }
    }

    /// Create a request from a full URL and the `Authorization` header it was
    /// sent with. Header parameters are merged with the query parameters.
    pub fn from_authorization_header(method: &str, url: &str, header: &str) -> Self {
        let mut request = Self::from_url(method, url);
        request.params.extend(parse_authorization_header(header));
        request
    }

    /// Create a request pre-filled with the protocol parameters for `consumer`
    /// and optional `token`: version, fresh nonce, current timestamp.
    pub fn from_consumer_and_token(
        consumer: &Consumer,
        token: Option<&Token>,
        method: &str,
        url: &str,
    ) -> Self {
        let mut request = Self::from_url(method, url)
            .with_parameter(OAUTH_VERSION_PARAM, OAUTH_VERSION)
            .with_parameter(OAUTH_NONCE, generate_nonce())
            .with_parameter(OAUTH_TIMESTAMP, unix_now().to_string())
            .with_parameter(OAUTH_CONSUMER_KEY, consumer.key());
        if let Some(token) = token {
            request.set_parameter(OAUTH_TOKEN, token.key());
        }
        request
    }

    /// Append a parameter (repeated names are kept).
    #[must_use]
    pub fn with_parameter(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Replace every value of `name` with a single `value`.
    pub fn set_parameter(&mut self, name: &str, value: impl Into<String>) {
        self.remove_parameter(name);
        self.params.push((name.to_owned(), value.into()));
    }

    /// Remove every value of `name`.
    pub fn remove_parameter(&mut self, name: &str) {
        self.params.retain(|(k, _)| k != name);
    }

    /// First value of `name`; empty values count as absent.
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }

    pub fn parameters(&self) -> &[(String, String)] {
        &self.params
    }

    /// Upper-cased HTTP method.
    pub fn http_method(&self) -> &str {
        &self.method
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Normalized parameter string (RFC 5849 Section 3.4.1.3.2).
    ///
    /// `oauth_signature` is excluded; pairs are encoded, then sorted by name
    /// and value.
    pub fn signable_parameters(&self) -> String {
        join_sorted(
            self.params
                .iter()
                .filter(|(k, _)| k != OAUTH_SIGNATURE),
        )
    }

    /// Build OAuth signature base string per RFC 5849 Section 3.4.1.
    ///
    /// Format: `HTTP_METHOD&encoded_base_url&encoded_parameters`
    pub fn signature_base_string(&self) -> String {
        format!(
            "{}&{}&{}",
            self.method,
            encode(&self.base_url),
            encode(&self.signable_parameters())
        )
    }

    /// Sign the request, setting `oauth_signature_method` and `oauth_signature`.
    pub fn sign(
        &mut self,
        method: &dyn SignatureMethod,
        consumer: &Consumer,
        token: Option<&Token>,
    ) -> Result<(), OAuthError> {
        self.set_parameter(OAUTH_SIGNATURE_METHOD, method.name());
        let signature = method.build_signature(self, consumer, token)?;
        self.set_parameter(OAUTH_SIGNATURE, signature);
        Ok(())
    }

    /// Build OAuth Authorization header value from the `oauth_*` parameters.
    pub fn authorization_header(&self, realm: Option<&str>) -> String {
        let mut oauth_params: Vec<&(String, String)> = self
            .params
            .iter()
            .filter(|(k, _)| k.starts_with("oauth_"))
            .collect();
        oauth_params.sort();

        let mut header_parts = Vec::with_capacity(oauth_params.len() + 1);
        if let Some(realm) = realm {
            header_parts.push(format!("realm=\"{realm}\""));
        }
        header_parts.extend(
            oauth_params
                .iter()
                .map(|(k, v)| format!("{}=\"{}\"", encode(k), encode(v))),
        );
        format!("OAuth {}", header_parts.join(", "))
    }

    /// All parameters as an `application/x-www-form-urlencoded` body.
    pub fn to_postdata(&self) -> String {
        join_sorted(self.params.iter())
    }

    /// Base URL followed by every parameter as query string.
    pub fn to_url(&self) -> String {
        let postdata = self.to_postdata();
        if postdata.is_empty() {
            self.base_url.clone()
        } else {
            format!("{}?{postdata}", self.base_url)
        }
    }
}

fn join_sorted<'a>(params: impl Iterator<Item = &'a (String, String)>) -> String {
    let mut encoded: Vec<(String, String)> =
        params.map(|(k, v)| (encode(k), encode(v))).collect();
    encoded.sort();
    encoded
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

fn normalize_base_url(base: &str) -> String {
    let Some((scheme, rest)) = base.split_once("://") else {
        return base.to_owned();
    };
    let scheme = scheme.to_ascii_lowercase();
    let (authority, path) = match rest.find('/') {
        Some(idx) => rest.split_at(idx),
        None => (rest, "/"),
    };
    let authority = authority.to_ascii_lowercase();
    let host = match authority.rsplit_once(':') {
        Some((host, "80")) if scheme == "http" => host,
        Some((host, "443")) if scheme == "https" => host,
        _ => authority.as_str(),
    };
    format!("{scheme}://{host}{path}")
}
