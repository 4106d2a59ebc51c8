//! Mambo REST API client.
//!
//! Every call is signed with two-legged OAuth 1.0: the site's public key is
//! the consumer key, the private key is the consumer secret, and no token is
//! sent. Query parameters take part in the signature; JSON bodies do not.

mod transport;

use std::fmt;
use std::time::Duration;

use mambo_config::{ApiConfig, SignatureMethodKind};
use mambo_oauth::{Consumer, HmacSha1, Plaintext, SignatureMethod, SignedRequest};
use rand::RngExt;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

pub use self::transport::{IncomingResponse, Method, OutgoingRequest, Transport, UreqTransport};
use crate::error::MamboError;
use crate::services::{
    Analytics, Behaviours, Coupons, CustomFields, DataStores, Languages, Leaderboards, Rewards,
    Tags, Users,
};

#[cfg(test)]
pub(crate) use self::transport::tests::RecordingTransport;

/// Default HTTP timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Signed HTTP client for the Mambo API.
pub struct MamboClient {
    server_url: String,
    consumer: Consumer,
    signature_method: Box<dyn SignatureMethod>,
    transport: Box<dyn Transport>,
}

impl MamboClient {
    /// Create a client signing with HMAC-SHA1 over the default transport.
    pub fn new(
        server_url: &str,
        public_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> Self {
        Self {
            server_url: server_url.trim_end_matches('/').to_owned(),
            consumer: Consumer::new(public_key, private_key),
            signature_method: Box::new(HmacSha1),
            transport: Box::new(UreqTransport::new(Duration::from_secs(DEFAULT_TIMEOUT))),
        }
    }

    /// Create a client from validated API settings.
    ///
    /// # Errors
    ///
    /// Returns [`MamboError::Config`] if the settings fail validation.
    pub fn from_config(config: &ApiConfig) -> Result<Self, MamboError> {
        config.validate()?;
        let client = Self::new(
            &config.server_url,
            config.public_key.clone(),
            config.private_key.clone(),
        )
        .with_transport(UreqTransport::new(Duration::from_secs(config.timeout_secs)));
        Ok(match config.signature_method {
            SignatureMethodKind::HmacSha1 => client.with_signature_method(HmacSha1),
            SignatureMethodKind::Plaintext => client.with_signature_method(Plaintext),
        })
    }

    /// Replace the signature method used for outgoing requests.
    #[must_use]
    pub fn with_signature_method(mut self, method: impl SignatureMethod + 'static) -> Self {
        self.signature_method = Box::new(method);
        self
    }

    /// Replace the HTTP transport.
    #[must_use]
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Box::new(transport);
        self
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.server_url)
    }

    /// Sign `method url` and return the `Authorization` header value.
    pub fn authorization_header(&self, method: Method, url: &str) -> Result<String, MamboError> {
        let mut request =
            SignedRequest::from_consumer_and_token(&self.consumer, None, method.as_str(), url);
        request.sign(&*self.signature_method, &self.consumer, None)?;
        debug!(
            method = %method,
            signature_method = self.signature_method.name(),
            base_string = %request.signature_base_string(),
            "Signed request"
        );
        Ok(request.authorization_header(None))
    }

    /// Perform a signed JSON request.
    ///
    /// Empty response bodies decode to [`Value::Null`].
    pub fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, MamboError> {
        let body = body.map(serde_json::to_vec).transpose()?;
        self.execute(method, path, body, "application/json")
    }

    /// Perform a signed request with `data` serialized as the JSON body.
    pub fn request_with<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        data: &T,
    ) -> Result<Value, MamboError> {
        let body = serde_json::to_vec(data)?;
        self.execute(method, path, Some(body), "application/json")
    }

    /// Upload an image as `multipart/form-data`.
    ///
    /// # Errors
    ///
    /// Returns [`MamboError::InvalidArgument`] if `image` is empty.
    pub fn upload(
        &self,
        path: &str,
        image: &[u8],
        filename: &str,
        content_type: &str,
    ) -> Result<Value, MamboError> {
        if image.is_empty() {
            return Err(MamboError::InvalidArgument(
                "image must not be empty".to_owned(),
            ));
        }

        let boundary = format!("----MamboFormBoundary{:016x}", rand::rng().random::<u64>());
        let mut body = Vec::with_capacity(image.len() + 256);
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        body.extend_from_slice(
            format!("Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n")
                .as_bytes(),
        );
        body.extend_from_slice(format!("Content-Type: {content_type}\r\n\r\n").as_bytes());
        body.extend_from_slice(image);
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

        self.execute(
            Method::Post,
            path,
            Some(body),
            &format!("multipart/form-data; boundary={boundary}"),
        )
    }

    fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
        content_type: &str,
    ) -> Result<Value, MamboError> {
        let url = self.url(path);
        info!("{method} {url}");

        let mut headers = vec![
            (
                "Authorization".to_owned(),
                self.authorization_header(method, &url)?,
            ),
            ("Accept".to_owned(), "application/json".to_owned()),
        ];
        if body.is_some() {
            headers.push(("Content-Type".to_owned(), content_type.to_owned()));
        }

        let response = self.transport.send(OutgoingRequest {
            method,
            url,
            headers,
            body,
        })?;

        if response.status >= 400 {
            return Err(MamboError::HttpResponse {
                status: response.status,
                body: response.body,
            });
        }
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    pub fn analytics(&self) -> Analytics<'_> {
        Analytics::new(self)
    }

    pub fn behaviours(&self) -> Behaviours<'_> {
        Behaviours::new(self)
    }

    pub fn coupons(&self) -> Coupons<'_> {
        Coupons::new(self)
    }

    pub fn custom_fields(&self) -> CustomFields<'_> {
        CustomFields::new(self)
    }

    pub fn data_stores(&self) -> DataStores<'_> {
        DataStores::new(self)
    }

    pub fn languages(&self) -> Languages<'_> {
        Languages::new(self)
    }

    pub fn leaderboards(&self) -> Leaderboards<'_> {
        Leaderboards::new(self)
    }

    pub fn rewards(&self) -> Rewards<'_> {
        Rewards::new(self)
    }

    pub fn tags(&self) -> Tags<'_> {
        Tags::new(self)
    }

    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }
}

impl fmt::Debug for MamboClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MamboClient")
            .field("server_url", &self.server_url)
            .field("consumer", &self.consumer)
            .field("signature_method", &self.signature_method.name())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use mambo_oauth::{MemoryStore, OAuthServer, Plaintext, SignedRequest};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    pub(crate) const PUBLIC_KEY: &str = "public-key";
    pub(crate) const PRIVATE_KEY: &str = "private-key";

    pub(crate) fn test_client() -> (MamboClient, RecordingTransport) {
        let transport = RecordingTransport::default();
        let client = MamboClient::new("https://api.mambo.io/", PUBLIC_KEY, PRIVATE_KEY)
            .with_transport(transport.clone());
        (client, transport)
    }

    /// Verify the request's signature the way the API server would.
    pub(crate) fn assert_signed(request: &OutgoingRequest) {
        let store = MemoryStore::new().with_consumer(Consumer::new(PUBLIC_KEY, PRIVATE_KEY));
        let server = OAuthServer::new(store)
            .with_signature_method(HmacSha1)
            .with_signature_method(Plaintext);
        let header = request.header("Authorization").unwrap();
        let signed =
            SignedRequest::from_authorization_header(request.method.as_str(), &request.url, header);
        let consumer = server.verify_consumer_request(&signed).unwrap();
        assert_eq!(consumer.key(), PUBLIC_KEY);
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let (client, _) = test_client();
        assert_eq!(client.server_url(), "https://api.mambo.io");
        assert_eq!(client.url("/v1/tags"), "https://api.mambo.io/v1/tags");
    }

    #[test]
    fn test_request_is_signed_with_query() {
        let (client, transport) = test_client();
        client
            .request(Method::Get, "/v1/acme/users?page=2&tags=a%20b", None)
            .unwrap();

        let sent = transport.last();
        assert_eq!(sent.method, Method::Get);
        assert_eq!(sent.body, None);
        assert_eq!(sent.header("Content-Type"), None);
        assert_signed(&sent);
    }

    #[test]
    fn test_tampered_query_fails_verification() {
        let (client, transport) = test_client();
        client
            .request(Method::Get, "/v1/acme/users?page=2", None)
            .unwrap();

        let sent = transport.last();
        let store = MemoryStore::new().with_consumer(Consumer::new(PUBLIC_KEY, PRIVATE_KEY));
        let server = OAuthServer::new(store).with_signature_method(HmacSha1);
        let tampered = SignedRequest::from_authorization_header(
            "GET",
            "https://api.mambo.io/v1/acme/users?page=3",
            sent.header("Authorization").unwrap(),
        );
        assert!(matches!(
            server.verify_consumer_request(&tampered),
            Err(mambo_oauth::OAuthError::InvalidSignature)
        ));
    }

    #[test]
    fn test_json_body_sent() {
        let (client, transport) = test_client();
        transport.respond(200, r#"{"id":"t1"}"#);

        let response = client
            .request(Method::Post, "/v1/acme/tags", Some(&json!({"name": "VIP"})))
            .unwrap();

        assert_eq!(response, json!({"id": "t1"}));
        let sent = transport.last();
        assert_eq!(sent.header("Content-Type"), Some("application/json"));
        assert_eq!(sent.body.unwrap(), br#"{"name":"VIP"}"#.to_vec());
    }

    #[test]
    fn test_empty_body_is_null() {
        let (client, transport) = test_client();
        transport.respond(204, "");
        let response = client.request(Method::Delete, "/v1/tags/t1", None).unwrap();
        assert_eq!(response, Value::Null);
    }

    #[test]
    fn test_error_status_maps_to_http_response() {
        let (client, transport) = test_client();
        transport.respond(404, r#"{"message":"not found"}"#);

        let err = client.request(Method::Get, "/v1/tags/t1", None).unwrap_err();
        match err {
            MamboError::HttpResponse { status, body } => {
                assert_eq!(status, 404);
                assert!(body.contains("not found"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_json_response() {
        let (client, transport) = test_client();
        transport.respond(200, "<html>");
        let err = client.request(Method::Get, "/v1/tags/t1", None).unwrap_err();
        assert!(matches!(err, MamboError::Json(_)));
    }

    #[test]
    fn test_upload_multipart() {
        let (client, transport) = test_client();
        client
            .upload("/v1/behaviours/b1/image", b"PNGDATA", "badge.png", "image/png")
            .unwrap();

        let sent = transport.last();
        let content_type = sent.header("Content-Type").unwrap();
        let boundary = content_type
            .strip_prefix("multipart/form-data; boundary=")
            .unwrap();
        let body = String::from_utf8(sent.body.clone().unwrap()).unwrap();
        assert!(body.starts_with(&format!("--{boundary}\r\n")));
        assert!(body.contains("filename=\"badge.png\""));
        assert!(body.contains("Content-Type: image/png\r\n\r\nPNGDATA\r\n"));
        assert!(body.ends_with(&format!("--{boundary}--\r\n")));
        assert_signed(&sent);
    }

    #[test]
    fn test_upload_rejects_empty_image() {
        let (client, transport) = test_client();
        let err = client
            .upload("/v1/behaviours/b1/image", b"", "badge.png", "image/png")
            .unwrap_err();
        assert!(matches!(err, MamboError::InvalidArgument(_)));
        assert!(transport.sent().is_empty());
    }

    #[test]
    fn test_plaintext_signature_method() {
        let (client, transport) = test_client();
        let client = client.with_signature_method(Plaintext);
        client.request(Method::Get, "/v1/acme/tags", None).unwrap();

        let sent = transport.last();
        let header = sent.header("Authorization").unwrap();
        assert!(header.contains("oauth_signature_method=\"PLAINTEXT\""));
        assert!(header.contains("oauth_signature=\"private-key%26\""));
        assert_signed(&sent);
    }

    #[test]
    fn test_from_config_rejects_missing_keys() {
        let config = ApiConfig::default();
        assert!(matches!(
            MamboClient::from_config(&config),
            Err(MamboError::Config(_))
        ));
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let (client, _) = test_client();
        assert!(!format!("{client:?}").contains(PRIVATE_KEY));
    }
}
