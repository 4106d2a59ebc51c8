//! `mambo verify` command implementation.

use clap::Args;
use mambo_config::Config;
use mambo_oauth::{
    Consumer, HmacSha1, MemoryStore, OAuthError, OAuthServer, Plaintext, SignedRequest, Token,
};
use tracing::debug;

use super::{ApiArgs, TokenArgs};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the verify command.
#[derive(Args)]
pub(crate) struct VerifyArgs {
    /// HTTP method the request was sent with.
    method: String,

    /// Full request URL, including any `oauth_*` query parameters.
    url: String,

    /// `Authorization` header value, if the protocol parameters were sent there.
    #[arg(long)]
    authorization: Option<String>,

    /// Allowed clock skew in seconds (overrides config).
    #[arg(long)]
    threshold: Option<u64>,

    #[command(flatten)]
    token: TokenArgs,

    #[command(flatten)]
    api: ApiArgs,
}

impl VerifyArgs {
    /// Execute the verify command.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails verification.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.load_config()?;

        let request = match &self.authorization {
            Some(header) => {
                SignedRequest::from_authorization_header(&self.method, &self.url, header)
            }
            None => SignedRequest::from_url(&self.method, &self.url),
        };
        debug!(
            base_string = %request.signature_base_string(),
            from_header = self.authorization.is_some(),
            "Verifying request"
        );
        let consumer = verify_signed(&config, self.token.token().as_ref(), &request)?;

        output.success(&format!("Signature valid for consumer {}", consumer.key()));
        Ok(())
    }

    fn load_config(&self) -> Result<Config, CliError> {
        let mut config = self.api.load_config()?;
        if let Some(threshold) = self.threshold {
            config.oauth.timestamp_threshold_secs = threshold;
            config.validate()?;
        }
        Ok(config)
    }
}

/// Verify a request against the configured consumer.
///
/// With a token the request must carry it as an access token; without one it
/// is checked as a two-legged request.
pub(crate) fn verify_signed(
    config: &Config,
    token: Option<&Token>,
    request: &SignedRequest,
) -> Result<Consumer, CliError> {
    let api = config.require_api()?;
    let consumer = Consumer::new(api.public_key.as_str(), api.private_key.as_str());
    let store = MemoryStore::new().with_consumer(consumer.clone());
    if let Some(token) = token {
        store
            .add_access_token(&consumer, token.clone())
            .map_err(OAuthError::from)?;
    }
    let server = OAuthServer::new(store)
        .with_signature_method(HmacSha1)
        .with_signature_method(Plaintext)
        .with_timestamp_threshold(config.oauth.timestamp_threshold_secs);
    if token.is_some() {
        let (consumer, _) = server.verify_request(request)?;
        Ok(consumer)
    } else {
        Ok(server.verify_consumer_request(request)?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::commands::sign::sign_url;
    use crate::commands::tests::api_args;

    #[test]
    fn test_signed_url_verifies() {
        let dir = tempfile::tempdir().unwrap();
        let config = api_args(dir.path()).load_config().unwrap();
        let signed =
            sign_url(&config.api, None, "GET", "https://api.mambo.io/v1/acme/tags").unwrap();

        let received = SignedRequest::from_url("GET", &signed.to_url());

        assert_eq!(verify_signed(&config, None, &received).unwrap().key(), "pub");
    }

    #[test]
    fn test_header_signed_request_verifies() {
        let dir = tempfile::tempdir().unwrap();
        let config = api_args(dir.path()).load_config().unwrap();
        let url = "https://api.mambo.io/v1/acme/users?page=1";
        let signed = sign_url(&config.api, None, "DELETE", url).unwrap();

        let received = SignedRequest::from_authorization_header(
            "DELETE",
            url,
            &signed.authorization_header(None),
        );

        assert!(verify_signed(&config, None, &received).is_ok());
    }

    #[test]
    fn test_tampered_url_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = api_args(dir.path()).load_config().unwrap();
        let signed = sign_url(
            &config.api,
            None,
            "GET",
            "https://api.mambo.io/v1/acme/users?page=1",
        )
        .unwrap();

        let tampered = signed.to_url().replace("page=1", "page=2");
        let received = SignedRequest::from_url("GET", &tampered);

        assert!(matches!(
            verify_signed(&config, None, &received),
            Err(CliError::OAuth(_))
        ));
    }

    #[test]
    fn test_zero_threshold_override_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let args = VerifyArgs {
            method: "GET".to_owned(),
            url: "https://api.mambo.io/v1/acme/tags".to_owned(),
            authorization: None,
            threshold: Some(0),
            token: TokenArgs {
                token: None,
                token_secret: None,
            },
            api: api_args(dir.path()),
        };

        assert!(matches!(args.load_config(), Err(CliError::Config(_))));
    }

    #[test]
    fn test_token_signed_request_verifies() {
        let dir = tempfile::tempdir().unwrap();
        let config = api_args(dir.path()).load_config().unwrap();
        let token = Token::new("tok", "tok-secret", mambo_oauth::TokenKind::Access);
        let signed =
            sign_url(&config.api, Some(&token), "GET", "https://api.mambo.io/v1/x").unwrap();
        let received = SignedRequest::from_url("GET", &signed.to_url());

        assert!(verify_signed(&config, Some(&token), &received).is_ok());

        let wrong = Token::new("tok", "other-secret", mambo_oauth::TokenKind::Access);
        assert!(verify_signed(&config, Some(&wrong), &received).is_err());
    }
}
