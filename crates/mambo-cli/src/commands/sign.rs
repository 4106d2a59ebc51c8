//! `mambo sign` command implementation.

use clap::Args;
use mambo_config::ApiConfig;
use mambo_oauth::{Consumer, SignedRequest, Token};

use super::{ApiArgs, TokenArgs, signature_method};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the sign command.
#[derive(Args)]
pub(crate) struct SignArgs {
    /// HTTP method.
    method: String,

    /// Absolute URL, or a path resolved against the server URL.
    url: String,

    #[command(flatten)]
    token: TokenArgs,

    #[command(flatten)]
    api: ApiArgs,
}

impl SignArgs {
    /// Execute the sign command.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are missing or signing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.api.load_config()?;
        let api = config.require_api()?;

        let token = self.token.token();
        let url = resolve_url(api, &self.url);
        let request = sign_url(api, token.as_ref(), &self.method, &url)?;

        output.highlight("Signature base string:");
        output.data(&request.signature_base_string())?;
        output.highlight("Authorization header:");
        output.data(&request.authorization_header(None))?;
        output.highlight("Signed URL:");
        output.data(&request.to_url())?;
        Ok(())
    }
}

pub(crate) fn resolve_url(api: &ApiConfig, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_owned()
    } else {
        format!("{}{url}", api.server_url.trim_end_matches('/'))
    }
}

/// Sign `url` with the configured consumer credentials, two-legged unless a
/// token is given.
pub(crate) fn sign_url(
    api: &ApiConfig,
    token: Option<&Token>,
    method: &str,
    url: &str,
) -> Result<SignedRequest, CliError> {
    let consumer = Consumer::new(api.public_key.as_str(), api.private_key.as_str());
    let mut request = SignedRequest::from_consumer_and_token(&consumer, token, method, url);
    request.sign(&*signature_method(api.signature_method), &consumer, token)?;
    Ok(request)
}
