//! `mambo request` command implementation.

use std::path::PathBuf;

use clap::Args;
use mambo::{MamboClient, Method};
use serde_json::Value;
use tracing::debug;

use super::ApiArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the request command.
#[derive(Args)]
pub(crate) struct RequestArgs {
    /// HTTP method: GET, POST, PUT or DELETE.
    #[arg(value_parser = parse_method)]
    method: Method,

    /// API path including query string, e.g. `/v1/acme/users?page=1`.
    path: String,

    /// JSON file sent as the request body.
    #[arg(short, long)]
    data: Option<PathBuf>,

    #[command(flatten)]
    api: ApiArgs,
}

impl RequestArgs {
    /// Execute the request command.
    ///
    /// # Errors
    ///
    /// Returns an error if the config is incomplete, the body is not JSON, or
    /// the API call fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        if !self.path.starts_with('/') {
            return Err(CliError::Validation(format!(
                "path must start with '/': {}",
                self.path
            )));
        }
        let config = self.api.load_config()?;
        let client = MamboClient::from_config(config.require_api()?)?;
        let body = self.data.as_deref().map(read_body).transpose()?;

        output.info(&format!("{} {}", self.method, client.url(&self.path)));
        let response = client.request(self.method, &self.path, body.as_ref())?;
        output.data(&serde_json::to_string_pretty(&response)?)?;
        Ok(())
    }
}

fn parse_method(value: &str) -> Result<Method, String> {
    value.parse().map_err(|e: mambo::MamboError| e.to_string())
}

fn read_body(path: &std::path::Path) -> Result<Value, CliError> {
    debug!(path = %path.display(), "Reading request body");
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
