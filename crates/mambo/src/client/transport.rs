//! HTTP transport used by [`MamboClient`](super::MamboClient).

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use ureq::{Agent, RequestBuilder};

use crate::error::MamboError;

/// HTTP methods used by the Mambo API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = MamboError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            other => Err(MamboError::InvalidArgument(format!(
                "unsupported HTTP method '{other}'"
            ))),
        }
    }
}

/// Fully prepared request, already signed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl OutgoingRequest {
    /// First header value with the given name (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingResponse {
    pub status: u16,
    pub body: String,
}

/// Sends prepared requests over the wire.
///
/// Implementations must not treat error statuses as failures; the client
/// maps them to [`MamboError::HttpResponse`].
pub trait Transport: Send + Sync {
    fn send(&self, request: OutgoingRequest) -> Result<IncomingResponse, MamboError>;
}

/// Blocking transport backed by a `ureq` agent.
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();
        Self { agent }
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport").finish_non_exhaustive()
    }
}

fn with_headers<B>(
    mut builder: RequestBuilder<B>,
    headers: &[(String, String)],
) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

impl Transport for UreqTransport {
    fn send(&self, request: OutgoingRequest) -> Result<IncomingResponse, MamboError> {
        let OutgoingRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let response = match (method, body) {
            (Method::Get, _) => with_headers(self.agent.get(&url), &headers).call()?,
            (Method::Delete, None) => with_headers(self.agent.delete(&url), &headers).call()?,
            (Method::Delete, Some(body)) => {
                with_headers(self.agent.delete(&url).force_send_body(), &headers)
                    .send(&body[..])?
            }
            (Method::Post, None) => with_headers(self.agent.post(&url), &headers).send_empty()?,
            (Method::Post, Some(body)) => {
                with_headers(self.agent.post(&url), &headers).send(&body[..])?
            }
            (Method::Put, None) => with_headers(self.agent.put(&url), &headers).send_empty()?,
            (Method::Put, Some(body)) => {
                with_headers(self.agent.put(&url), &headers).send(&body[..])?
            }
        };

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();
        let body = if status >= 400 {
            body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_owned())
        } else {
            body_reader.read_to_string()?
        };
        Ok(IncomingResponse { status, body })
    }
}
