//! HTTP transport capability.
//!
//! The REST client never talks to the network directly. It hands a fully
//! signed [`HttpRequest`] to an [`HttpTransport`] and interprets the
//! [`HttpResponse`] it gets back. Connection handling, TLS, and enforcing the
//! timeout belong to the transport.

use std::fmt;
use std::time::Duration;

use http::{Method, StatusCode, header};
use reqwest::Url;
use reqwest::blocking::Client;
use rustpush_core::{PushError, PushResult};
use tracing::debug;

use crate::VERSION;

/// An outbound request, ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL without query string.
    pub url: String,
    /// Query parameters, including the signature. The transport encodes them.
    pub query: Vec<(String, String)>,
    /// JSON request body, sent byte-for-byte.
    pub body: Option<String>,
    /// Timeout for the whole exchange.
    pub timeout: Duration,
}

impl HttpRequest {
    /// Look up a query parameter by name.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a completed exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: StatusCode,
    /// Raw response body.
    pub body: String,
}

/// Blocking HTTP capability used by the REST client.
///
/// Implementations must be safe to share between threads; the client holds a
/// single transport behind an `Arc` and calls it concurrently.
pub trait HttpTransport: fmt::Debug + Send + Sync {
    /// Perform one exchange.
    ///
    /// # Errors
    ///
    /// Returns [`PushError::Transport`] when no response was received
    /// (connection failure, timeout, TLS failure). A response with any status
    /// code is a success at this layer.
    fn send(&self, request: HttpRequest) -> PushResult<HttpResponse>;
}

/// Default transport backed by a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with the library user agent.
    ///
    /// # Errors
    ///
    /// Returns [`PushError::Transport`] if the TLS backend cannot be
    /// initialized.
    pub fn new() -> PushResult<Self> {
        let client = Client::builder()
            .user_agent(format!("rustpush/{VERSION}"))
            .build()
            .map_err(|e| PushError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { client })
    }

    /// Wrap an already configured `reqwest` client.
    #[must_use]
    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

impl HttpTransport for ReqwestTransport {
    fn send(&self, request: HttpRequest) -> PushResult<HttpResponse> {
        let url = Url::parse_with_params(&request.url, &request.query)
            .map_err(|e| PushError::Config(format!("invalid URL {}: {e}", request.url)))?;

        debug!(method = %request.method, url = %request.url, "Sending request");

        let mut builder = self
            .client
            .request(request.method, url)
            .timeout(request.timeout);
        if let Some(body) = request.body {
            builder = builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = builder
            .send()
            .map_err(|e| PushError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .map_err(|e| PushError::Transport(format!("failed to read response body: {e}")))?;

        debug!(status = status.as_u16(), "Received response");

        Ok(HttpResponse { status, body })
    }
}
