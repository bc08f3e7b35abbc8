//! HTTP transport seam
//!
//! The client only needs "POST a body with headers, get back a status, headers
//! and a body". [`Transport`] captures exactly that, so a custom HTTP client, a
//! proxy or a test double can stand in for the default reqwest transport.
//!
//! Requests and responses are plain data: the transport never sees credentials
//! as anything but an already-encoded body, and never interprets the response.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{RegruError, Result};

/// An HTTP POST request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Absolute URL.
    pub url: String,
    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Encoded request body.
    pub body: String,
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Header name/value pairs.
    pub headers: Vec<(String, String)>,
    /// Response body as text.
    pub body: String,
}

impl HttpResponse {
    /// A response with the given status and body and no headers.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes one HTTP round trip.
///
/// Implementations must be safe to share between concurrent callers. Deadlines
/// and cancellation are enforced by the client around [`send`](Self::send), so
/// an implementation only has to return once the exchange is over.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `request` and returns the response, whatever its status.
    ///
    /// Errors are reserved for failures to complete the exchange (connection
    /// refused, broken body, ...), never for non-2xx statuses.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Default connect timeout of [`ReqwestTransport`], in seconds.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default [`Transport`] backed by a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport whose requests time out after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .timeout(timeout)
            .build()
            .map_err(|e| RegruError::NetworkError {
                detail: format!("Failed to create HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }

    /// Wraps an already configured `reqwest::Client`.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.body(request.body).send().await.map_err(|e| {
            if e.is_timeout() {
                RegruError::Timeout {
                    detail: e.to_string(),
                }
            } else {
                RegruError::NetworkError {
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();

        let body = response
            .text()
            .await
            .map_err(|e| RegruError::NetworkError {
                detail: format!("Failed to read response body: {e}"),
            })?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}
