//! reg.ru API client

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::error::{RegruError, Result};
use crate::http_client::{Credentials, HttpUtils};
use crate::request::ShapedRequest;
use crate::response::ApiResponse;
use crate::transport::{ReqwestTransport, Transport};

/// reg.ru API v2 endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.reg.ru/api/regru2";
/// Default per-call deadline, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENV_USERNAME: &str = "REGRU_USERNAME";
const ENV_PASSWORD: &str = "REGRU_PASSWORD";
const ENV_BASE_URL: &str = "REGRU_BASE_URL";
const ENV_TIMEOUT_SECS: &str = "REGRU_TIMEOUT_SECS";

/// reg.ru DNS client.
///
/// Cheap to clone; clones share the underlying transport. Holds no per-call
/// state, so one handle can serve concurrent operations.
#[derive(Clone)]
pub struct RegruClient {
    pub(crate) transport: Arc<dyn Transport>,
    pub(crate) username: String,
    pub(crate) password: String,
    pub(crate) base_url: String,
    pub(crate) timeout: Duration,
    pub(crate) cancel: Option<CancellationToken>,
}

impl std::fmt::Debug for RegruClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegruClient")
            .field("username", &self.username)
            .field("password", &"***")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("cancellable", &self.cancel.is_some())
            .finish_non_exhaustive()
    }
}

/// `RegruClient` Builder
pub struct RegruClientBuilder {
    username: String,
    password: String,
    base_url: String,
    timeout: Duration,
    transport: Option<Arc<dyn Transport>>,
}

impl RegruClientBuilder {
    fn new(username: String, password: String) -> Self {
        Self {
            username,
            password,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            transport: None,
        }
    }

    /// Overrides the API base URL. A trailing `/` is ignored.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Per-call deadline, applied around every transport call.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the default reqwest transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<RegruClient> {
        if self.username.trim().is_empty() {
            return Err(RegruError::invalid_parameter("username", "must not be empty"));
        }
        if self.password.is_empty() {
            return Err(RegruError::invalid_parameter("password", "must not be empty"));
        }
        if self.timeout.is_zero() {
            return Err(RegruError::invalid_parameter("timeout", "must be positive"));
        }

        let base_url = self.base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(RegruError::invalid_parameter("base_url", "must not be empty"));
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(self.timeout)?),
        };

        Ok(RegruClient {
            transport,
            username: self.username,
            password: self.password,
            base_url,
            timeout: self.timeout,
            cancel: None,
        })
    }
}

/// Serializable client configuration.
///
/// ```rust
/// # use regru_dns::ClientConfig;
/// let config: ClientConfig = serde_json::from_str(
///     r#"{"username":"test","password":"test","timeout_secs":10}"#,
/// ).unwrap();
/// assert!(config.base_url.is_none());
/// ```
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub username: String,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("username", &self.username)
            .field("password", &"***")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ClientConfig {
    /// Reads `REGRU_USERNAME`, `REGRU_PASSWORD` and the optional
    /// `REGRU_BASE_URL` / `REGRU_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let require = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| RegruError::invalid_parameter(key, "environment variable not set"))
        };

        let timeout_secs = match lookup(ENV_TIMEOUT_SECS).filter(|v| !v.is_empty()) {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|e| {
                RegruError::invalid_parameter(ENV_TIMEOUT_SECS, format!("'{raw}': {e}"))
            })?),
            None => None,
        };

        Ok(Self {
            username: require(ENV_USERNAME)?,
            password: require(ENV_PASSWORD)?,
            base_url: lookup(ENV_BASE_URL).filter(|v| !v.is_empty()),
            timeout_secs,
        })
    }
}

impl RegruClient {
    /// Client with default endpoint, timeout and transport.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        Self::builder(username, password).build()
    }

    pub fn builder(username: impl Into<String>, password: impl Into<String>) -> RegruClientBuilder {
        RegruClientBuilder::new(username.into(), password.into())
    }

    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let mut builder = Self::builder(config.username, config.password);
        if let Some(base_url) = config.base_url {
            builder = builder.base_url(base_url);
        }
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        builder.build()
    }

    pub fn from_env() -> Result<Self> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Handle whose calls return [`RegruError::Cancelled`] once `token` fires.
    ///
    /// The original handle is unaffected.
    #[must_use]
    pub fn with_cancellation(&self, token: CancellationToken) -> Self {
        Self {
            cancel: Some(token),
            ..self.clone()
        }
    }

    /// API base URL, without trailing `/`.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Per-call deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Sends a shaped request and returns the raw body of a successful answer.
    pub(crate) async fn send<P: Serialize>(&self, shaped: &ShapedRequest<P>) -> Result<String> {
        let credentials = Credentials {
            username: &self.username,
            password: &self.password,
        };
        let request =
            HttpUtils::build_request(&self.base_url, shaped.path, credentials, &shaped.payload)?;

        HttpUtils::execute_request(
            self.transport.as_ref(),
            request,
            self.timeout,
            self.cancel.as_ref(),
            shaped.path,
        )
        .await
    }

    /// Sends a shaped request and decodes its `answer`.
    pub(crate) async fn request<T, P>(&self, shaped: &ShapedRequest<P>) -> Result<T>
    where
        T: DeserializeOwned + Default,
        P: Serialize,
    {
        let body = self.send(shaped).await?;
        let response: ApiResponse<T> = HttpUtils::parse_json(&body)?;
        Ok(response.into_answer())
    }
}
