//! Transport trait and reqwest implementation
//!
//! A transport issues exactly one HTTP GET with query-parameter encoding
//! and a per-call timeout, and reports status and body without judging
//! either. Classification of outcomes belongs to the retry layer.

use super::rate_limit::{PacerConfig, RequestPacer};
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

/// Raw outcome of a single GET
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body, undecoded
    pub body: String,
}

/// Capability to issue one network request
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one GET to `url` with `query` encoded into the query string.
    ///
    /// Timeouts surface as `Error::Timeout`; other network-level
    /// failures as `Error::Http`. Non-2xx responses are returned as
    /// data, not errors.
    async fn send(
        &self,
        url: &str,
        query: &HashMap<String, String>,
        timeout: Duration,
    ) -> Result<TransportResponse>;
}

// ============================================================================
// Reqwest Transport
// ============================================================================

/// Configuration for the reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransportConfig {
    /// User agent sent with every request
    pub user_agent: String,
    /// Pacer applied before each request, if any
    pub pacer: Option<PacerConfig>,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("adscope/{}", env!("CARGO_PKG_VERSION")),
            pacer: Some(PacerConfig::default()),
        }
    }
}

impl HttpTransportConfig {
    /// Create a config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the user agent
    #[must_use]
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Set the pacer config
    #[must_use]
    pub fn with_pacer(mut self, pacer: PacerConfig) -> Self {
        self.pacer = Some(pacer);
        self
    }

    /// Disable pacing
    #[must_use]
    pub fn without_pacer(mut self) -> Self {
        self.pacer = None;
        self
    }
}

/// reqwest-backed transport with optional request pacing
pub struct HttpTransport {
    client: Client,
    pacer: Option<RequestPacer>,
}

impl HttpTransport {
    /// Create a transport with default configuration
    pub fn new() -> Self {
        Self::with_config(HttpTransportConfig::default())
    }

    /// Create a transport with custom configuration
    pub fn with_config(config: HttpTransportConfig) -> Self {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .build()
            .expect("Failed to build HTTP client");

        let pacer = config.pacer.as_ref().map(RequestPacer::new);

        Self { client, pacer }
    }

    /// Check if pacing is enabled
    pub fn has_pacer(&self) -> bool {
        self.pacer.is_some()
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("has_pacer", &self.pacer.is_some())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(
        &self,
        url: &str,
        query: &HashMap<String, String>,
        timeout: Duration,
    ) -> Result<TransportResponse> {
        if let Some(pacer) = &self.pacer {
            pacer.wait().await;
        }

        let response = self
            .client
            .get(url)
            .query(query)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify_reqwest_error(e, timeout))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| classify_reqwest_error(e, timeout))?;

        debug!(status, bytes = body.len(), "request completed");
        Ok(TransportResponse { status, body })
    }
}

/// Map reqwest failures onto the crate taxonomy: timeouts are the only
/// recoverable kind, everything else is a transport error.
fn classify_reqwest_error(e: reqwest::Error, timeout: Duration) -> Error {
    if e.is_timeout() {
        Error::timeout(timeout)
    } else {
        Error::Http(e)
    }
}
