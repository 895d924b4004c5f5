//! HTTP transport
//!
//! The builders only produce a URL and a body; a [`Transport`] sends them.
//! No retries, no connection management beyond what the underlying client
//! does.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::warn;

use crate::config::ClientConfig;
use crate::Result;

pub use reqwest::Method;

/// Sends a single request and returns the raw response body
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, method: Method, url: &str, body: Option<String>) -> Result<Bytes>;
}

/// [`Transport`] backed by a shared `reqwest` client
///
/// Non-success statuses are not errors: the engine reports failures in the
/// response body, which the parsers decode.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a transport using the timeouts from `config`
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, method: Method, url: &str, body: Option<String>) -> Result<Bytes> {
        let mut request = self.client.request(method.clone(), url);
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("{} {} returned {}", method, url, status);
        }

        Ok(response.bytes().await?)
    }
}
