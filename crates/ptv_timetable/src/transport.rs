//! HTTP transport
//!
//! One GET per call, no retries. The timeout is applied when the HTTP client
//! is built and never appears in the signed URL.

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest::Client;
use tracing::debug;

use crate::config::PtvConfig;
use crate::error::PtvError;

/// Status and body of an HTTP response, before any interpretation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body bytes
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Create a response from a status and body
    #[must_use]
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Issues GET requests against fully built URLs
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform a single GET
    async fn get(&self, url: &str) -> Result<RawResponse, PtvError>;
}

/// [`HttpTransport`] backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout_secs: u64,
}

impl ReqwestTransport {
    /// Create a transport with the configured timeout and user agent
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &PtvConfig) -> Result<Self, PtvError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| PtvError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs: config.timeout_secs,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<RawResponse, PtvError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                PtvError::Timeout {
                    timeout_secs: self.timeout_secs,
                }
            } else {
                PtvError::ConnectionFailed(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                PtvError::Timeout {
                    timeout_secs: self.timeout_secs,
                }
            } else {
                PtvError::ConnectionFailed(e.to_string())
            }
        })?;

        debug!(status, bytes = body.len(), "Received response");
        Ok(RawResponse {
            status,
            body: body.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_response_new() {
        let response = RawResponse::new(200, "{}");
        assert_eq!(response.status, 200);
        assert_eq!(response.body, b"{}");
    }

    #[test]
    fn test_transport_from_config() {
        let transport = ReqwestTransport::new(&PtvConfig::for_testing()).unwrap();
        assert_eq!(transport.timeout_secs, 5);
    }
}
