//! Shared HTTP client for upstream requests.

use std::time::Duration;

use reqwest::{Client, Response};
use thiserror::Error;
use url::Url;

/// Errors raised before an upstream response is available.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum UpstreamError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("no response headers within {0:?}")]
    HeadersTimeout(Duration),
}

/// HTTP client with a bound on time-to-headers and no bound on body transfer.
///
/// Bodies can be large or slow, so only the wait for the response head is
/// limited; the body is read without a deadline.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    headers_timeout: Duration,
}

impl UpstreamClient {
    /// Creates new client.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(user_agent: &str, headers_timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(user_agent)
            .connect_timeout(headers_timeout)
            .build()?;

        Ok(Self {
            client,
            headers_timeout,
        })
    }

    /// Sends a GET request and waits for the response head.
    ///
    /// # Errors
    /// Returns error on connection failure or when headers take too long.
    pub async fn get(&self, url: Url) -> Result<Response, UpstreamError> {
        tokio::time::timeout(self.headers_timeout, self.client.get(url).send())
            .await
            .map_err(|_| UpstreamError::HeadersTimeout(self.headers_timeout))?
            .map_err(UpstreamError::from)
    }
}
