//! HTTP page fetching.
//!
//! Vendor pages are plain unauthenticated GETs. The fetcher is a trait so the
//! aggregator can be driven by canned pages in tests.

use crate::error::FeedError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Something that can load a page body by URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return the body as text. Non-2xx responses are errors.
    async fn fetch(&self, url: &str) -> Result<String, FeedError>;
}

/// Options for [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Whole-request timeout. `None` waits for the transport to give up.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: concat!("gold-watch/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// `reqwest` backed fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self, FeedError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.as_str());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, FeedError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        debug!(url = url, bytes = body.len(), "Fetched page");
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetcher_config_default() {
        let config = FetcherConfig::default();
        assert!(config.timeout.is_none());
        assert!(config.user_agent.starts_with("gold-watch/"));
    }

    #[test]
    fn test_http_fetcher_builds_with_timeout() {
        let config = FetcherConfig {
            timeout: Some(Duration::from_secs(10)),
            ..Default::default()
        };
        assert!(HttpFetcher::new(&config).is_ok());
    }
}
