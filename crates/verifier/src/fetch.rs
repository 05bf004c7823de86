//! Remote update feed retrieval.

use async_trait::async_trait;
use shipcheck_common::{Error, Result};
use std::time::Duration;
use tracing::debug;

/// Source of the update feed document.
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Fetch the document body at `url`.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetches the feed over HTTP(S) with a hard timeout.
pub struct HttpFeedFetcher {
    client: reqwest::Client,
}

impl HttpFeedFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| Error::Http(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Http(describe(&e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http(format!("HTTP {} from {}", status, url)));
        }

        response
            .text()
            .await
            .map_err(|e| Error::Http(format!("failed to read body: {}", e)))
    }
}

fn describe(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        format!("request timed out: {}", err)
    } else if err.is_connect() {
        format!("connection failed: {}", err)
    } else {
        err.to_string()
    }
}
