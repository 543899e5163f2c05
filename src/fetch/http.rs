use super::FetchError;
use crate::{core::config::CrawlConfig, core::constants::DEFAULT_USER_AGENT, traits::PageFetcher};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::time::Duration;
use url::Url;

/// Shared async HTTP client. Building the client once avoids the cost of TLS
/// and connection pool setup for every page.
pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    build_client(DEFAULT_USER_AGENT).expect("failed to build reqwest async client")
});

/// Connection settings shared by every client this module builds
fn build_client(user_agent: &str) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .tcp_keepalive(Duration::from_secs(30))
        .pool_idle_timeout(Duration::from_secs(90))
        .build()
}

/// Fetches pages over HTTP with reqwest
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    /// Uses the process-wide client with the default user agent
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: (*HTTP_CLIENT).clone(),
            timeout,
        }
    }

    /// Honours the configured user agent and timeout. The shared client is
    /// reused unless a custom user agent forces a dedicated one.
    pub fn from_config(config: &CrawlConfig) -> Result<Self, FetchError> {
        if config.user_agent == DEFAULT_USER_AGENT {
            return Ok(Self::new(config.request_timeout()));
        }
        Ok(Self {
            client: build_client(&config.user_agent)?,
            timeout: config.request_timeout(),
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        log::debug!("GET {}", url);
        let response = self
            .client
            .get(url.clone())
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        log::debug!("fetched {} ({} bytes)", url, body.len());
        Ok(body)
    }
}
