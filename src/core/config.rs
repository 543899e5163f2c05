//! Configuration for the paced crawler
//!
//! The defaults reproduce the national-capitals tour: a Wikipedia index page,
//! five markers on screen and a one second pause after every go-to animation.
//! Hosts either tweak a preset or deserialize the whole struct themselves.

use crate::{
    core::constants::{
        DEFAULT_BASE_URL, DEFAULT_GEO_SELECTOR, DEFAULT_HEADING_SELECTOR,
        DEFAULT_INDEX_TABLE_SELECTOR, DEFAULT_INDEX_URL, DEFAULT_REQUEST_TIMEOUT_MS,
        DEFAULT_SETTLE_DELAY_MS, DEFAULT_USER_AGENT, DEFAULT_WINDOW_CAPACITY,
    },
    parse::Selectors,
    CrawlError, Result,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// CSS selectors describing where the crawler looks for links and coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// Table on the index page; every row's first cell links to a detail page
    pub index_table: String,
    /// Element holding the place name on a detail page
    pub heading: String,
    /// Element whose text is `"<lat>; <lon>"`
    pub geo: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            index_table: DEFAULT_INDEX_TABLE_SELECTOR.to_string(),
            heading: DEFAULT_HEADING_SELECTOR.to_string(),
            geo: DEFAULT_GEO_SELECTOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrawlConfig {
    pub base_url: String,
    pub index_url: String,
    pub window_capacity: usize,
    pub settle_delay_ms: u64,
    pub request_timeout_ms: u64,
    pub user_agent: String,
    pub selectors: SelectorConfig,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            index_url: DEFAULT_INDEX_URL.to_string(),
            window_capacity: DEFAULT_WINDOW_CAPACITY,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            selectors: SelectorConfig::default(),
        }
    }
}

impl CrawlConfig {
    /// No settle pause and short timeouts, for in-memory pipelines
    pub fn for_testing() -> Self {
        Self {
            base_url: "http://test.invalid".to_string(),
            index_url: "http://test.invalid/index".to_string(),
            settle_delay_ms: 0,
            request_timeout_ms: 1_000,
            ..Default::default()
        }
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    pub fn base_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.base_url)?)
    }

    pub fn index_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.index_url)?)
    }

    /// Checks every field the pipeline relies on before any fetch is issued
    pub fn validate(&self) -> Result<()> {
        if self.window_capacity == 0 {
            return Err(CrawlError::InvalidConfig(
                "window_capacity must be at least 1".to_string(),
            ));
        }
        if self.request_timeout_ms == 0 {
            return Err(CrawlError::InvalidConfig(
                "request_timeout_ms must be non-zero".to_string(),
            ));
        }
        self.base_url()?;
        self.index_url()?;
        Selectors::compile(&self.selectors)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_capitals_tour() {
        let config = CrawlConfig::default();
        assert_eq!(config.window_capacity, 5);
        assert_eq!(config.settle_delay(), Duration::from_secs(1));
        assert!(config.index_url.ends_with("/wiki/List_of_national_capitals"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_testing_preset() {
        let config = CrawlConfig::for_testing();
        assert_eq!(config.settle_delay(), Duration::ZERO);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_capacity() {
        let config = CrawlConfig {
            window_capacity: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CrawlError::InvalidConfig(_))));
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = CrawlConfig {
            index_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(CrawlError::InvalidUrl(_))));
    }

    #[test]
    fn test_validate_rejects_bad_selector() {
        let mut config = CrawlConfig::default();
        config.selectors.geo = "span[".to_string();
        assert!(matches!(
            config.validate(),
            Err(CrawlError::InvalidSelector(_))
        ));
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: CrawlConfig =
            serde_json::from_str(r#"{"window_capacity": 3, "settle_delay_ms": 250}"#).unwrap();
        assert_eq!(config.window_capacity, 3);
        assert_eq!(config.settle_delay(), Duration::from_millis(250));
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.selectors, SelectorConfig::default());
    }
}
