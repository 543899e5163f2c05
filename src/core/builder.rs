//! Crawler builder for fluent configuration
//!
//! The builder owns the view event channel from the start, so a map view
//! can be handed its [`ViewNotifier`] before the driver exists.

use crate::{
    core::config::CrawlConfig,
    pipeline::{
        driver::{CrawlHandle, PacedDriver},
        events::{ViewEvents, ViewNotifier},
    },
    traits::{MapView, MarkerLayer, NullLayer, PageFetcher},
    CrawlError, Result,
};
use std::time::Duration;

/// Builder for creating and configuring a [`PacedDriver`]
pub struct CrawlerBuilder {
    config: CrawlConfig,
    fetcher: Option<Box<dyn PageFetcher>>,
    view: Option<Box<dyn MapView>>,
    layer: Option<Box<dyn MarkerLayer>>,
    notifier: ViewNotifier,
    events: ViewEvents,
}

impl CrawlerBuilder {
    /// Create a new builder with the default capitals-tour configuration
    pub fn new() -> Self {
        let (notifier, events) = ViewNotifier::channel();
        Self {
            config: CrawlConfig::default(),
            fetcher: None,
            view: None,
            layer: None,
            notifier,
            events,
        }
    }

    /// Notifier the map view reports animation completions through
    pub fn notifier(&self) -> ViewNotifier {
        self.notifier.clone()
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: CrawlConfig) -> Self {
        self.config = config;
        self
    }

    /// Set how many markers stay on the map
    pub fn with_window_capacity(mut self, capacity: usize) -> Self {
        self.config.window_capacity = capacity;
        self
    }

    /// Set the pause between an animation completing and the next fetch
    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.config.settle_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Set the index page and the base URI its links are relative to
    pub fn with_urls(mut self, base_url: impl Into<String>, index_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self.config.index_url = index_url.into();
        self
    }

    pub fn with_fetcher(mut self, fetcher: impl PageFetcher + 'static) -> Self {
        self.fetcher = Some(Box::new(fetcher));
        self
    }

    pub fn with_view(mut self, view: impl MapView + 'static) -> Self {
        self.view = Some(Box::new(view));
        self
    }

    pub fn with_layer(mut self, layer: impl MarkerLayer + 'static) -> Self {
        self.layer = Some(Box::new(layer));
        self
    }

    /// Validate the configuration and assemble the driver.
    ///
    /// A view is mandatory since it paces the crawl. Without a fetcher the
    /// built-in HTTP fetcher is used when the `http` feature is enabled.
    pub fn build(self) -> Result<(PacedDriver, CrawlHandle)> {
        let view = self
            .view
            .ok_or_else(|| CrawlError::InvalidConfig("a map view is required".to_string()))?;
        let fetcher = match self.fetcher {
            Some(fetcher) => fetcher,
            None => default_fetcher(&self.config)?,
        };
        let layer = self
            .layer
            .unwrap_or_else(|| Box::new(NullLayer) as Box<dyn MarkerLayer>);

        // The builder's own notifier must not keep the channel open
        drop(self.notifier);
        PacedDriver::new(self.config, fetcher, view, layer, self.events)
    }
}

#[cfg(feature = "http")]
fn default_fetcher(config: &CrawlConfig) -> Result<Box<dyn PageFetcher>> {
    let fetcher = crate::fetch::HttpFetcher::from_config(config)
        .map_err(|e| CrawlError::InvalidConfig(format!("cannot build HTTP client: {e}")))?;
    Ok(Box::new(fetcher))
}

#[cfg(not(feature = "http"))]
fn default_fetcher(_config: &CrawlConfig) -> Result<Box<dyn PageFetcher>> {
    Err(CrawlError::InvalidConfig(
        "a page fetcher is required".to_string(),
    ))
}

impl Default for CrawlerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
