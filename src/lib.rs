//! # Placemark
//!
//! A paced crawler that walks an index page of places, resolves every detail
//! page to a coordinate and keeps a small rolling window of map markers for
//! the most recently resolved places.
//!
//! Pacing follows the map, not the network: the next detail page is only
//! requested after the view reports that its go-to animation finished and a
//! fixed settle delay elapsed. At most one fetch is ever in flight.
//!
//! The map widget, its overlay layer and the HTTP client are collaborators
//! supplied by the host through the traits in [`traits`].

pub mod core;
pub mod fetch;
pub mod layers;
pub mod parse;
pub mod pipeline;
pub mod prelude;
pub mod traits;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    builder::CrawlerBuilder,
    config::{CrawlConfig, SelectorConfig},
    geo::LatLng,
    place::{Locator, Place},
};

pub use fetch::{FetchError, MemoryFetcher};

#[cfg(feature = "http")]
pub use fetch::HttpFetcher;

pub use layers::{
    marker::{Marker, MarkerId, MarkerStyle},
    window::MarkerWindow,
};

pub use parse::{DetailError, DetailParser, IndexParser, Selectors};

pub use pipeline::{
    driver::{CrawlHandle, CrawlReport, PacedDriver, PipelineState},
    events::{ViewEvent, ViewEvents, ViewNotifier},
    queue::DiscoveryQueue,
};

pub use traits::{MapView, MarkerLayer, NullLayer, PageFetcher};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that stop a crawl or prevent one from starting.
///
/// Per-page problems (a failed detail fetch, a page without coordinates, a
/// malformed coordinate) never surface here; the pipeline skips the page and
/// records it in the [`CrawlReport`].
#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    #[error("Index fetch from {url} failed: {source}")]
    IndexFetch {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Error type alias for convenience
pub type Error = CrawlError;
