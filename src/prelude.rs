//! Prelude module for common placemark types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use placemark::prelude::*;`

pub use crate::core::{
    builder::CrawlerBuilder,
    config::{CrawlConfig, SelectorConfig},
    geo::LatLng,
    place::{Locator, Place},
};

pub use crate::layers::{
    marker::{Marker, MarkerId, MarkerStyle},
    window::MarkerWindow,
};

pub use crate::pipeline::{
    driver::{CrawlHandle, CrawlReport, PacedDriver, PipelineState},
    events::{ViewEvent, ViewNotifier},
};

pub use crate::fetch::{FetchError, MemoryFetcher};

#[cfg(feature = "http")]
pub use crate::fetch::HttpFetcher;

pub use crate::traits::{MapView, MarkerLayer, NullLayer, PageFetcher};

pub use crate::{CrawlError, Result};

pub use std::{sync::Arc, time::Duration};
