//! Page fetching
//!
//! [`HttpFetcher`] is the production fetcher built on reqwest. [`MemoryFetcher`]
//! serves canned bodies, which is how the pipeline is exercised offline.

#[cfg(feature = "http")]
pub mod http;
pub mod memory;

#[cfg(feature = "http")]
pub use http::HttpFetcher;
pub use memory::MemoryFetcher;

/// Why a single page could not be retrieved
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[cfg(feature = "http")]
    #[error("Network error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Transport error: {0}")]
    Transport(String),
}
