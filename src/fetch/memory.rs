use super::FetchError;
use crate::traits::PageFetcher;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use url::Url;

/// Serves page bodies from memory, keyed by absolute URL.
///
/// Unknown URLs fail with [`FetchError::Status`] 404. Every request is
/// recorded so callers can assert on what was fetched and in which order.
#[derive(Debug, Default)]
pub struct MemoryFetcher {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl MemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a body for `url`; the URL is normalised the same way requests are
    pub fn with_page(mut self, url: &str, body: impl Into<String>) -> Self {
        let key = Url::parse(url)
            .map(|parsed| parsed.to_string())
            .unwrap_or_else(|_| url.to_string());
        self.pages.insert(key, body.into());
        self
    }

    /// URLs requested so far, oldest first
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|requests| requests.len()).unwrap_or(0)
    }
}

#[async_trait]
impl PageFetcher for MemoryFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }
        self.pages
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_registered_pages() {
        let fetcher = MemoryFetcher::new().with_page("http://example.org/a", "<p>a</p>");
        let url = Url::parse("http://example.org/a").unwrap();

        assert_eq!(fetcher.fetch(&url).await.unwrap(), "<p>a</p>");
        assert_eq!(fetcher.requests(), vec!["http://example.org/a".to_string()]);
    }

    #[tokio::test]
    async fn test_unknown_page_is_404() {
        let fetcher = MemoryFetcher::new();
        let url = Url::parse("http://example.org/missing").unwrap();

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
        assert_eq!(fetcher.request_count(), 1);
    }

    #[tokio::test]
    async fn test_keys_are_normalised() {
        // Url::parse adds the trailing slash to bare hosts
        let fetcher = MemoryFetcher::new().with_page("http://example.org", "root");
        let url = Url::parse("http://example.org/").unwrap();
        assert_eq!(fetcher.fetch(&url).await.unwrap(), "root");
    }
}
