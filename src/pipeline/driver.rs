//! Paced driver
//!
//! A single task walks the pipeline:
//!
//! ```text
//! Idle -> FetchingIndex -> Resolving -> AwaitDetail -> AwaitSettle -> Resolving -> ... -> Done
//!                                           |                            ^
//!                                           +---- no result / failure ---+
//! ```
//!
//! Only one fetch is ever outstanding, and after every displayed place the
//! driver waits for the view's animation-completed event plus the settle
//! delay. Cancellation is observed at every suspension point; a fetch or
//! event that completes afterwards is dropped with the future awaiting it.

use super::{
    events::{ViewEvent, ViewEvents},
    queue::DiscoveryQueue,
};
use crate::{
    core::{config::CrawlConfig, place::Locator, place::Place},
    fetch::FetchError,
    layers::{marker::Marker, window::MarkerWindow},
    parse::{DetailParser, IndexParser, Selectors},
    traits::{MapView, MarkerLayer, PageFetcher},
    CrawlError, Result,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use url::Url;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipelineState {
    #[default]
    Idle,
    FetchingIndex,
    Resolving,
    AwaitDetail,
    AwaitSettle,
    Done,
    Cancelled,
    /// The index page could not be fetched
    Failed,
}

impl PipelineState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Cancelled | Self::Failed)
    }
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::FetchingIndex => "fetching-index",
            Self::Resolving => "resolving",
            Self::AwaitDetail => "await-detail",
            Self::AwaitSettle => "await-settle",
            Self::Done => "done",
            Self::Cancelled => "cancelled",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Outcome of a crawl that was not stopped by an index failure
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct CrawlReport {
    /// `Done` or `Cancelled`
    pub state: PipelineState,
    /// Locators found on the index page
    pub discovered: usize,
    /// Places inserted into the marker window
    pub displayed: usize,
    /// Detail pages without a heading or coordinates
    pub no_result: usize,
    /// Detail pages whose coordinate text could not be read
    pub malformed: usize,
    /// Detail pages that could not be resolved or fetched
    pub fetch_failed: usize,
    /// Window contents when the crawl stopped, oldest first
    pub markers: Vec<Marker>,
}

impl CrawlReport {
    pub fn places(&self) -> impl Iterator<Item = &Place> + '_ {
        self.markers.iter().map(Marker::place)
    }

    pub fn current(&self) -> Option<&Marker> {
        self.markers.last().filter(|marker| marker.is_current())
    }

    pub fn skipped(&self) -> usize {
        self.no_result + self.malformed + self.fetch_failed
    }
}

/// Control surface for a running crawl
#[derive(Debug, Clone)]
pub struct CrawlHandle {
    cancel: CancellationToken,
    state: watch::Receiver<PipelineState>,
}

impl CrawlHandle {
    /// Stops the crawl at its next suspension point. No further fetches are issued.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn state(&self) -> PipelineState {
        *self.state.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<PipelineState> {
        self.state.clone()
    }

    /// Resolves once the pipeline enters `target` or any terminal state
    pub async fn wait_for_state(&self, target: PipelineState) -> PipelineState {
        let mut state = self.state.clone();
        let reached = state
            .wait_for(|current| *current == target || current.is_terminal())
            .await
            .map(|current| *current);
        reached.unwrap_or_else(|_| *state.borrow())
    }
}

enum Step {
    Next,
    Displayed,
    Cancelled,
}

pub struct PacedDriver {
    config: CrawlConfig,
    base_url: Url,
    index_url: Url,
    fetcher: Box<dyn PageFetcher>,
    view: Box<dyn MapView>,
    events: ViewEvents,
    window: MarkerWindow,
    queue: DiscoveryQueue,
    index_parser: IndexParser,
    detail_parser: DetailParser,
    cancel: CancellationToken,
    state: watch::Sender<PipelineState>,
    report: CrawlReport,
}

impl PacedDriver {
    /// Validates `config` and wires the collaborators together.
    ///
    /// `events` must be the receiving half of the notifier the view reports
    /// animation completions through.
    pub fn new(
        config: CrawlConfig,
        fetcher: Box<dyn PageFetcher>,
        view: Box<dyn MapView>,
        layer: Box<dyn MarkerLayer>,
        events: ViewEvents,
    ) -> Result<(Self, CrawlHandle)> {
        config.validate()?;
        let selectors = Selectors::compile(&config.selectors)?;
        let base_url = config.base_url()?;
        let index_url = config.index_url()?;

        let cancel = CancellationToken::new();
        let (state_tx, state_rx) = watch::channel(PipelineState::Idle);

        let driver = Self {
            base_url,
            index_url,
            fetcher,
            view,
            events,
            window: MarkerWindow::with_layer(config.window_capacity, layer),
            queue: DiscoveryQueue::default(),
            index_parser: IndexParser::new(&selectors),
            detail_parser: DetailParser::new(&selectors),
            cancel: cancel.clone(),
            state: state_tx,
            report: CrawlReport::default(),
            config,
        };
        let handle = CrawlHandle {
            cancel,
            state: state_rx,
        };
        Ok((driver, handle))
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    pub fn state(&self) -> PipelineState {
        *self.state.borrow()
    }

    /// Runs the crawl on the tokio runtime
    pub fn spawn(self) -> tokio::task::JoinHandle<Result<CrawlReport>> {
        tokio::spawn(self.run())
    }

    /// Drives the pipeline to completion.
    ///
    /// Only an index fetch failure is an error. Cancellation ends the crawl
    /// with a report in the `Cancelled` state.
    pub async fn run(mut self) -> Result<CrawlReport> {
        log::info!("starting crawl of {}", self.index_url);
        self.transition(PipelineState::FetchingIndex);

        let index_url = self.index_url.clone();
        let body = match self.fetch(&index_url).await {
            None => return Ok(self.finish(PipelineState::Cancelled)),
            Some(Ok(body)) => body,
            Some(Err(source)) => {
                log::error!("index fetch from {} failed: {}", index_url, source);
                self.transition(PipelineState::Failed);
                return Err(CrawlError::IndexFetch {
                    url: index_url.to_string(),
                    source,
                });
            }
        };

        self.queue = DiscoveryQueue::seed(self.index_parser.parse(&body));
        self.report.discovered = self.queue.len();
        log::info!("index lists {} detail pages", self.queue.len());

        loop {
            self.transition(PipelineState::Resolving);
            if self.cancel.is_cancelled() {
                return Ok(self.finish(PipelineState::Cancelled));
            }
            let Some(locator) = self.queue.pop() else {
                break;
            };

            match self.resolve(locator).await {
                Step::Next => {}
                Step::Displayed => {
                    if !self.settle().await {
                        return Ok(self.finish(PipelineState::Cancelled));
                    }
                }
                Step::Cancelled => return Ok(self.finish(PipelineState::Cancelled)),
            }
        }

        Ok(self.finish(PipelineState::Done))
    }

    async fn resolve(&mut self, locator: Locator) -> Step {
        let url = match locator.resolve(&self.base_url) {
            Ok(url) => url,
            Err(e) => {
                log::warn!("cannot resolve locator {}: {}", locator, e);
                self.report.fetch_failed += 1;
                return Step::Next;
            }
        };

        self.transition(PipelineState::AwaitDetail);
        let body = match self.fetch(&url).await {
            None => return Step::Cancelled,
            Some(Ok(body)) => body,
            Some(Err(e)) => {
                log::warn!("skipping {}: {}", url, e);
                self.report.fetch_failed += 1;
                return Step::Next;
            }
        };

        let place = match self.detail_parser.parse(&body) {
            Ok(Some(place)) => place,
            Ok(None) => {
                log::debug!("no place on {}", url);
                self.report.no_result += 1;
                return Step::Next;
            }
            Err(e) => {
                log::warn!("skipping {}: {}", url, e);
                self.report.malformed += 1;
                return Step::Next;
            }
        };

        if self.cancel.is_cancelled() {
            return Step::Cancelled;
        }

        let stale = self.events.discard_pending();
        if stale > 0 {
            log::debug!("discarded {} stale view events", stale);
        }

        log::info!("displaying {}", place);
        let position = place.position();
        self.window.insert(place);
        self.report.displayed += 1;
        self.view.center_on(position);
        Step::Displayed
    }

    /// Waits for the view's animation to finish, then for the settle delay.
    /// Returns `false` if the crawl should stop instead.
    async fn settle(&mut self) -> bool {
        self.transition(PipelineState::AwaitSettle);

        let event = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return false,
            event = self.events.next() => event,
        };
        match event {
            Some(ViewEvent::AnimationCompleted) => {}
            None => {
                log::warn!("map view stopped reporting animations; ending crawl");
                return false;
            }
        }

        let delay = self.config.settle_delay();
        log::debug!("animation completed, settling for {:?}", delay);
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => false,
            _ = tokio::time::sleep(delay) => true,
        }
    }

    /// Single-flight fetch; `None` when cancelled first
    async fn fetch(&mut self, url: &Url) -> Option<std::result::Result<String, FetchError>> {
        log::debug!("fetching {}", url);
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            result = self.fetcher.fetch(url) => Some(result),
        }
    }

    fn transition(&mut self, next: PipelineState) {
        let previous = self.state.send_replace(next);
        if previous != next {
            log::debug!("pipeline {} -> {}", previous, next);
        }
    }

    fn finish(&mut self, state: PipelineState) -> CrawlReport {
        self.transition(state);
        let mut report = std::mem::take(&mut self.report);
        report.state = state;
        report.markers = self.window.snapshot();
        log::info!(
            "crawl {}: {} of {} places displayed, {} skipped",
            state,
            report.displayed,
            report.discovered,
            report.skipped()
        );
        report
    }
}

impl Drop for PacedDriver {
    fn drop(&mut self) {
        // Dropped mid-flight: observers should not be left waiting on a live state
        if !self.state().is_terminal() {
            self.state.send_replace(PipelineState::Cancelled);
        }
    }
}

impl fmt::Debug for PacedDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PacedDriver")
            .field("index_url", &self.index_url.as_str())
            .field("state", &self.state())
            .field("pending", &self.queue.len())
            .field("window", &self.window)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fetch::MemoryFetcher,
        pipeline::events::ViewNotifier,
        traits::NullLayer,
        core::geo::LatLng,
    };
    use std::sync::Arc;

    /// Completes every animation as soon as it starts
    struct InstantView(ViewNotifier);

    impl MapView for InstantView {
        fn center_on(&mut self, _position: LatLng) {
            self.0.animation_completed();
        }
    }

    fn driver(fetcher: Arc<MemoryFetcher>) -> (PacedDriver, CrawlHandle) {
        let (notifier, events) = ViewNotifier::channel();
        PacedDriver::new(
            CrawlConfig::for_testing(),
            Box::new(fetcher),
            Box::new(InstantView(notifier)),
            Box::new(NullLayer),
            events,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_index_fetch_failure_is_fatal() {
        let fetcher = Arc::new(MemoryFetcher::new());
        let (driver, handle) = driver(fetcher.clone());

        let err = driver.run().await.unwrap_err();

        assert!(matches!(
            err,
            CrawlError::IndexFetch {
                source: FetchError::Status { status: 404, .. },
                ..
            }
        ));
        assert_eq!(handle.state(), PipelineState::Failed);
        assert_eq!(fetcher.request_count(), 1);
    }

    #[tokio::test]
    async fn test_index_without_table_completes_empty() {
        let fetcher = Arc::new(
            MemoryFetcher::new().with_page("http://test.invalid/index", "<p>nothing here</p>"),
        );
        let (driver, handle) = driver(fetcher.clone());

        let report = driver.run().await.unwrap();

        assert_eq!(report.state, PipelineState::Done);
        assert_eq!(report.discovered, 0);
        assert!(report.markers.is_empty());
        assert_eq!(handle.state(), PipelineState::Done);
        assert_eq!(fetcher.request_count(), 1);
    }

    #[tokio::test]
    async fn test_cancel_before_start_fetches_nothing() {
        let fetcher = Arc::new(MemoryFetcher::new());
        let (driver, handle) = driver(fetcher.clone());
        handle.cancel();

        let report = driver.run().await.unwrap();

        assert_eq!(report.state, PipelineState::Cancelled);
        assert_eq!(fetcher.request_count(), 0);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let (notifier, events) = ViewNotifier::channel();
        let config = CrawlConfig {
            window_capacity: 0,
            ..CrawlConfig::for_testing()
        };
        let result = PacedDriver::new(
            config,
            Box::new(MemoryFetcher::new()),
            Box::new(InstantView(notifier)),
            Box::new(NullLayer),
            events,
        );
        assert!(matches!(result, Err(CrawlError::InvalidConfig(_))));
    }

    #[test]
    fn test_dropping_driver_marks_cancelled() {
        let (driver, handle) = driver(Arc::new(MemoryFetcher::new()));
        assert_eq!(handle.state(), PipelineState::Idle);
        drop(driver);
        assert_eq!(handle.state(), PipelineState::Cancelled);
    }

    #[test]
    fn test_report_skipped_sums_failures() {
        let report = CrawlReport {
            no_result: 2,
            malformed: 1,
            fetch_failed: 3,
            ..Default::default()
        };
        assert_eq!(report.skipped(), 6);
        assert!(report.current().is_none());
    }
}
