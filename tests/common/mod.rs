#![allow(dead_code)]

use async_trait::async_trait;
use placemark::prelude::*;
use std::sync::Mutex;
use tokio::sync::Notify;
use url::Url;

pub const BASE: &str = "http://test.invalid";
pub const INDEX: &str = "http://test.invalid/index";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Index page with one row per href, plus a header row
pub fn index_page(hrefs: &[&str]) -> String {
    let rows: String = hrefs
        .iter()
        .map(|href| format!(r#"<tr><td><a href="{href}">{href}</a></td><td>-</td></tr>"#))
        .collect();
    format!(
        r#"<html><body><table class="wikitable sortable"><tr><th>Capital</th><th>Country</th></tr>{rows}</table></body></html>"#
    )
}

pub fn detail_page(name: &str, geo: Option<&str>) -> String {
    let geo = geo
        .map(|text| format!(r#"<span class="geo">{text}</span>"#))
        .unwrap_or_default();
    format!(
        r#"<html><body><h1 id="firstHeading">{name}</h1><p>Capital city.</p>{geo}</body></html>"#
    )
}

/// Records every go-to request; optionally completes it immediately
#[derive(Clone)]
pub struct RecordingView {
    pub centered: Arc<Mutex<Vec<LatLng>>>,
    notifier: Option<ViewNotifier>,
}

impl RecordingView {
    /// Reports completion as soon as an animation starts
    pub fn instant(notifier: ViewNotifier) -> Self {
        Self {
            centered: Arc::default(),
            notifier: Some(notifier),
        }
    }

    /// Never reports completion; the test drives events itself
    pub fn manual() -> Self {
        Self {
            centered: Arc::default(),
            notifier: None,
        }
    }

    pub fn centered(&self) -> Vec<LatLng> {
        self.centered.lock().unwrap().clone()
    }
}

impl MapView for RecordingView {
    fn center_on(&mut self, position: LatLng) {
        self.centered.lock().unwrap().push(position);
        if let Some(notifier) = &self.notifier {
            notifier.animation_completed();
        }
    }
}

/// Holds back requests for one URL until the gate is opened
pub struct GatedFetcher {
    inner: MemoryFetcher,
    held: String,
    pub gate: Arc<Notify>,
}

impl GatedFetcher {
    pub fn new(inner: MemoryFetcher, held: &str) -> Self {
        Self {
            inner,
            held: held.to_string(),
            gate: Arc::new(Notify::new()),
        }
    }

    /// Requests that got past the gate
    pub fn requests(&self) -> Vec<String> {
        self.inner.requests()
    }
}

#[async_trait]
impl PageFetcher for GatedFetcher {
    async fn fetch(&self, url: &Url) -> std::result::Result<String, FetchError> {
        if url.as_str() == self.held {
            self.gate.notified().await;
        }
        self.inner.fetch(url).await
    }
}

/// Mirrors the overlay: marker labels currently shown with their style
#[derive(Clone, Default)]
pub struct MirrorLayer {
    pub shown: Arc<Mutex<Vec<(String, MarkerStyle)>>>,
}

impl MirrorLayer {
    pub fn shown(&self) -> Vec<(String, MarkerStyle)> {
        self.shown.lock().unwrap().clone()
    }
}

impl MarkerLayer for MirrorLayer {
    fn add(&mut self, marker: &Marker) {
        self.shown
            .lock()
            .unwrap()
            .push((marker.label().to_string(), marker.style()));
    }

    fn remove(&mut self, marker: &Marker) {
        let entry = (marker.label().to_string(), marker.style());
        let mut shown = self.shown.lock().unwrap();
        let position = shown
            .iter()
            .position(|shown| *shown == entry)
            .expect("layer asked to remove a marker it never showed");
        shown.remove(position);
    }
}

/// Polls `condition` until it holds, yielding to spawned tasks in between
pub async fn eventually(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("condition never became true");
}
