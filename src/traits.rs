//! Collaborator seams
//!
//! The crawler owns none of the heavy machinery it drives. HTTP, the map
//! view and the overlay layer are supplied by the host through the traits
//! below, so the pipeline can run against a real widget, a headless logger
//! or an in-memory fixture alike.

use crate::{
    core::geo::LatLng,
    fetch::FetchError,
    layers::marker::Marker,
};
use async_trait::async_trait;
use std::sync::Arc;
use url::Url;

/// Performs one asynchronous GET and hands back the raw body
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

#[async_trait]
impl<F: PageFetcher + ?Sized> PageFetcher for Arc<F> {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        (**self).fetch(url).await
    }
}

#[async_trait]
impl<F: PageFetcher + ?Sized> PageFetcher for Box<F> {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        (**self).fetch(url).await
    }
}

/// The map widget as seen by the pipeline.
///
/// `center_on` starts a go-to animation and returns immediately. When the
/// animation finishes the view reports it through the
/// [`ViewNotifier`](crate::ViewNotifier) it was handed at construction.
pub trait MapView: Send {
    fn center_on(&mut self, position: LatLng);
}

/// Externally owned overlay that renders markers.
///
/// The marker window only ever talks to the layer through these two calls.
/// A restyle is reported as `remove` of the old marker followed by `add` of
/// the restyled one.
pub trait MarkerLayer: Send {
    fn add(&mut self, marker: &Marker);

    fn remove(&mut self, marker: &Marker);
}

/// Layer that renders nothing; used when the host only reads the final report
#[derive(Debug, Default, Clone, Copy)]
pub struct NullLayer;

impl MarkerLayer for NullLayer {
    fn add(&mut self, _marker: &Marker) {}

    fn remove(&mut self, _marker: &Marker) {}
}
