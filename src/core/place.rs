use crate::core::geo::LatLng;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Reference to a detail page that has not been fetched yet.
///
/// The href is kept exactly as it appeared on the index page; it is only
/// turned into an absolute URL when the page is about to be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    href: String,
}

impl Locator {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.href
    }

    /// Joins the locator onto `base`. Absolute hrefs replace the base entirely.
    pub fn resolve(&self, base: &Url) -> Result<Url, url::ParseError> {
        base.join(&self.href)
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href)
    }
}

/// A resolved, named coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    name: String,
    position: LatLng,
}

impl Place {
    /// Creates a place, or `None` when the position lies outside the valid ranges
    pub fn new(name: impl Into<String>, position: LatLng) -> Option<Self> {
        if !position.is_valid() {
            return None;
        }
        Some(Self {
            name: name.into(),
            position,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> LatLng {
        self.position
    }

    pub fn latitude(&self) -> f64 {
        self.position.lat
    }

    pub fn longitude(&self) -> f64 {
        self.position.lng
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.position)
    }
}
