use super::{collapsed_text, Selectors};
use crate::core::{geo::LatLng, place::Place};
use scraper::{Html, Selector};

/// A coordinate element was found but could not be turned into a position
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DetailError {
    #[error("Malformed coordinate text: {raw:?}")]
    MalformedCoordinate { raw: String },

    #[error("Coordinate out of range: {latitude}; {longitude}")]
    CoordinateOutOfRange { latitude: f64, longitude: f64 },
}

/// Extracts a [`Place`] from a detail page.
///
/// The name comes from the primary heading and the position from the geo
/// microformat element. Either one missing means "no result".
#[derive(Debug, Clone)]
pub struct DetailParser {
    heading: Selector,
    geo: Selector,
}

impl DetailParser {
    pub fn new(selectors: &Selectors) -> Self {
        Self {
            heading: selectors.heading.clone(),
            geo: selectors.geo.clone(),
        }
    }

    pub fn parse(&self, body: &str) -> Result<Option<Place>, DetailError> {
        let document = Html::parse_document(body);

        let name = document
            .select(&self.heading)
            .next()
            .map(collapsed_text)
            .filter(|name| !name.is_empty());
        let geo = document.select(&self.geo).next().map(collapsed_text);

        let (name, raw) = match (name, geo) {
            (Some(name), Some(raw)) => (name, raw),
            (None, Some(raw)) => {
                log::debug!("page has coordinates ({}) but no heading", raw);
                return Ok(None);
            }
            (_, None) => return Ok(None),
        };

        let position = parse_coordinates(&raw)?;
        Ok(Place::new(name, position))
    }
}

/// Parses `"<lat>; <lon>"` in decimal degrees
pub fn parse_coordinates(raw: &str) -> Result<LatLng, DetailError> {
    let malformed = || DetailError::MalformedCoordinate {
        raw: raw.to_string(),
    };

    let mut parts = raw.split(';');
    let (Some(lat), Some(lng), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(malformed());
    };
    let latitude: f64 = lat.trim().parse().map_err(|_| malformed())?;
    let longitude: f64 = lng.trim().parse().map_err(|_| malformed())?;

    LatLng::try_new(latitude, longitude).ok_or(DetailError::CoordinateOutOfRange {
        latitude,
        longitude,
    })
}
