use crate::core::{geo::LatLng, place::Place};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies one marker for its whole life in a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerId(pub u64);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "marker-{}", self.0)
    }
}

/// How a marker is drawn. Only the newest marker is `Current`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MarkerStyle {
    Current,
    Past,
}

impl fmt::Display for MarkerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkerStyle::Current => write!(f, "current"),
            MarkerStyle::Past => write!(f, "past"),
        }
    }
}

/// A place pinned on the map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    id: MarkerId,
    place: Place,
    style: MarkerStyle,
}

impl Marker {
    pub(crate) fn current(id: MarkerId, place: Place) -> Self {
        Self {
            id,
            place,
            style: MarkerStyle::Current,
        }
    }

    pub fn id(&self) -> MarkerId {
        self.id
    }

    pub fn place(&self) -> &Place {
        &self.place
    }

    pub fn label(&self) -> &str {
        self.place.name()
    }

    pub fn position(&self) -> LatLng {
        self.place.position()
    }

    pub fn style(&self) -> MarkerStyle {
        self.style
    }

    pub fn is_current(&self) -> bool {
        self.style == MarkerStyle::Current
    }

    pub(crate) fn set_style(&mut self, style: MarkerStyle) {
        self.style = style;
    }
}
