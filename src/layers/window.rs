use super::marker::{Marker, MarkerId, MarkerStyle};
use crate::{
    core::place::Place,
    traits::{MarkerLayer, NullLayer},
};
use std::collections::VecDeque;
use std::fmt;

/// Bounded, insertion-ordered set of markers with a single `Current` one.
///
/// Markers are kept oldest first. Inserting into a full window evicts the
/// oldest marker, demotes the previous `Current` marker to `Past` and adds
/// the new place as `Current`. Every change is mirrored onto the overlay
/// layer before the call returns, so an observer never sees a half-applied
/// insert.
pub struct MarkerWindow {
    capacity: usize,
    markers: VecDeque<Marker>,
    layer: Box<dyn MarkerLayer>,
    next_id: u64,
}

impl MarkerWindow {
    /// Creates a window that mirrors nothing. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        Self::with_layer(capacity, Box::new(NullLayer))
    }

    pub fn with_layer(capacity: usize, layer: Box<dyn MarkerLayer>) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            markers: VecDeque::with_capacity(capacity),
            layer,
            next_id: 0,
        }
    }

    /// Adds `place` as the new `Current` marker and returns its id
    pub fn insert(&mut self, place: Place) -> MarkerId {
        if self.markers.len() == self.capacity {
            if let Some(evicted) = self.markers.pop_front() {
                log::debug!("evicting {} ({})", evicted.id(), evicted.label());
                self.layer.remove(&evicted);
            }
        }

        // With a capacity of one the old current marker is already gone
        if let Some(previous) = self.markers.back_mut() {
            if previous.is_current() {
                self.layer.remove(previous);
                previous.set_style(MarkerStyle::Past);
                self.layer.add(previous);
            }
        }

        let id = MarkerId(self.next_id);
        self.next_id += 1;
        let marker = Marker::current(id, place);
        self.layer.add(&marker);
        self.markers.push_back(marker);

        self.verify();
        id
    }

    /// Removes the marker with `id`. Evicting an absent marker is a no-op.
    ///
    /// When the `Current` marker goes, the newest survivor is promoted.
    pub fn evict(&mut self, id: MarkerId) -> Option<Marker> {
        let index = self.markers.iter().position(|marker| marker.id() == id)?;
        let evicted = self.markers.remove(index)?;
        self.layer.remove(&evicted);

        if evicted.is_current() {
            if let Some(newest) = self.markers.back_mut() {
                self.layer.remove(newest);
                newest.set_style(MarkerStyle::Current);
                self.layer.add(newest);
            }
        }

        self.verify();
        Some(evicted)
    }

    /// Evicts every marker, oldest first
    pub fn clear(&mut self) {
        while let Some(oldest) = self.markers.front().map(Marker::id) {
            self.evict(oldest);
        }
    }

    pub fn current(&self) -> Option<&Marker> {
        self.markers.back().filter(|marker| marker.is_current())
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.iter().find(|marker| marker.id() == id)
    }

    /// Markers oldest first
    pub fn iter(&self) -> impl Iterator<Item = &Marker> + '_ {
        self.markers.iter()
    }

    pub fn places(&self) -> impl Iterator<Item = &Place> + '_ {
        self.markers.iter().map(Marker::place)
    }

    pub fn snapshot(&self) -> Vec<Marker> {
        self.markers.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// `len <= capacity`, ids strictly increasing, and exactly one `Current`
    /// marker (the newest) whenever the window is non-empty
    pub fn check_invariants(&self) -> bool {
        if self.markers.len() > self.capacity {
            return false;
        }
        let ordered = self
            .markers
            .iter()
            .zip(self.markers.iter().skip(1))
            .all(|(older, newer)| older.id() < newer.id());
        let current_count = self.markers.iter().filter(|m| m.is_current()).count();
        let newest_is_current = self.markers.back().map_or(true, Marker::is_current);

        ordered && newest_is_current && current_count == usize::from(!self.markers.is_empty())
    }
}

impl MarkerWindow {
    /// Runs after every mutation. Release builds log a violation, debug
    /// builds panic on it.
    fn verify(&self) {
        if !self.check_invariants() {
            log::error!("marker window invariants violated: {:?}", self);
            if cfg!(debug_assertions) {
                panic!("marker window invariants violated");
            }
        }
    }
}

impl fmt::Debug for MarkerWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkerWindow")
            .field("capacity", &self.capacity)
            .field("markers", &self.markers)
            .finish_non_exhaustive()
    }
}
