use crate::core::place::Locator;
use std::collections::VecDeque;

/// Locators still waiting to be resolved, in index-page order.
///
/// The queue is seeded once and only ever shrinks: there is no way to push
/// a locator back, so a failed page is never retried.
#[derive(Debug, Default, Clone)]
pub struct DiscoveryQueue {
    pending: VecDeque<Locator>,
    consumed: usize,
}

impl DiscoveryQueue {
    pub fn seed(locators: impl IntoIterator<Item = Locator>) -> Self {
        Self {
            pending: locators.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Takes the next locator from the head
    pub fn pop(&mut self) -> Option<Locator> {
        let next = self.pending.pop_front()?;
        self.consumed += 1;
        Some(next)
    }

    pub fn peek(&self) -> Option<&Locator> {
        self.pending.front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// How many locators have been handed out so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

impl FromIterator<Locator> for DiscoveryQueue {
    fn from_iter<I: IntoIterator<Item = Locator>>(iter: I) -> Self {
        Self::seed(iter)
    }
}
