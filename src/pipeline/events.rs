//! Animation-completion events flowing from the map view to the driver

use tokio::sync::mpsc;

/// Notifications the map view sends back to the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// A go-to animation reached its target
    AnimationCompleted,
}

/// Sending half held by the map view
#[derive(Debug, Clone)]
pub struct ViewNotifier {
    tx: mpsc::UnboundedSender<ViewEvent>,
}

impl ViewNotifier {
    pub fn channel() -> (ViewNotifier, ViewEvents) {
        let (tx, rx) = mpsc::unbounded_channel();
        (ViewNotifier { tx }, ViewEvents { rx })
    }

    /// Returns `false` once the pipeline has stopped listening
    pub fn notify(&self, event: ViewEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn animation_completed(&self) -> bool {
        self.notify(ViewEvent::AnimationCompleted)
    }
}

/// Receiving half owned by the driver
#[derive(Debug)]
pub struct ViewEvents {
    rx: mpsc::UnboundedReceiver<ViewEvent>,
}

impl ViewEvents {
    /// Next event, or `None` once every notifier is gone
    pub async fn next(&mut self) -> Option<ViewEvent> {
        self.rx.recv().await
    }

    /// Drops events that were queued before the caller's own request
    pub fn discard_pending(&mut self) -> usize {
        let mut discarded = 0;
        while self.rx.try_recv().is_ok() {
            discarded += 1;
        }
        discarded
    }
}
