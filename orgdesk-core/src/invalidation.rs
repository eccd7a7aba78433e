//! "Data changed" signal from mutations to the lists that display their data.
//!
//! Mutations never patch a list in place. On success they call
//! `notify_changed`, and every list subscribed to the bridge refetches its
//! own query from scratch the next time it syncs.

use std::sync::Arc;

use tokio::sync::watch;

/// Sending half, cloned into every mutation collaborator.
#[derive(Clone, Debug)]
pub struct InvalidationBridge {
    generation: Arc<watch::Sender<u64>>,
}

impl InvalidationBridge {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0);
        InvalidationBridge {
            generation: Arc::new(tx),
        }
    }

    /// Tell every subscriber that the data behind it changed.
    pub fn notify_changed(&self) {
        self.generation.send_modify(|g| *g += 1);
        tracing::debug!(generation = *self.generation.borrow(), "data changed");
    }

    pub fn subscribe(&self) -> Invalidations {
        Invalidations {
            rx: self.generation.subscribe(),
        }
    }

    pub fn generation(&self) -> u64 {
        *self.generation.borrow()
    }
}

impl Default for InvalidationBridge {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving half, owned by one list.
#[derive(Debug)]
pub struct Invalidations {
    rx: watch::Receiver<u64>,
}

impl Invalidations {
    /// Whether a change arrived since the last `mark_seen`.
    pub fn is_stale(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    pub fn mark_seen(&mut self) {
        self.rx.borrow_and_update();
    }

    /// Wait for the next change. Returns `false` once every bridge is gone.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}
