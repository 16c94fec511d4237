use tokio::sync::broadcast;

use crate::QueryCache;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invalidation {
    pub key: String,
}

/// Broadcasts invalidated keys to every subscribed view.
pub struct SharedQueryCache {
    events: broadcast::Sender<Invalidation>,
}

impl SharedQueryCache {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(256);
        Self { events }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Invalidation> {
        self.events.subscribe()
    }
}

impl Default for SharedQueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache for SharedQueryCache {
    fn invalidate(&self, key: &str) {
        tracing::debug!(key, "invalidating cached query");
        // No subscribers just means nothing is currently showing this key.
        let _ = self.events.send(Invalidation {
            key: key.to_string(),
        });
    }
}
