//! Process-wide search broadcast.
//!
//! Components outside the immediate controller tree (status bars, loggers)
//! can observe settled search input here. The channel is created once at
//! application start and passed down explicitly; correctness never depends
//! on anyone listening.

use tokio::sync::broadcast;
use tracing::trace;

/// Topic name, surfaced in diagnostics and logs.
pub const SEARCH_TOPIC: &str = "admin.search";

const CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEvent {
    pub query: String,
}

/// Broadcast handle for settled search values. Cheap to clone; lagging
/// subscribers lose old events rather than blocking the publisher.
#[derive(Debug, Clone)]
pub struct SearchBroadcast {
    tx: broadcast::Sender<SearchEvent>,
}

impl SearchBroadcast {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SearchEvent> {
        self.tx.subscribe()
    }

    /// Publish a settled query. A send error only means nobody is currently
    /// subscribed, so it is ignored.
    pub fn publish(&self, query: impl Into<String>) {
        let query = query.into();
        trace!(topic = SEARCH_TOPIC, query = %query, "search settled");
        let _ = self.tx.send(SearchEvent { query });
    }
}

impl Default for SearchBroadcast {
    fn default() -> Self {
        Self::new()
    }
}
