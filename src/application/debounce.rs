//! Trailing debounce for search input.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::trace;

use crate::application::events::SearchBroadcast;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Converts rapid input into a single delayed notification.
///
/// Every `update` stores the raw value immediately (so a caller can echo it
/// back to the user) and re-arms the timer; the notification callback runs
/// once per quiet period with the final value. No leading edge, no stale
/// intermediate values. Dropping the debouncer cancels a pending
/// notification, so the callback never fires after its owner is gone.
pub struct DebouncedSearch {
    value: String,
    delay: Duration,
    notify: Arc<dyn Fn(String) + Send + Sync>,
    events: Option<SearchBroadcast>,
    pending: Option<JoinHandle<()>>,
}

impl DebouncedSearch {
    pub fn new(delay: Duration, notify: impl Fn(String) + Send + Sync + 'static) -> Self {
        Self {
            value: String::new(),
            delay,
            notify: Arc::new(notify),
            events: None,
            pending: None,
        }
    }

    /// Also republish settled values on the process-wide search channel.
    pub fn with_broadcast(mut self, events: SearchBroadcast) -> Self {
        self.events = Some(events);
        self
    }

    /// The raw value as last typed, ahead of any notification.
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn update(&mut self, raw: impl Into<String>) {
        self.value = raw.into();

        if let Some(pending) = self.pending.take() {
            pending.abort();
            trace!("rescheduled pending search notification");
        }

        let value = self.value.clone();
        let notify = self.notify.clone();
        let events = self.events.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            notify(value.clone());
            if let Some(events) = events {
                events.publish(value);
            }
        }));
    }
}

impl Drop for DebouncedSearch {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    fn collector() -> (Arc<Mutex<Vec<String>>>, impl Fn(String) + Send + Sync) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        (seen, move |value| sink.lock().unwrap().push(value))
    }

    #[tokio::test(start_paused = true)]
    async fn rapid_updates_collapse_to_one_notification() {
        let (seen, notify) = collector();
        let mut search = DebouncedSearch::new(DEFAULT_DEBOUNCE, notify);

        search.update("r");
        tokio::time::sleep(Duration::from_millis(50)).await;
        search.update("ru");
        tokio::time::sleep(Duration::from_millis(50)).await;
        search.update("rust");
        assert_eq!(search.value(), "rust");

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(seen.lock().unwrap().as_slice(), ["rust"]);
    }

    #[tokio::test(start_paused = true)]
    async fn quiet_periods_each_notify() {
        let (seen, notify) = collector();
        let mut search = DebouncedSearch::new(DEFAULT_DEBOUNCE, notify);

        search.update("first");
        tokio::time::sleep(Duration::from_millis(300)).await;
        search.update("second");
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert_eq!(seen.lock().unwrap().as_slice(), ["first", "second"]);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_suppresses_pending_notification() {
        let (seen, notify) = collector();
        let mut search = DebouncedSearch::new(DEFAULT_DEBOUNCE, notify);

        search.update("doomed");
        drop(search);

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(seen.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn settled_value_reaches_broadcast() {
        let (_seen, notify) = collector();
        let events = SearchBroadcast::new();
        let mut rx = events.subscribe();
        let mut search = DebouncedSearch::new(DEFAULT_DEBOUNCE, notify).with_broadcast(events);

        search.update("observable");
        tokio::time::sleep(Duration::from_millis(300)).await;

        let event = rx.recv().await.expect("broadcast event");
        assert_eq!(event.query, "observable");
    }
}
