//! Generic list controller: the interaction contract behind every admin
//! list view (posts, tags, comments, ...).
//!
//! One controller instance owns the query state, the load state, and the
//! delete-confirmation gate for a single resource view. All remote work
//! goes through the [`ResourceService`] seam; every mutation that succeeds
//! triggers a refresh of the current page.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::application::confirm::ConfirmationGate;
use crate::application::error::ListError;
use crate::application::pagination::{ItemPage, ListQuery};
use crate::application::services::ResourceService;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Visibility states of a list view.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum LoadState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(ItemPage<T>),
    Failed(ListError),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn loaded(&self) -> Option<&ItemPage<T>> {
        match self {
            LoadState::Loaded(page) => Some(page),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ListError> {
        match self {
            LoadState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Point-in-time copy of controller state for rendering.
#[derive(Debug, Clone)]
pub struct Snapshot<T> {
    pub query: ListQuery,
    pub load: LoadState<T>,
    /// Last successfully loaded page, retained across failed fetches so a
    /// front end can keep showing stale rows under an error banner.
    pub last_loaded: Option<ItemPage<T>>,
    pub total_pages: u32,
    pub pending_delete: Option<String>,
}

struct ControllerState<T> {
    query: ListQuery,
    load: LoadState<T>,
    last_loaded: Option<ItemPage<T>>,
    total_pages: u32,
    gate: ConfirmationGate,
    /// Monotonic fetch token; only the response matching the latest issued
    /// token is applied (stale-response suppression).
    issued: u64,
}

pub struct ListController<T> {
    service: Arc<dyn ResourceService<T>>,
    fetch_timeout: Duration,
    state: Arc<Mutex<ControllerState<T>>>,
}

impl<T> Clone for ListController<T> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            fetch_timeout: self.fetch_timeout,
            state: self.state.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> ListController<T> {
    pub fn new(service: Arc<dyn ResourceService<T>>, page_size: u32) -> Self {
        Self {
            service,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            state: Arc::new(Mutex::new(ControllerState {
                query: ListQuery::new(page_size),
                load: LoadState::Idle,
                last_loaded: None,
                total_pages: 1,
                gate: ConfirmationGate::new(),
                issued: 0,
            })),
        }
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn snapshot(&self) -> Snapshot<T> {
        let state = self.state.lock().expect("controller state poisoned");
        Snapshot {
            query: state.query.clone(),
            load: state.load.clone(),
            last_loaded: state.last_loaded.clone(),
            total_pages: state.total_pages,
            pending_delete: state.gate.armed().map(str::to_string),
        }
    }

    /// Navigate to a page (1-based); search and filters stay as they are.
    pub async fn set_page(&self, page: u32) -> Result<(), ListError> {
        if page == 0 {
            return Err(ListError::validation("page numbers start at 1"));
        }
        {
            let mut state = self.state.lock().expect("controller state poisoned");
            state.query.set_page(page);
        }
        self.run_fetch().await;
        Ok(())
    }

    /// Apply settled search text. Resets the page to 1.
    pub async fn set_search(&self, text: impl Into<String>) {
        {
            let mut state = self.state.lock().expect("controller state poisoned");
            state.query.set_search(text);
        }
        self.run_fetch().await;
    }

    /// Replace a single-select filter value. Resets the page to 1.
    pub async fn set_filter(&self, name: impl Into<String>, value: impl Into<String>) {
        {
            let mut state = self.state.lock().expect("controller state poisoned");
            state.query.set_filter(name, value);
        }
        self.run_fetch().await;
    }

    /// Toggle membership in a multi-select filter. Resets the page to 1.
    pub async fn toggle_filter(&self, name: impl Into<String>, value: impl Into<String>) {
        {
            let mut state = self.state.lock().expect("controller state poisoned");
            state.query.toggle_filter(name, value);
        }
        self.run_fetch().await;
    }

    /// Re-run the fetch with the current query unchanged.
    pub async fn refresh(&self) {
        self.run_fetch().await;
    }

    /// Arm the confirmation gate for one item. No remote effect.
    pub fn request_delete(&self, id: impl Into<String>) {
        let mut state = self.state.lock().expect("controller state poisoned");
        state.gate.arm(id);
    }

    /// Disarm the gate. No remote effect.
    pub fn cancel_delete(&self) {
        let mut state = self.state.lock().expect("controller state poisoned");
        state.gate.cancel();
    }

    pub fn pending_delete(&self) -> Option<String> {
        let state = self.state.lock().expect("controller state poisoned");
        state.gate.armed().map(str::to_string)
    }

    /// Fire the armed delete. The gate is cleared whatever the outcome; the
    /// list refreshes only when the remote delete succeeded. Confirming with
    /// nothing armed is a deliberate no-op rather than an error the user
    /// could ever see.
    pub async fn confirm_delete(&self) -> Result<(), ListError> {
        let armed = {
            let mut state = self.state.lock().expect("controller state poisoned");
            state.gate.take_armed()
        };
        let Some(id) = armed else {
            debug!("confirm_delete with no pending action");
            return Ok(());
        };

        match self.service.remove(&id).await {
            Ok(()) => {
                debug!(id = %id, "item deleted");
                self.run_fetch().await;
                Ok(())
            }
            Err(err) => {
                warn!(id = %id, error = %err, "delete failed");
                Err(ListError::mutation(err))
            }
        }
    }

    /// Flip a resource's boolean status flag (comment approval, message read
    /// state) and refresh on success. On failure the loaded list stays as it
    /// was; the error is surfaced to the caller only.
    pub async fn set_approval(&self, id: &str, approved: bool) -> Result<(), ListError> {
        match self.service.set_flag(id, approved).await {
            Ok(()) => {
                self.run_fetch().await;
                Ok(())
            }
            Err(err) => {
                warn!(id = %id, approved, error = %err, "status change failed");
                Err(ListError::mutation(err))
            }
        }
    }

    async fn run_fetch(&self) {
        let (token, query) = {
            let mut state = self.state.lock().expect("controller state poisoned");
            state.issued += 1;
            state.load = LoadState::Loading;
            (state.issued, state.query.clone())
        };

        let outcome = tokio::time::timeout(self.fetch_timeout, self.service.list(&query)).await;

        let mut state = self.state.lock().expect("controller state poisoned");
        if state.issued != token {
            trace!(token, latest = state.issued, "discarding stale list response");
            return;
        }

        match outcome {
            Ok(Ok(page)) => {
                state.total_pages = page.total_pages(query.page_size());
                state.last_loaded = Some(page.clone());
                state.load = LoadState::Loaded(page);
            }
            Ok(Err(err)) => {
                warn!(error = %err, page = query.page(), "list fetch failed");
                state.load = LoadState::Failed(ListError::fetch(err));
            }
            Err(_) => {
                let secs = self.fetch_timeout.as_secs();
                warn!(timeout_secs = secs, "list fetch timed out");
                state.load = LoadState::Failed(ListError::Timeout(secs));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::application::services::ServiceError;

    #[derive(Debug, Clone, PartialEq)]
    struct TestItem {
        id: String,
    }

    fn item(id: &str) -> TestItem {
        TestItem { id: id.into() }
    }

    #[derive(Default)]
    struct RecordingService {
        items: Mutex<Vec<TestItem>>,
        list_calls: Mutex<Vec<ListQuery>>,
        removed: Mutex<Vec<String>>,
        flags: Mutex<Vec<(String, bool)>>,
        delays_by_search: Mutex<HashMap<String, Duration>>,
        fail_list: AtomicBool,
        fail_remove: AtomicBool,
        fail_flag: AtomicBool,
    }

    impl RecordingService {
        fn with_items(items: Vec<TestItem>) -> Self {
            Self {
                items: Mutex::new(items),
                ..Self::default()
            }
        }

        fn delay_search(&self, search: &str, delay: Duration) {
            self.delays_by_search
                .lock()
                .unwrap()
                .insert(search.to_string(), delay);
        }

        fn list_call_count(&self) -> usize {
            self.list_calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ResourceService<TestItem> for RecordingService {
        async fn list(&self, query: &ListQuery) -> Result<ItemPage<TestItem>, ServiceError> {
            self.list_calls.lock().unwrap().push(query.clone());
            let delay = self
                .delays_by_search
                .lock()
                .unwrap()
                .get(query.search())
                .copied();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_list.load(Ordering::SeqCst) {
                return Err(ServiceError::remote(500, "backend down"));
            }
            if !query.search().is_empty() {
                // Tag results with the query so tests can tell responses apart.
                return Ok(ItemPage::new(
                    vec![item(&format!("match-{}", query.search()))],
                    1,
                ));
            }
            let items = self.items.lock().unwrap().clone();
            let total = items.len() as u64;
            Ok(ItemPage::new(items, total))
        }

        async fn remove(&self, id: &str) -> Result<(), ServiceError> {
            if self.fail_remove.load(Ordering::SeqCst) {
                return Err(ServiceError::remote(500, "delete rejected"));
            }
            self.removed.lock().unwrap().push(id.to_string());
            self.items.lock().unwrap().retain(|item| item.id != id);
            Ok(())
        }

        async fn set_flag(&self, id: &str, enabled: bool) -> Result<(), ServiceError> {
            if self.fail_flag.load(Ordering::SeqCst) {
                return Err(ServiceError::remote(500, "status rejected"));
            }
            self.flags.lock().unwrap().push((id.to_string(), enabled));
            Ok(())
        }
    }

    fn controller(service: Arc<RecordingService>) -> ListController<TestItem> {
        ListController::new(service, 10)
    }

    #[tokio::test]
    async fn refresh_loads_page_and_total() {
        let service = Arc::new(RecordingService::with_items(vec![item("x"), item("y")]));
        let controller = controller(service.clone());

        controller.refresh().await;

        let snapshot = controller.snapshot();
        let page = snapshot.load.loaded().expect("loaded");
        assert_eq!(page.items, vec![item("x"), item("y")]);
        assert_eq!(page.total_count, 2);
        assert_eq!(snapshot.total_pages, 1);
    }

    #[tokio::test]
    async fn total_pages_rounds_up_from_total_count() {
        let items: Vec<TestItem> = (0..21).map(|n| item(&format!("i{n}"))).collect();
        let service = Arc::new(RecordingService::with_items(items));
        let controller = controller(service);

        controller.refresh().await;
        assert_eq!(controller.snapshot().total_pages, 3);
    }

    #[tokio::test]
    async fn search_issues_page_one_fetch() {
        let service = Arc::new(RecordingService::default());
        let controller = controller(service.clone());

        controller.set_page(3).await.expect("page");
        controller.set_search("rust").await;

        let calls = service.list_calls.lock().unwrap();
        let last = calls.last().expect("fetch issued");
        assert_eq!(last.page(), 1);
        assert_eq!(last.search(), "rust");
    }

    #[tokio::test]
    async fn filter_change_on_deep_page_fetches_page_one() {
        let service = Arc::new(RecordingService::default());
        let controller = controller(service.clone());

        controller.set_page(3).await.expect("page");
        controller.set_filter("status", "approved").await;

        let calls = service.list_calls.lock().unwrap();
        let last = calls.last().expect("fetch issued");
        assert_eq!(last.page(), 1);
        assert_eq!(last.filter("status").collect::<Vec<_>>(), ["approved"]);
    }

    #[tokio::test]
    async fn page_zero_is_rejected_without_fetching() {
        let service = Arc::new(RecordingService::default());
        let controller = controller(service.clone());

        let err = controller.set_page(0).await.expect_err("invalid page");
        assert!(matches!(err, ListError::Validation(_)));
        assert_eq!(service.list_call_count(), 0);
    }

    #[tokio::test]
    async fn cancel_leaves_list_untouched() {
        let service = Arc::new(RecordingService::with_items(vec![item("c1"), item("c2")]));
        let controller = controller(service.clone());
        controller.refresh().await;
        let fetches_before = service.list_call_count();

        controller.request_delete("c2");
        assert_eq!(controller.pending_delete().as_deref(), Some("c2"));
        controller.cancel_delete();

        assert_eq!(controller.pending_delete(), None);
        assert!(service.removed.lock().unwrap().is_empty());
        assert_eq!(service.list_call_count(), fetches_before);
    }

    #[tokio::test]
    async fn confirm_removes_once_then_refreshes_once() {
        let service = Arc::new(RecordingService::with_items(vec![item("c1"), item("c2")]));
        let controller = controller(service.clone());
        controller.refresh().await;
        let fetches_before = service.list_call_count();

        controller.request_delete("c2");
        controller.confirm_delete().await.expect("delete");

        assert_eq!(service.removed.lock().unwrap().as_slice(), ["c2"]);
        assert_eq!(service.list_call_count(), fetches_before + 1);
        assert_eq!(controller.pending_delete(), None);

        let snapshot = controller.snapshot();
        let page = snapshot.load.loaded().expect("reloaded");
        assert!(page.items.iter().all(|item| item.id != "c2"));
    }

    #[tokio::test]
    async fn confirm_with_nothing_armed_is_noop() {
        let service = Arc::new(RecordingService::default());
        let controller = controller(service.clone());

        controller.confirm_delete().await.expect("no-op");
        controller.confirm_delete().await.expect("still a no-op");

        assert!(service.removed.lock().unwrap().is_empty());
        assert_eq!(service.list_call_count(), 0);
    }

    #[tokio::test]
    async fn failed_delete_clears_gate_and_skips_refresh() {
        let service = Arc::new(RecordingService::with_items(vec![item("c1")]));
        let controller = controller(service.clone());
        controller.refresh().await;
        let fetches_before = service.list_call_count();
        service.fail_remove.store(true, Ordering::SeqCst);

        controller.request_delete("c1");
        let err = controller.confirm_delete().await.expect_err("delete fails");

        assert!(matches!(err, ListError::Mutation(_)));
        assert_eq!(controller.pending_delete(), None);
        assert_eq!(service.list_call_count(), fetches_before);
        // The list keeps showing the pre-delete state.
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.load.loaded().expect("still loaded").items, vec![item("c1")]);
    }

    #[tokio::test]
    async fn approval_refreshes_on_success() {
        let service = Arc::new(RecordingService::with_items(vec![item("c1")]));
        let controller = controller(service.clone());
        controller.refresh().await;
        let fetches_before = service.list_call_count();

        controller.set_approval("c1", true).await.expect("approve");

        assert_eq!(service.flags.lock().unwrap().as_slice(), [("c1".to_string(), true)]);
        assert_eq!(service.list_call_count(), fetches_before + 1);
    }

    #[tokio::test]
    async fn failed_approval_leaves_state_alone() {
        let service = Arc::new(RecordingService::with_items(vec![item("c1")]));
        let controller = controller(service.clone());
        controller.refresh().await;
        let fetches_before = service.list_call_count();
        service.fail_flag.store(true, Ordering::SeqCst);

        let err = controller
            .set_approval("c1", false)
            .await
            .expect_err("status change fails");

        assert!(matches!(err, ListError::Mutation(_)));
        assert_eq!(service.list_call_count(), fetches_before);
        assert!(controller.snapshot().load.loaded().is_some());
    }

    #[tokio::test]
    async fn failed_fetch_keeps_last_loaded_page() {
        let service = Arc::new(RecordingService::with_items(vec![item("x")]));
        let controller = controller(service.clone());
        controller.refresh().await;
        service.fail_list.store(true, Ordering::SeqCst);

        controller.refresh().await;

        let snapshot = controller.snapshot();
        assert!(matches!(snapshot.load, LoadState::Failed(ListError::Fetch(_))));
        let stale = snapshot.last_loaded.expect("stale page retained");
        assert_eq!(stale.items, vec![item("x")]);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_fetch_times_out_as_failed() {
        let service = Arc::new(RecordingService::default());
        service.delay_search("", Duration::from_millis(500));
        let controller = ListController::new(
            service.clone() as Arc<dyn ResourceService<TestItem>>,
            10,
        )
        .with_fetch_timeout(Duration::from_millis(100));

        controller.refresh().await;

        let snapshot = controller.snapshot();
        assert!(matches!(snapshot.load, LoadState::Failed(ListError::Timeout(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn stale_response_is_discarded() {
        let service = Arc::new(RecordingService::with_items(vec![item("winner")]));
        service.delay_search("slow", Duration::from_millis(200));
        service.delay_search("fast", Duration::from_millis(10));
        let controller = controller(service.clone());

        let slow = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.set_search("slow").await })
        };
        tokio::time::sleep(Duration::from_millis(1)).await;
        let fast = {
            let controller = controller.clone();
            tokio::spawn(async move { controller.set_search("fast").await })
        };

        slow.await.expect("slow fetch task");
        fast.await.expect("fast fetch task");

        // The slow fetch resolved last but was issued first; the state must
        // reflect the most recently issued query.
        let snapshot = controller.snapshot();
        assert_eq!(snapshot.query.search(), "fast");
        let page = snapshot.load.loaded().expect("loaded");
        assert_eq!(page.items, vec![item("match-fast")]);
        assert_eq!(service.list_call_count(), 2);
    }
}
