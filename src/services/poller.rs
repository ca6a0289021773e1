use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use serde::Serialize;
use tokio::task::JoinHandle;

use crate::{
    configuration::{PollerMode, PollerSettings},
    domain::{
        criteria::SearchCriteria,
        prospect::{merge_unseen, ProspectRecord},
    },
    services::sheet_adapter::AdapterError,
};

/// Window served per search in replace mode, matching the range options of
/// the outreach form.
pub const PAGE_SIZE: usize = 10;

/// Seam between the poller and whatever produces prospect batches. The
/// sheet adapter is the production implementation.
#[async_trait::async_trait]
pub trait ProspectFetcher: Send + Sync + 'static {
    async fn fetch(&self, criteria: &SearchCriteria) -> Result<Vec<ProspectRecord>, AdapterError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Waiting,
    Loading,
    Ready,
    Refreshing,
    Error,
}

/// Point-in-time copy of a poller's state, safe to hand to the display
/// layer while fetches continue in the background.
#[derive(Debug, Clone, Serialize)]
pub struct PollerSnapshot {
    pub prospects: Vec<ProspectRecord>,
    pub is_loading: bool,
    pub is_refreshing: bool,
    pub phase: Phase,
}

#[derive(Clone, Copy)]
enum FetchKind {
    Initial,
    Refresh,
    Manual,
}

struct PollerState {
    phase: Phase,
    prospects: Vec<ProspectRecord>,
    is_loading: bool,
    is_refreshing: bool,
    criteria: SearchCriteria,
    loaded_once: bool,
}

struct PollerInner {
    fetcher: Arc<dyn ProspectFetcher>,
    mode: PollerMode,
    initial_delay: Duration,
    refresh_delay: Option<Duration>,
    disposed: AtomicBool,
    state: Mutex<PollerState>,
    timers: Mutex<Vec<JoinHandle<()>>>,
}

/// Schedules adapter fetches around the expected latency of the external
/// automation and accumulates or replaces results as configured.
///
/// States: idle -> waiting -> loading -> (ready | error), with a single
/// background refresh pass in the dual-delay schedule. Disposing cancels
/// every armed timer and discards in-flight results.
pub struct ResultPoller {
    inner: Arc<PollerInner>,
}

impl ResultPoller {
    pub fn new(
        fetcher: Arc<dyn ProspectFetcher>,
        settings: &PollerSettings,
        criteria: SearchCriteria,
    ) -> Self {
        ResultPoller {
            inner: Arc::new(PollerInner {
                fetcher,
                mode: settings.mode,
                initial_delay: Duration::from_millis(settings.initial_delay_ms),
                refresh_delay: settings.refresh_delay_ms.map(Duration::from_millis),
                disposed: AtomicBool::new(false),
                state: Mutex::new(PollerState {
                    phase: Phase::Idle,
                    prospects: Vec::new(),
                    is_loading: false,
                    is_refreshing: false,
                    criteria,
                    loaded_once: false,
                }),
                timers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Arm the delay schedule. The display layer sees a loading view for
    /// the whole waiting period; no network call happens until the initial
    /// timer fires.
    pub fn start(&self) {
        if self.inner.disposed.load(Ordering::SeqCst) {
            return;
        }

        {
            let mut state = self.inner.state.lock().unwrap();
            state.phase = Phase::Waiting;
            state.is_loading = true;
        }

        self.arm(self.inner.initial_delay, FetchKind::Initial);
        if let Some(refresh_delay) = self.inner.refresh_delay {
            // The refresh is measured from when the initial fetch starts.
            self.arm(self.inner.initial_delay + refresh_delay, FetchKind::Refresh);
        }
    }

    /// User-triggered fetch that bypasses the timers. In replace mode this
    /// is the only way out of the error state.
    pub fn refetch(&self) -> JoinHandle<()> {
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            PollerInner::run_fetch(inner, FetchKind::Manual).await;
        })
    }

    /// Restart the fetch cycle when the identifying parameter of the
    /// search changed; unchanged criteria leave the running cycle alone.
    pub fn restart_if_changed(&self, criteria: SearchCriteria) {
        let changed = {
            let state = self.inner.state.lock().unwrap();
            state.criteria.start_index != criteria.start_index
        };
        if !changed {
            return;
        }

        self.cancel_timers();
        {
            let mut state = self.inner.state.lock().unwrap();
            state.criteria = criteria;
            state.prospects.clear();
            state.phase = Phase::Idle;
            state.is_loading = false;
            state.is_refreshing = false;
            state.loaded_once = false;
        }
        self.start();
    }

    pub fn snapshot(&self) -> PollerSnapshot {
        let state = self.inner.state.lock().unwrap();
        PollerSnapshot {
            prospects: state.prospects.clone(),
            is_loading: state.is_loading,
            is_refreshing: state.is_refreshing,
            phase: state.phase,
        }
    }

    /// Cancel every pending timer. A fetch already in flight finishes but
    /// its result is discarded instead of mutating disposed state.
    pub fn dispose(&self) {
        self.inner.disposed.store(true, Ordering::SeqCst);
        self.cancel_timers();
    }

    fn cancel_timers(&self) {
        let mut timers = self.inner.timers.lock().unwrap();
        for handle in timers.drain(..) {
            handle.abort();
        }
    }

    fn arm(&self, delay: Duration, kind: FetchKind) {
        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            PollerInner::run_fetch(inner, kind).await;
        });
        self.inner.timers.lock().unwrap().push(handle);
    }
}

impl Drop for ResultPoller {
    fn drop(&mut self) {
        // Dropping the poller must not leave timers firing into nothing.
        self.dispose();
    }
}

impl PollerInner {
    async fn run_fetch(inner: Arc<PollerInner>, kind: FetchKind) {
        if inner.disposed.load(Ordering::SeqCst) {
            return;
        }

        let criteria = {
            let mut state = inner.state.lock().unwrap();
            match kind {
                FetchKind::Refresh => {
                    state.is_refreshing = true;
                    state.phase = Phase::Refreshing;
                }
                FetchKind::Initial | FetchKind::Manual => {
                    state.is_loading = true;
                    state.phase = Phase::Loading;
                }
            }
            state.criteria.clone()
        };

        let result = inner.fetcher.fetch(&criteria).await;

        let mut state = inner.state.lock().unwrap();
        if inner.disposed.load(Ordering::SeqCst) {
            return;
        }

        match result {
            Ok(batch) => {
                match inner.mode {
                    PollerMode::Replace => {
                        state.prospects = page_window(batch, criteria.start_index);
                    }
                    PollerMode::Accumulate => {
                        merge_unseen(&mut state.prospects, batch);
                    }
                }
                state.phase = Phase::Ready;
                state.loaded_once = true;
            }
            Err(e) => {
                log::error!("Prospect fetch failed: {}", e);
                if inner.mode == PollerMode::Replace && !state.loaded_once {
                    // An explicit first load resolves to empty; later
                    // failures leave the previous set untouched.
                    state.prospects.clear();
                }
                state.phase = Phase::Error;
            }
        }

        match kind {
            FetchKind::Refresh => state.is_refreshing = false,
            FetchKind::Initial | FetchKind::Manual => state.is_loading = false,
        }
    }
}

/// Slice of `PAGE_SIZE` records beginning at the search's start index.
pub fn page_window(records: Vec<ProspectRecord>, start_index: usize) -> Vec<ProspectRecord> {
    records.into_iter().skip(start_index).take(PAGE_SIZE).collect()
}

/// One poller per logged-in account, keyed by account email. Submitting a
/// new search disposes nothing by itself: an existing poller is restarted
/// only when its identifying parameter changed.
pub struct PollerRegistry {
    fetcher: Arc<dyn ProspectFetcher>,
    settings: PollerSettings,
    pollers: Mutex<HashMap<String, ResultPoller>>,
}

impl PollerRegistry {
    pub fn new(fetcher: Arc<dyn ProspectFetcher>, settings: PollerSettings) -> Self {
        PollerRegistry {
            fetcher,
            settings,
            pollers: Mutex::new(HashMap::new()),
        }
    }

    pub fn start_search(&self, email: &str, criteria: SearchCriteria) {
        let mut pollers = self.pollers.lock().unwrap();
        match pollers.get(email) {
            Some(poller) => poller.restart_if_changed(criteria),
            None => {
                let poller =
                    ResultPoller::new(Arc::clone(&self.fetcher), &self.settings, criteria);
                poller.start();
                pollers.insert(email.to_string(), poller);
            }
        }
    }

    pub fn snapshot(&self, email: &str) -> Option<PollerSnapshot> {
        self.pollers.lock().unwrap().get(email).map(|p| p.snapshot())
    }

    pub fn refetch(&self, email: &str) -> bool {
        match self.pollers.lock().unwrap().get(email) {
            Some(poller) => {
                poller.refetch();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;

    use super::*;
    use crate::domain::prospect::record;

    struct ScriptedFetcher {
        batches: Mutex<VecDeque<Result<Vec<ProspectRecord>, AdapterError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedFetcher {
        fn new(
            batches: Vec<Result<Vec<ProspectRecord>, AdapterError>>,
        ) -> Arc<Self> {
            Arc::new(ScriptedFetcher {
                batches: Mutex::new(batches.into()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl ProspectFetcher for ScriptedFetcher {
        async fn fetch(
            &self,
            _criteria: &SearchCriteria,
        ) -> Result<Vec<ProspectRecord>, AdapterError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.batches
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn settings(mode: PollerMode, initial_ms: u64, refresh_ms: Option<u64>) -> PollerSettings {
        PollerSettings {
            mode,
            initial_delay_ms: initial_ms,
            refresh_delay_ms: refresh_ms,
        }
    }

    fn criteria_at(start_index: usize) -> SearchCriteria {
        SearchCriteria {
            start_index,
            ..SearchCriteria::default()
        }
    }

    async fn settle() {
        tokio::time::sleep(Duration::from_millis(200)).await;
    }

    #[tokio::test]
    async fn disposing_before_the_timer_fires_means_zero_fetches() {
        let fetcher = ScriptedFetcher::new(vec![Ok(vec![record("A", "")])]);
        let poller = ResultPoller::new(
            fetcher.clone(),
            &settings(PollerMode::Replace, 100, None),
            criteria_at(0),
        );
        poller.start();
        tokio::time::sleep(Duration::from_millis(10)).await;
        poller.dispose();
        settle().await;

        assert_eq!(fetcher.calls(), 0);
        assert!(poller.snapshot().prospects.is_empty());
    }

    #[tokio::test]
    async fn waiting_state_surfaces_loading_before_any_fetch() {
        let fetcher = ScriptedFetcher::new(vec![]);
        let poller = ResultPoller::new(
            fetcher.clone(),
            &settings(PollerMode::Replace, 5_000, None),
            criteria_at(0),
        );
        poller.start();

        let snapshot = poller.snapshot();
        assert_eq!(snapshot.phase, Phase::Waiting);
        assert!(snapshot.is_loading);
        assert_eq!(fetcher.calls(), 0);

        poller.dispose();
    }

    #[tokio::test]
    async fn accumulate_mode_merges_the_background_refresh() {
        let first = vec![
            record("A", "https://linkedin.com/in/a"),
            record("B", "https://linkedin.com/in/b"),
            record("C", "https://linkedin.com/in/c"),
        ];
        let second = vec![
            record("A", "https://linkedin.com/in/a"),
            record("D", "https://linkedin.com/in/d"),
            record("B", "https://linkedin.com/in/b"),
            record("E", "https://linkedin.com/in/e"),
            record("F", "https://linkedin.com/in/f"),
        ];
        let fetcher = ScriptedFetcher::new(vec![Ok(first), Ok(second)]);
        let poller = ResultPoller::new(
            fetcher.clone(),
            &settings(PollerMode::Accumulate, 10, Some(50)),
            criteria_at(0),
        );
        poller.start();
        settle().await;

        let snapshot = poller.snapshot();
        assert_eq!(fetcher.calls(), 2);
        let names: Vec<&str> = snapshot.prospects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C", "D", "E", "F"]);
        assert_eq!(snapshot.phase, Phase::Ready);
        assert!(!snapshot.is_loading);
        assert!(!snapshot.is_refreshing);
    }

    #[tokio::test]
    async fn background_refresh_never_toggles_the_primary_loading_flag() {
        let fetcher = ScriptedFetcher::new(vec![Ok(vec![record("A", "")])]);
        let poller = ResultPoller::new(
            fetcher.clone(),
            &settings(PollerMode::Accumulate, 10, Some(5_000)),
            criteria_at(0),
        );
        poller.start();
        tokio::time::sleep(Duration::from_millis(100)).await;

        // Initial load done, refresh still pending: results visible.
        let snapshot = poller.snapshot();
        assert!(!snapshot.is_loading);
        assert!(!snapshot.is_refreshing);
        assert_eq!(snapshot.prospects.len(), 1);

        poller.dispose();
    }

    #[tokio::test]
    async fn replace_mode_refetch_of_identical_data_is_idempotent() {
        let batch = vec![
            record("A", "https://linkedin.com/in/a"),
            record("B", "https://linkedin.com/in/b"),
        ];
        let fetcher = ScriptedFetcher::new(vec![Ok(batch.clone()), Ok(batch)]);
        let poller = ResultPoller::new(
            fetcher.clone(),
            &settings(PollerMode::Replace, 10, None),
            criteria_at(0),
        );
        poller.start();
        settle().await;
        let before = poller.snapshot();

        poller.refetch().await.unwrap();
        let after = poller.snapshot();

        assert_eq!(fetcher.calls(), 2);
        assert_eq!(before.prospects, after.prospects);
        assert_eq!(after.phase, Phase::Ready);
    }

    #[tokio::test]
    async fn replace_mode_applies_the_start_index_window() {
        let batch: Vec<ProspectRecord> = (0..15)
            .map(|i| record(&format!("P{}", i), &format!("https://linkedin.com/in/p{}", i)))
            .collect();
        let fetcher = ScriptedFetcher::new(vec![Ok(batch)]);
        let poller = ResultPoller::new(
            fetcher.clone(),
            &settings(PollerMode::Replace, 10, None),
            criteria_at(10),
        );
        poller.start();
        settle().await;

        let snapshot = poller.snapshot();
        assert_eq!(snapshot.prospects.len(), 5);
        assert_eq!(snapshot.prospects[0].name, "P10");
    }

    #[tokio::test]
    async fn first_load_failure_resolves_to_empty_then_refetch_recovers() {
        let fetcher = ScriptedFetcher::new(vec![
            Err(AdapterError::Parse("broken export".to_string())),
            Ok(vec![record("A", "https://linkedin.com/in/a")]),
            Err(AdapterError::Parse("broken again".to_string())),
        ]);
        let poller = ResultPoller::new(
            fetcher.clone(),
            &settings(PollerMode::Replace, 10, None),
            criteria_at(0),
        );
        poller.start();
        settle().await;

        let snapshot = poller.snapshot();
        assert_eq!(snapshot.phase, Phase::Error);
        assert!(snapshot.prospects.is_empty());
        assert!(!snapshot.is_loading);

        // Manual refetch is the retry path out of the error state.
        poller.refetch().await.unwrap();
        let snapshot = poller.snapshot();
        assert_eq!(snapshot.phase, Phase::Ready);
        assert_eq!(snapshot.prospects.len(), 1);

        // A later failure preserves the previous result set.
        poller.refetch().await.unwrap();
        let snapshot = poller.snapshot();
        assert_eq!(snapshot.phase, Phase::Error);
        assert_eq!(snapshot.prospects.len(), 1);
    }

    #[tokio::test]
    async fn manual_refetch_bypasses_the_armed_timer() {
        let fetcher = ScriptedFetcher::new(vec![Ok(vec![record("A", "")])]);
        let poller = ResultPoller::new(
            fetcher.clone(),
            &settings(PollerMode::Replace, 60_000, None),
            criteria_at(0),
        );
        poller.start();

        poller.refetch().await.unwrap();
        assert_eq!(fetcher.calls(), 1);
        assert_eq!(poller.snapshot().phase, Phase::Ready);

        poller.dispose();
    }

    #[tokio::test]
    async fn registry_restarts_only_when_the_start_index_changes() {
        let fetcher = ScriptedFetcher::new(vec![
            Ok(vec![record("A", "https://linkedin.com/in/a")]),
            Ok(vec![record("B", "https://linkedin.com/in/b")]),
        ]);
        let registry = PollerRegistry::new(
            fetcher.clone(),
            settings(PollerMode::Replace, 10, None),
        );

        registry.start_search("a@example.com", criteria_at(0));
        settle().await;
        assert_eq!(fetcher.calls(), 1);

        // Same identifying parameter: no new cycle.
        registry.start_search("a@example.com", criteria_at(0));
        settle().await;
        assert_eq!(fetcher.calls(), 1);
        let snapshot = registry.snapshot("a@example.com").unwrap();
        assert_eq!(snapshot.prospects[0].name, "A");

        // Changed start index: timers reset and the set is rebuilt.
        registry.start_search("a@example.com", criteria_at(10));
        settle().await;
        assert_eq!(fetcher.calls(), 2);

        assert!(registry.snapshot("missing@example.com").is_none());
        assert!(!registry.refetch("missing@example.com"));
    }
}
