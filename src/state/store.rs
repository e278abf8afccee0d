//! Reactive store for the screen-time dashboard.
//!
//! The store owns six observable fields and the actions that change them.
//! Consumers get read-only handles and drive changes through actions only.
//!
//! # Loading envelope
//!
//! Every load clears `error`, raises `loading`, and holds a [`LoadingGuard`]
//! until it finishes, so `loading` drops on every exit path.
//!
//! # Superseded responses
//!
//! Loads take a request token for each data field they target. With the
//! default [`StaleResponsePolicy::DiscardStale`] a response (data or error)
//! is committed only if its token is still the latest for that field.
//! [`StaleResponsePolicy::LastWriteWins`] commits everything in completion
//! order instead.
//!
//! # Example
//!
//! ```ignore
//! let store = ScreenTimeStore::new(Arc::new(service));
//! let _sub = store.loading().subscribe(|busy| render_spinner(*busy));
//!
//! store.refresh();                       // initial load, detached
//! store.switch_view(ViewMode::Daily);    // view_mode updates right away
//! store.load_daily_stats("2024-01-02").await; // or await a load directly
//! ```

use std::fmt;
use std::sync::Arc;

use futures::future::try_join;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::{StaleResponsePolicy, StoreConfig};
use crate::error::FetchError;
use crate::models::{today_iso, DailyReport, Overview, ViewMode};
use crate::remote::{fetch_daily_stats, fetch_overview, fetch_today_stats};
use crate::traits::ScreenTimeService;

use super::observable::{Observable, Readable};
use super::snapshot::StoreSnapshot;
use super::tracking::{LoadTracker, LoadingGuard, RequestTokens};

/// Shown when an overview load fails without a message.
pub const OVERVIEW_FALLBACK_ERROR: &str = "Failed to load overview";

/// Shown when a daily load fails without a message.
pub const DAILY_FALLBACK_ERROR: &str = "Failed to load daily stats";

struct StoreInner {
    service: Arc<dyn ScreenTimeService>,
    policy: StaleResponsePolicy,

    view_mode: Observable<ViewMode>,
    selected_date: Observable<String>,
    overview: Observable<Option<Overview>>,
    daily_data: Observable<Option<DailyReport>>,
    loading: Observable<bool>,
    error: Observable<String>,

    has_overview_data: Readable<bool>,
    has_daily_data: Readable<bool>,

    loads: Arc<LoadTracker>,
    overview_tokens: RequestTokens,
    daily_tokens: RequestTokens,
}

/// Tokens and loading guard taken at the moment an action is issued.
struct LoadTicket {
    overview: Option<u64>,
    daily: Option<u64>,
    _guard: LoadingGuard,
}

/// Screen-time dashboard state. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct ScreenTimeStore {
    inner: Arc<StoreInner>,
}

impl ScreenTimeStore {
    /// Store with default configuration: Overview view, today selected.
    ///
    /// Nothing is fetched until an action runs; `loading` starts out true
    /// so the UI shows a spinner until the first [`refresh`](Self::refresh).
    pub fn new(service: Arc<dyn ScreenTimeService>) -> Self {
        Self::with_config(service, StoreConfig::default())
    }

    pub fn with_config(service: Arc<dyn ScreenTimeService>, config: StoreConfig) -> Self {
        let selected_date = config.initial_date.unwrap_or_else(today_iso);

        let overview: Observable<Option<Overview>> = Observable::new(None);
        let daily_data: Observable<Option<DailyReport>> = Observable::new(None);
        let loading = Observable::new(true);

        let has_overview_data = overview.derive(|o| o.is_some());
        let has_daily_data = daily_data.derive(|d| d.is_some());

        debug!(
            "Creating store: view={}, date={}, policy={:?}",
            config.initial_view, selected_date, config.stale_policy
        );

        Self {
            inner: Arc::new(StoreInner {
                service,
                policy: config.stale_policy,
                view_mode: Observable::new(config.initial_view),
                selected_date: Observable::new(selected_date),
                overview,
                daily_data,
                loads: Arc::new(LoadTracker::new(loading.clone(), config.stale_policy)),
                loading,
                error: Observable::new(String::new()),
                has_overview_data,
                has_daily_data,
                overview_tokens: RequestTokens::new(),
                daily_tokens: RequestTokens::new(),
            }),
        }
    }

    // ========================================================================
    // Observable fields
    // ========================================================================

    pub fn view_mode(&self) -> Readable<ViewMode> {
        self.inner.view_mode.readable()
    }

    pub fn selected_date(&self) -> Readable<String> {
        self.inner.selected_date.readable()
    }

    pub fn overview(&self) -> Readable<Option<Overview>> {
        self.inner.overview.readable()
    }

    pub fn daily_data(&self) -> Readable<Option<DailyReport>> {
        self.inner.daily_data.readable()
    }

    pub fn loading(&self) -> Readable<bool> {
        self.inner.loading.readable()
    }

    /// Display string of the last failure; empty when there is none.
    pub fn error(&self) -> Readable<String> {
        self.inner.error.readable()
    }

    pub fn has_overview_data(&self) -> Readable<bool> {
        self.inner.has_overview_data.clone()
    }

    pub fn has_daily_data(&self) -> Readable<bool> {
        self.inner.has_daily_data.clone()
    }

    /// All fields read now.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            view_mode: self.inner.view_mode.get(),
            selected_date: self.inner.selected_date.get(),
            overview: self.inner.overview.get(),
            daily_data: self.inner.daily_data.get(),
            loading: self.inner.loading.get(),
            error: self.inner.error.get(),
        }
    }

    pub fn stale_policy(&self) -> StaleResponsePolicy {
        self.inner.policy
    }

    /// Number of loads currently running.
    pub fn loads_in_flight(&self) -> usize {
        self.inner.loads.in_flight()
    }

    // ========================================================================
    // Actions
    // ========================================================================

    /// Fetch the overview and today's report together and commit both.
    ///
    /// On failure neither field changes and `error` gets the message.
    pub async fn load_overview(&self) {
        let ticket = self.issue(ViewMode::Overview);
        self.run_overview(ticket).await;
    }

    /// Fetch the report for `date` into `daily_data`.
    pub async fn load_daily_stats(&self, date: &str) {
        let ticket = self.issue(ViewMode::Daily);
        self.run_daily(ticket, date).await;
    }

    /// Switch views and start the matching load in the background.
    ///
    /// `view_mode` is updated before this returns; data and `loading`
    /// follow asynchronously. Await the handle to wait for the load, or
    /// drop it to detach. Must be called from within a tokio runtime.
    pub fn switch_view(&self, mode: ViewMode) -> JoinHandle<()> {
        info!("Switching view to {}", mode);
        self.inner.view_mode.set(mode);
        let date = self.inner.selected_date.get();
        self.spawn_load(mode, date)
    }

    /// Re-run the load for whatever view and date are current right now.
    pub fn refresh(&self) -> JoinHandle<()> {
        let mode = self.inner.view_mode.get();
        let date = self.inner.selected_date.get();
        debug!("Refreshing {} (date {})", mode, date);
        self.spawn_load(mode, date)
    }

    /// Change the selected date; in the Daily view this also starts a load.
    pub fn select_date(&self, date: impl Into<String>) -> Option<JoinHandle<()>> {
        let date = date.into();
        info!("Selecting date {}", date);
        self.inner.selected_date.set(date.clone());

        match self.inner.view_mode.get() {
            ViewMode::Daily => Some(self.spawn_load(ViewMode::Daily, date)),
            ViewMode::Overview => None,
        }
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Take tokens for the fields `kind` writes and open the loading
    /// envelope. Runs synchronously at issue time so ordering follows the
    /// caller, not the scheduler.
    fn issue(&self, kind: ViewMode) -> LoadTicket {
        let (overview, daily) = match kind {
            ViewMode::Overview => (
                Some(self.inner.overview_tokens.issue()),
                Some(self.inner.daily_tokens.issue()),
            ),
            ViewMode::Daily => (None, Some(self.inner.daily_tokens.issue())),
        };
        let guard = self.inner.loads.begin();
        self.inner.error.set_if_changed(String::new());

        LoadTicket {
            overview,
            daily,
            _guard: guard,
        }
    }

    fn spawn_load(&self, mode: ViewMode, date: String) -> JoinHandle<()> {
        let ticket = self.issue(mode);
        let store = self.clone();
        tokio::spawn(async move {
            match mode {
                ViewMode::Overview => store.run_overview(ticket).await,
                ViewMode::Daily => store.run_daily(ticket, &date).await,
            }
        })
    }

    async fn run_overview(&self, ticket: LoadTicket) {
        let service = self.inner.service.as_ref();

        match try_join(fetch_overview(service), fetch_today_stats(service)).await {
            Ok((overview, today)) => {
                debug!(
                    "Overview loaded: total={}s, today={}s, date={}",
                    overview.total_time_seconds, overview.today_time_seconds, today.date
                );
                if let Some(token) = ticket.overview {
                    self.commit(
                        &self.inner.overview,
                        &self.inner.overview_tokens,
                        token,
                        overview,
                        "overview",
                    );
                }
                if let Some(token) = ticket.daily {
                    self.commit(
                        &self.inner.daily_data,
                        &self.inner.daily_tokens,
                        token,
                        today,
                        "daily_data",
                    );
                }
            }
            Err(err) => self.fail(&ticket, &err, OVERVIEW_FALLBACK_ERROR),
        }
    }

    async fn run_daily(&self, ticket: LoadTicket, date: &str) {
        match fetch_daily_stats(self.inner.service.as_ref(), date).await {
            Ok(report) => {
                debug!("Daily stats loaded for {}: {} apps", date, report.app_count());
                if let Some(token) = ticket.daily {
                    self.commit(
                        &self.inner.daily_data,
                        &self.inner.daily_tokens,
                        token,
                        report,
                        "daily_data",
                    );
                }
            }
            Err(err) => self.fail(&ticket, &err, DAILY_FALLBACK_ERROR),
        }
    }

    fn accepts(&self, tokens: &RequestTokens, token: u64) -> bool {
        match self.inner.policy {
            StaleResponsePolicy::LastWriteWins => true,
            StaleResponsePolicy::DiscardStale => tokens.is_latest(token),
        }
    }

    fn is_current(&self, ticket: &LoadTicket) -> bool {
        let overview = ticket
            .overview
            .is_some_and(|t| self.accepts(&self.inner.overview_tokens, t));
        let daily = ticket
            .daily
            .is_some_and(|t| self.accepts(&self.inner.daily_tokens, t));
        overview || daily
    }

    fn commit<T>(
        &self,
        field: &Observable<Option<T>>,
        tokens: &RequestTokens,
        token: u64,
        value: T,
        name: &str,
    ) where
        T: Clone + Send + Sync + 'static,
    {
        let committed = field.try_update(|slot| {
            if self.accepts(tokens, token) {
                *slot = Some(value);
                true
            } else {
                false
            }
        });

        if !committed {
            debug!(
                "Discarding stale {} response (token {}, latest {})",
                name,
                token,
                tokens.latest()
            );
        }
    }

    fn fail(&self, ticket: &LoadTicket, err: &FetchError, fallback: &str) {
        let message = err.display_message(fallback);

        if !self.is_current(ticket) {
            debug!("Discarding stale failure: {}", message);
            return;
        }

        warn!(error_code = err.error_code(), "{}: {}", fallback, message);
        self.inner.error.set(message);
    }
}

impl fmt::Debug for ScreenTimeStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenTimeStore")
            .field("state", &self.snapshot())
            .field("policy", &self.inner.policy)
            .finish()
    }
}
