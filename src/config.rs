//! Configuration for the store and the HTTP service adapter.
//!
//! Both structs use the builder pattern and can be loaded from the
//! environment.
//!
//! # Example
//!
//! ```ignore
//! use screentime::config::{StoreConfig, StaleResponsePolicy};
//! use screentime::models::ViewMode;
//!
//! let config = StoreConfig::default()
//!     .with_initial_view(ViewMode::Daily)
//!     .with_initial_date("2024-02-01")
//!     .with_stale_policy(StaleResponsePolicy::LastWriteWins);
//! ```

use std::time::Duration;

use tracing::warn;

use crate::models::{is_iso_date, ViewMode};

/// Default address of the local screen-time service.
pub const DEFAULT_SERVICE_URL: &str = "http://127.0.0.1:7420";

/// Default per-request timeout for the HTTP adapter.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// What to do with a response that arrives after a newer request for the
/// same field was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaleResponsePolicy {
    /// Drop responses that are no longer the latest for their field.
    #[default]
    DiscardStale,
    /// Commit every response in completion order; the slowest one wins.
    LastWriteWins,
}

// ============================================================================
// StoreConfig
// ============================================================================

/// Configuration for [`ScreenTimeStore`](crate::state::ScreenTimeStore).
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// View shown before the user picks one (default: Overview)
    pub initial_view: ViewMode,
    /// Selected date at startup; `None` means today
    pub initial_date: Option<String>,
    /// Handling of superseded responses
    pub stale_policy: StaleResponsePolicy,
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_initial_view(mut self, view: ViewMode) -> Self {
        self.initial_view = view;
        self
    }

    pub fn with_initial_date(mut self, date: impl Into<String>) -> Self {
        self.initial_date = Some(date.into());
        self
    }

    pub fn with_stale_policy(mut self, policy: StaleResponsePolicy) -> Self {
        self.stale_policy = policy;
        self
    }

    /// Load from `SCREENTIME_VIEW`, `SCREENTIME_DATE` and
    /// `SCREENTIME_LAST_WRITE_WINS`. Invalid values are logged and ignored.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(view) = std::env::var("SCREENTIME_VIEW") {
            match view.parse::<ViewMode>() {
                Ok(mode) => config.initial_view = mode,
                Err(e) => warn!("Ignoring SCREENTIME_VIEW: {}", e),
            }
        }

        if let Ok(date) = std::env::var("SCREENTIME_DATE") {
            if is_iso_date(&date) {
                config.initial_date = Some(date);
            } else {
                warn!("Ignoring SCREENTIME_DATE={:?}: expected YYYY-MM-DD", date);
            }
        }

        if std::env::var("SCREENTIME_LAST_WRITE_WINS").is_ok() {
            config.stale_policy = StaleResponsePolicy::LastWriteWins;
        }

        config
    }
}

// ============================================================================
// ServiceConfig
// ============================================================================

/// Configuration for [`HttpScreenTimeService`](crate::adapters::HttpScreenTimeService).
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Base URL, without a trailing slash
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_SERVICE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ServiceConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from `SCREENTIME_URL` and `SCREENTIME_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("SCREENTIME_URL") {
            config = config.with_base_url(url);
        }

        if let Ok(secs) = std::env::var("SCREENTIME_TIMEOUT_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout = Duration::from_secs(secs),
                _ => warn!("Ignoring SCREENTIME_TIMEOUT_SECS={:?}", secs),
            }
        }

        config
    }
}
