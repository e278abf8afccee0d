//! Request tokens and loading accounting for store actions.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::config::StaleResponsePolicy;

use super::observable::Observable;

/// Monotonic request counter for one store field.
///
/// Every load that targets the field takes a token; only the holder of the
/// latest token may commit.
#[derive(Debug, Default)]
pub struct RequestTokens {
    latest: AtomicU64,
}

impl RequestTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next token. Tokens start at 1.
    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_latest(&self, token: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == token
    }

    pub fn latest(&self) -> u64 {
        self.latest.load(Ordering::SeqCst)
    }
}

/// Drives the `loading` flag from the number of actions in flight.
#[derive(Debug)]
pub struct LoadTracker {
    in_flight: AtomicUsize,
    loading: Observable<bool>,
    policy: StaleResponsePolicy,
}

impl LoadTracker {
    pub fn new(loading: Observable<bool>, policy: StaleResponsePolicy) -> Self {
        Self {
            in_flight: AtomicUsize::new(0),
            loading,
            policy,
        }
    }

    /// Mark an action as started. `loading` stays true at least until the
    /// returned guard is dropped.
    pub fn begin(self: &Arc<Self>) -> LoadingGuard {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.sync_loading();
        LoadingGuard {
            tracker: Arc::clone(self),
        }
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    fn finish(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        match self.policy {
            StaleResponsePolicy::DiscardStale => self.sync_loading(),
            // Any completion clears the flag, even with other loads pending
            StaleResponsePolicy::LastWriteWins => {
                self.loading.set_if_changed(false);
            }
        }
    }

    fn sync_loading(&self) {
        // The counter is read under the observable's lock so the last writer
        // always publishes the current count.
        self.loading.try_update(|loading| {
            let busy = self.in_flight.load(Ordering::SeqCst) > 0;
            if *loading == busy {
                false
            } else {
                *loading = busy;
                true
            }
        });
    }
}

/// Scope guard releasing one in-flight action on drop, on every exit path.
#[must_use = "loading is released as soon as the guard is dropped"]
#[derive(Debug)]
pub struct LoadingGuard {
    tracker: Arc<LoadTracker>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.tracker.finish();
    }
}
