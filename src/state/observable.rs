//! Observable value container.
//!
//! An [`Observable`] holds one value and a list of subscribers. Commits are
//! queued under the internal lock and delivered outside it, one delivery at a
//! time, strictly in commit order. Whoever commits while no delivery is
//! running drains the queue before returning; a commit made from inside a
//! callback, or from another thread mid-delivery, is delivered by the drain
//! already in progress. Every subscriber therefore sees commits in order and
//! its last notification is the current value. Async consumers can use
//! [`Observable::watch`] instead of callbacks.
//!
//! # Example
//!
//! ```ignore
//! use screentime::state::Observable;
//!
//! let loading = Observable::new(true);
//! let sub = loading.subscribe(|value| println!("loading = {}", value));
//! loading.set(false);
//! drop(sub); // unsubscribes
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::watch;

type Callback<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Subscriber<T> {
    id: u64,
    /// Commit sequence at registration; older commits are not delivered
    since: u64,
    callback: Callback<T>,
}

enum Delivery<T> {
    /// A committed value, for every subscriber registered before it.
    Commit { seq: u64, value: T },
    /// The current value, for one new subscriber.
    Initial { id: u64, value: T },
}

struct Slot<T> {
    value: T,
    seq: u64,
    subscribers: Vec<Subscriber<T>>,
    next_id: u64,
    pending: VecDeque<Delivery<T>>,
    dispatching: bool,
}

struct Shared<T> {
    slot: Mutex<Slot<T>>,
    watch_tx: watch::Sender<T>,
}

impl<T> Shared<T> {
    fn lock(&self) -> MutexGuard<'_, Slot<T>> {
        // A subscriber that panicked must not take the whole store down
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Deliver queued notifications until the queue is empty, unless a
    /// delivery is already running somewhere.
    fn dispatch(&self) {
        {
            let mut slot = self.lock();
            if slot.dispatching {
                return;
            }
            slot.dispatching = true;
        }
        let mut guard = DispatchGuard {
            shared: self,
            armed: true,
        };

        loop {
            let (value, callbacks) = {
                let mut slot = self.lock();
                let Some(delivery) = slot.pending.pop_front() else {
                    // Cleared under the same lock that saw the queue empty
                    slot.dispatching = false;
                    guard.armed = false;
                    return;
                };
                match delivery {
                    Delivery::Commit { seq, value } => {
                        let callbacks: Vec<Callback<T>> = slot
                            .subscribers
                            .iter()
                            .filter(|sub| sub.since < seq)
                            .map(|sub| Arc::clone(&sub.callback))
                            .collect();
                        (value, callbacks)
                    }
                    Delivery::Initial { id, value } => {
                        let callbacks: Vec<Callback<T>> = slot
                            .subscribers
                            .iter()
                            .filter(|sub| sub.id == id)
                            .map(|sub| Arc::clone(&sub.callback))
                            .collect();
                        (value, callbacks)
                    }
                }
            };

            for callback in callbacks {
                callback(&value);
            }
        }
    }
}

/// Releases the delivery role if a callback unwinds; the next commit picks
/// up whatever is still queued.
struct DispatchGuard<'a, T> {
    shared: &'a Shared<T>,
    armed: bool,
}

impl<T> Drop for DispatchGuard<'_, T> {
    fn drop(&mut self) {
        if self.armed {
            self.shared.lock().dispatching = false;
        }
    }
}

/// Shared, observable value. Clones refer to the same value.
pub struct Observable<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        let (watch_tx, _) = watch::channel(value.clone());
        Self {
            shared: Arc::new(Shared {
                slot: Mutex::new(Slot {
                    value,
                    seq: 0,
                    subscribers: Vec::new(),
                    next_id: 0,
                    pending: VecDeque::new(),
                    dispatching: false,
                }),
                watch_tx,
            }),
        }
    }

    /// Clone of the current value.
    pub fn get(&self) -> T {
        self.shared.lock().value.clone()
    }

    /// Borrow the current value without cloning it.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.shared.lock().value)
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        self.try_update(|slot| {
            *slot = value;
            true
        });
    }

    /// Mutate the value in place and notify subscribers.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        self.try_update(|slot| {
            f(slot);
            true
        });
    }

    /// Run `f` under the lock; subscribers are notified only if it returns
    /// true. Returns what `f` returned.
    ///
    /// This is the compare-and-commit primitive: the decision and the write
    /// happen atomically with respect to other writers of this value.
    pub fn try_update(&self, f: impl FnOnce(&mut T) -> bool) -> bool {
        {
            let mut slot = self.shared.lock();
            if !f(&mut slot.value) {
                return false;
            }
            slot.seq += 1;
            self.shared.watch_tx.send_replace(slot.value.clone());
            if !slot.subscribers.is_empty() {
                let delivery = Delivery::Commit {
                    seq: slot.seq,
                    value: slot.value.clone(),
                };
                slot.pending.push_back(delivery);
            }
        }

        self.shared.dispatch();
        true
    }

    /// Register `callback`. It is called with the current value and then
    /// after every later commit until the returned handle is dropped.
    ///
    /// Outside a delivery the first call happens before `subscribe` returns;
    /// from inside a callback it follows once that callback finishes.
    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = {
            let mut slot = self.shared.lock();
            let id = slot.next_id;
            slot.next_id += 1;
            let since = slot.seq;
            slot.subscribers.push(Subscriber {
                id,
                since,
                callback: Arc::new(callback),
            });
            let value = slot.value.clone();
            slot.pending.push_back(Delivery::Initial { id, value });
            id
        };

        self.shared.dispatch();

        let weak: Weak<Shared<T>> = Arc::downgrade(&self.shared);
        Subscription::new(move || {
            if let Some(shared) = weak.upgrade() {
                shared.lock().subscribers.retain(|sub| sub.id != id);
            }
        })
    }

    /// Receiver that observes every committed value.
    pub fn watch(&self) -> watch::Receiver<T> {
        self.shared.watch_tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.lock().subscribers.len()
    }

    /// Read-only handle to this value.
    pub fn readable(&self) -> Readable<T> {
        Readable {
            source: self.clone(),
            _link: None,
        }
    }

    /// Read-only projection recomputed on every commit of this value.
    ///
    /// Subscribers of the projection are only notified when the projected
    /// value actually changes.
    pub fn derive<U>(&self, f: impl Fn(&T) -> U + Send + Sync + 'static) -> Readable<U>
    where
        U: Clone + PartialEq + Send + Sync + 'static,
    {
        let target = Observable::new(self.with(|value| f(value)));
        let sink = target.clone();
        let link = self.subscribe(move |value| {
            sink.set_if_changed(f(value));
        });
        Readable {
            source: target,
            _link: Some(Arc::new(link)),
        }
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Observable<T> {
    /// Set the value only if it differs. Returns whether it was committed.
    pub fn set_if_changed(&self, value: T) -> bool {
        self.try_update(|slot| {
            if *slot == value {
                false
            } else {
                *slot = value;
                true
            }
        })
    }
}

impl<T: Clone + Send + Sync + fmt::Debug + 'static> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with(|value| f.debug_tuple("Observable").field(value).finish())
    }
}

// ============================================================================
// Readable
// ============================================================================

/// Read-only view of an [`Observable`], or a projection of one.
///
/// This is what consumers get from the store: they can read and subscribe
/// but not write.
pub struct Readable<T> {
    source: Observable<T>,
    // Keeps a projection wired to its source
    _link: Option<Arc<Subscription>>,
}

impl<T> Clone for Readable<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            _link: self._link.clone(),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Readable<T> {
    pub fn get(&self) -> T {
        self.source.get()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.source.with(f)
    }

    pub fn subscribe(&self, callback: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        self.source.subscribe(callback)
    }

    pub fn watch(&self) -> watch::Receiver<T> {
        self.source.watch()
    }
}

impl<T: Clone + Send + Sync + fmt::Debug + 'static> fmt::Debug for Readable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.source.with(|value| f.debug_tuple("Readable").field(value).finish())
    }
}

// ============================================================================
// Subscription
// ============================================================================

/// Handle returned by `subscribe`. Dropping it unsubscribes.
///
/// Only holds a weak reference to the observable, so an outstanding handle
/// never keeps the value alive.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    fn new(cancel: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Stop receiving notifications now.
    pub fn unsubscribe(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }

    /// Keep the callback registered for the lifetime of the observable.
    pub fn detach(mut self) {
        self.cancel = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
