//! Reactive state for the screen-time dashboard.
//!
//! - [`Observable`] / [`Readable`] / [`Subscription`]: the publish-subscribe
//!   container every field is built on
//! - [`ScreenTimeStore`]: the six dashboard fields plus their actions
//! - [`StoreSnapshot`]: all fields read at once

pub mod observable;
pub mod snapshot;
pub mod store;
pub mod tracking;

pub use observable::{Observable, Readable, Subscription};
pub use snapshot::StoreSnapshot;
pub use store::{ScreenTimeStore, DAILY_FALLBACK_ERROR, OVERVIEW_FALLBACK_ERROR};
pub use tracking::{LoadTracker, LoadingGuard, RequestTokens};
