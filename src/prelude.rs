//! Prelude module for convenient imports.
//!
//! ```ignore
//! use screentime::prelude::*;
//! ```
//!
//! This will import:
//! - The store and its observable handles
//! - Model types (Overview, DailyReport, AppUsage, ViewMode)
//! - Configuration and the HTTP-backed service
//! - Error types

pub use crate::adapters::{HttpScreenTimeService, ReqwestHttpClient};
pub use crate::config::{ServiceConfig, StaleResponsePolicy, StoreConfig};
pub use crate::error::{FetchError, ServiceError};
pub use crate::models::{AppUsage, DailyReport, Overview, ViewMode};
pub use crate::state::{Readable, ScreenTimeStore, StoreSnapshot, Subscription};
pub use crate::traits::ScreenTimeService;
