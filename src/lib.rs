//! Screentime - reactive client state for a screen-time dashboard
//!
//! The crate is split the same way the dashboard is:
//!
//! - [`models`]: usage records, reports and the view mode
//! - [`traits`] / [`adapters`]: the backend seam and its HTTP and mock
//!   implementations
//! - [`remote`]: request-and-check wrappers over the backend
//! - [`state`]: the observable store and its actions
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use screentime::prelude::*;
//!
//! let service = HttpScreenTimeService::from_config(&ServiceConfig::from_env())?;
//! let store = ScreenTimeStore::with_config(Arc::new(service), StoreConfig::from_env());
//!
//! let _sub = store.error().subscribe(|e| if !e.is_empty() { eprintln!("{}", e) });
//! store.refresh().await?;
//! ```

pub mod adapters;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod prelude;
pub mod remote;
pub mod state;
pub mod traits;
