//! Trait abstractions for dependency injection and testability.
//!
//! - [`ScreenTimeService`] - the upstream screen-time capability contract
//! - [`HttpClient`] - HTTP GET transport used by the HTTP service adapter

pub mod http;
pub mod service;

pub use http::{Headers, HttpClient, HttpError, Response};
pub use service::ScreenTimeService;
