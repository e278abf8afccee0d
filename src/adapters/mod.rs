//! Concrete implementations of the trait abstractions.
//!
//! - [`HttpScreenTimeService`] - screen-time service over JSON/HTTP
//! - [`ReqwestHttpClient`] - HTTP transport using reqwest
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockScreenTimeService`] - scripted replies, call recording, gates
//! - [`mock::MockHttpClient`] - configurable HTTP responses

pub mod http_service;
pub mod mock;
pub mod reqwest_http;

pub use http_service::HttpScreenTimeService;
pub use mock::{MockHttpClient, MockScreenTimeService};
pub use reqwest_http::ReqwestHttpClient;
