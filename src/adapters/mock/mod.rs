//! Mock implementations for testing.
//!
//! - [`MockScreenTimeService`] - scripted service replies with gates
//! - [`MockHttpClient`] - scripted HTTP responses

pub mod http;
pub mod service;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use service::{Gate, MockReply, MockScreenTimeService, ServiceCall};
