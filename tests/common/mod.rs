//! Common test utilities for integration tests.
//!
//! Fixtures mirror what the screen-time service returns for a quiet day with
//! one editor session, plus helpers for building stores over the mock
//! service and recording observable updates.
//!
//! # Example
//!
//! ```ignore
//! mod common;
//! use common::*;
//!
//! let service = scripted_service();
//! let store = store_over(&service, StoreConfig::default());
//! ```

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use screentime::adapters::mock::{MockReply, MockScreenTimeService};
use screentime::config::StoreConfig;
use screentime::models::{AppUsage, DailyReport, Overview};
use screentime::state::{Readable, ScreenTimeStore, Subscription};

/// Date every fixture report is stamped with.
pub const FIXTURE_DATE: &str = "2024-01-01";

/// A single editor entry: 30 minutes, 3 opens, all of the period.
pub fn editor_usage() -> AppUsage {
    let mut usage = AppUsage::new("editor", 1800, 3, "2024-01-01T10:00:00Z", 1800);
    usage.total_time_formatted = "30m".to_string();
    usage
}

/// Overview with 2h all-time, 30m today, editor on top.
pub fn fixture_overview() -> Overview {
    let mut overview = Overview::new(7200, 1800, vec![editor_usage()]);
    overview.total_time_formatted = "2h".to_string();
    overview
}

/// Today's report matching [`fixture_overview`].
pub fn fixture_today() -> DailyReport {
    DailyReport::new(FIXTURE_DATE, vec![editor_usage()])
}

/// Report for an arbitrary date with one app of `seconds` length.
pub fn report_for(date: &str, seconds: u64) -> DailyReport {
    DailyReport::new(date, vec![AppUsage::new("browser", seconds, 1, "", seconds)])
}

/// Mock service answering every overview and today call with the fixtures.
pub fn scripted_service() -> MockScreenTimeService {
    let service = MockScreenTimeService::new();
    service.set_overview(MockReply::data(fixture_overview()));
    service.set_today(MockReply::data(fixture_today()));
    service
}

/// Store over a clone of `service`, pinned to [`FIXTURE_DATE`] unless the
/// config already names a date.
pub fn store_over(service: &MockScreenTimeService, config: StoreConfig) -> ScreenTimeStore {
    let config = if config.initial_date.is_none() {
        config.with_initial_date(FIXTURE_DATE)
    } else {
        config
    };
    ScreenTimeStore::with_config(Arc::new(service.clone()), config)
}

/// Every value a readable publishes, starting with the current one.
pub fn record<T>(readable: &Readable<T>) -> (Subscription, Arc<Mutex<Vec<T>>>)
where
    T: Clone + Send + Sync + 'static,
{
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let sub = readable.subscribe(move |value| sink.lock().unwrap().push(value.clone()));
    (sub, seen)
}
