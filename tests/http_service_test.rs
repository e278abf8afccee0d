//! HTTP service adapter tests using wiremock.
//!
//! These drive the real reqwest transport against a local mock server, both
//! directly and through the store.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::*;
use screentime::adapters::HttpScreenTimeService;
use screentime::config::{ServiceConfig, StoreConfig};
use screentime::error::ServiceError;
use screentime::models::ViewMode;
use screentime::state::ScreenTimeStore;
use screentime::traits::ScreenTimeService;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to build the service against a mock server.
fn service_for(server: &MockServer) -> HttpScreenTimeService {
    let config = ServiceConfig::new()
        .with_base_url(server.uri())
        .with_timeout(Duration::from_secs(2));
    HttpScreenTimeService::from_config(&config).unwrap()
}

fn overview_json() -> serde_json::Value {
    serde_json::json!({
        "total_time": 7200,
        "total_time_formatted": "2h",
        "today_time": 1800,
        "today_time_formatted": "30m",
        "top_apps": [{
            "class": "editor",
            "total_time": 1800,
            "total_time_formatted": "30m",
            "open_count": 3,
            "last_seen": "2024-01-01T10:00:00Z",
            "percentage": 100.0
        }]
    })
}

fn today_json() -> serde_json::Value {
    serde_json::json!({
        "date": "2024-01-01",
        "total_time": 1800,
        "total_time_formatted": "30m 0s",
        "apps": [{
            "class": "editor",
            "total_time": 1800,
            "total_time_formatted": "30m",
            "open_count": 3,
            "last_seen": "2024-01-01T10:00:00Z",
            "percentage": 100.0
        }]
    })
}

#[tokio::test]
async fn test_get_overview_decodes_wire_format() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/overview"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(overview_json()))
        .mount(&server)
        .await;

    let overview = service_for(&server).get_overview().await.unwrap().unwrap();

    assert_eq!(overview.total_time_seconds, 7200);
    assert_eq!(overview.today_time_seconds, 1800);
    assert_eq!(overview.top_apps[0].identifier, "editor");
    assert_eq!(overview.top_apps[0].open_count, 3);
}

#[tokio::test]
async fn test_get_daily_stats_sends_date_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stats/daily"))
        .and(query_param("date", "2024-01-01"))
        .respond_with(ResponseTemplate::new(200).set_body_json(today_json()))
        .expect(1)
        .mount(&server)
        .await;

    let report = service_for(&server).get_daily_stats("2024-01-01").await.unwrap();

    assert_eq!(report.map(|r| r.date), Some("2024-01-01".to_string()));
}

#[tokio::test]
async fn test_null_body_means_no_data() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stats/today"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    assert!(service_for(&server).get_today_stats().await.unwrap().is_none());
}

#[tokio::test]
async fn test_server_error_maps_to_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/overview"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database locked"))
        .mount(&server)
        .await;

    let err = service_for(&server).get_overview().await.unwrap_err();

    assert_eq!(
        err,
        ServiceError::Status {
            status: 500,
            message: "database locked".to_string()
        }
    );
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_malformed_body_maps_to_decode() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/overview"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"total_time\": \"lots\"}"))
        .mount(&server)
        .await;

    let err = service_for(&server).get_overview().await.unwrap_err();
    assert!(matches!(err, ServiceError::Decode(_)), "got {:?}", err);
}

#[tokio::test]
async fn test_store_over_http_loads_overview() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/overview"))
        .respond_with(ResponseTemplate::new(200).set_body_json(overview_json()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/stats/today"))
        .respond_with(ResponseTemplate::new(200).set_body_json(today_json()))
        .mount(&server)
        .await;

    let store = ScreenTimeStore::with_config(
        Arc::new(service_for(&server)),
        StoreConfig::default().with_initial_date(FIXTURE_DATE),
    );
    store.refresh().await.unwrap();

    let snap = store.snapshot();
    assert_eq!(snap.overview.map(|o| o.today_time_seconds), Some(1800));
    assert_eq!(snap.daily_data.map(|d| d.date), Some(FIXTURE_DATE.to_string()));
    assert_eq!(snap.error, "");
    assert!(!snap.loading);
}

#[tokio::test]
async fn test_store_over_http_missing_day_sets_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stats/daily"))
        .and(query_param("date", "2024-01-02"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = ScreenTimeStore::with_config(
        Arc::new(service_for(&server)),
        StoreConfig::default()
            .with_initial_view(ViewMode::Daily)
            .with_initial_date("2024-01-02"),
    );
    store.refresh().await.unwrap();

    assert_eq!(store.error().get(), "No daily stats returned");
    assert!(store.daily_data().get().is_none());
    assert!(!store.loading().get());
}

#[tokio::test]
async fn test_store_over_unreachable_service_reports_connection_error() {
    // Nothing listens on the discard port.
    let config = ServiceConfig::new()
        .with_base_url("http://127.0.0.1:9")
        .with_timeout(Duration::from_secs(2));
    let service = HttpScreenTimeService::from_config(&config).unwrap();
    let store = ScreenTimeStore::with_config(Arc::new(service), StoreConfig::default());

    store.load_overview().await;

    let error = store.error().get();
    assert!(!error.is_empty());
    assert!(store.overview().get().is_none());
    assert!(!store.loading().get());
}
