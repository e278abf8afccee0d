//! JSON-over-HTTP implementation of the screen-time service contract.
//!
//! Endpoints, relative to the configured base URL:
//!
//! | Call | Request |
//! |------|---------|
//! | `get_overview` | `GET /api/overview` |
//! | `get_today_stats` | `GET /api/stats/today` |
//! | `get_daily_stats` | `GET /api/stats/daily?date=YYYY-MM-DD` |
//!
//! A `null` or empty body, or a 404, means "no data" and maps to `Ok(None)`.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;

use crate::adapters::ReqwestHttpClient;
use crate::config::ServiceConfig;
use crate::error::{ServiceError, ServiceResult};
use crate::models::{DailyReport, Overview};
use crate::traits::{Headers, HttpClient, ScreenTimeService};

/// Screen-time service reached over HTTP.
#[derive(Clone)]
pub struct HttpScreenTimeService {
    base_url: String,
    client: Arc<dyn HttpClient>,
}

impl HttpScreenTimeService {
    /// Service at `base_url` using the given transport.
    pub fn new(base_url: impl Into<String>, client: Arc<dyn HttpClient>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Service backed by reqwest with the configured timeout.
    pub fn from_config(config: &ServiceConfig) -> ServiceResult<Self> {
        let client = ReqwestHttpClient::with_timeout(config.timeout)?;
        Ok(Self::new(config.base_url.clone(), Arc::new(client)))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers() -> Headers {
        let mut headers = Headers::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        headers
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ServiceResult<Option<T>> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", url);

        let response = self.client.get(&url, &Self::headers()).await?;

        if response.status == 404 {
            return Ok(None);
        }
        if !response.is_success() {
            return Err(ServiceError::Status {
                status: response.status,
                message: response.text(),
            });
        }
        if response.is_null_body() {
            return Ok(None);
        }

        Ok(Some(response.json::<T>()?))
    }
}

impl std::fmt::Debug for HttpScreenTimeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpScreenTimeService")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl ScreenTimeService for HttpScreenTimeService {
    async fn get_overview(&self) -> ServiceResult<Option<Overview>> {
        self.get_json("/api/overview").await
    }

    async fn get_today_stats(&self) -> ServiceResult<Option<DailyReport>> {
        self.get_json("/api/stats/today").await
    }

    async fn get_daily_stats(&self, date: &str) -> ServiceResult<Option<DailyReport>> {
        // Passed through as-is; bad dates are the service's problem.
        let path = format!("/api/stats/daily?date={}", urlencoding::encode(date));
        self.get_json(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{MockHttpClient, MockResponse};
    use crate::traits::{HttpError, Response};

    const BASE: &str = "http://screentime.test";

    const DAILY_JSON: &str = r#"{
        "date": "2024-01-01",
        "total_time": 1800,
        "total_time_formatted": "30m 0s",
        "apps": [
            {"class": "editor", "total_time": 1800, "total_time_formatted": "30m 0s",
             "open_count": 3, "percentage": 100}
        ]
    }"#;

    fn service(client: &MockHttpClient) -> HttpScreenTimeService {
        HttpScreenTimeService::new(format!("{}/", BASE), Arc::new(client.clone()))
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = MockHttpClient::new();
        assert_eq!(service(&client).base_url(), BASE);
    }

    #[tokio::test]
    async fn test_get_daily_stats_decodes_report() {
        let client = MockHttpClient::new();
        client.set_response(
            &format!("{}/api/stats/daily?date=2024-01-01", BASE),
            MockResponse::Success(Response::new(200, DAILY_JSON)),
        );

        let report = service(&client)
            .get_daily_stats("2024-01-01")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(report.date, "2024-01-01");
        assert_eq!(report.apps[0].identifier, "editor");

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].headers.get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[tokio::test]
    async fn test_null_body_is_none() {
        let client = MockHttpClient::new();
        client.set_response(
            &format!("{}/api/stats/today", BASE),
            MockResponse::Success(Response::new(200, "null")),
        );

        let result = service(&client).get_today_stats().await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_not_found_is_none() {
        let client = MockHttpClient::new();
        client.set_response(
            &format!("{}/api/overview", BASE),
            MockResponse::Success(Response::new(404, "not found")),
        );

        assert!(service(&client).get_overview().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_server_error_status() {
        let client = MockHttpClient::new();
        client.set_response(
            &format!("{}/api/overview", BASE),
            MockResponse::Success(Response::new(500, "database not initialized")),
        );

        let err = service(&client).get_overview().await.unwrap_err();
        assert_eq!(
            err,
            ServiceError::Status {
                status: 500,
                message: "database not initialized".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let client = MockHttpClient::new();
        client.set_response(
            &format!("{}/api/overview", BASE),
            MockResponse::Success(Response::new(200, r#"{"total_time": "lots"}"#)),
        );

        let err = service(&client).get_overview().await.unwrap_err();
        assert!(matches!(err, ServiceError::Decode(_)));
    }

    #[tokio::test]
    async fn test_transport_error_mapped() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::Error(HttpError::Timeout(
            "10s".to_string(),
        )));

        let err = service(&client).get_today_stats().await.unwrap_err();
        assert_eq!(err, ServiceError::Timeout("10s".to_string()));
    }

    #[tokio::test]
    async fn test_date_is_url_encoded_not_validated() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::Success(Response::new(200, "null")));

        let result = service(&client).get_daily_stats("not a date").await.unwrap();
        assert!(result.is_none());
        assert_eq!(
            client.get_requests()[0].url,
            format!("{}/api/stats/daily?date=not%20a%20date", BASE)
        );
    }
}
