//! Remote access layer.
//!
//! Thin, stateless wrappers over [`ScreenTimeService`]: one request per call,
//! an absent-value check, nothing else. No caching, no retries. Service
//! errors pass through unchanged.

use tracing::debug;

use crate::error::{FetchError, FetchResult};
use crate::models::{DailyReport, Overview};
use crate::traits::ScreenTimeService;

/// Fetch the all-time overview.
pub async fn fetch_overview<S>(service: &S) -> FetchResult<Overview>
where
    S: ScreenTimeService + ?Sized,
{
    debug!("Fetching overview");
    service
        .get_overview()
        .await?
        .ok_or(FetchError::empty("overview"))
}

/// Fetch the report for the service's current date.
pub async fn fetch_today_stats<S>(service: &S) -> FetchResult<DailyReport>
where
    S: ScreenTimeService + ?Sized,
{
    debug!("Fetching today stats");
    service
        .get_today_stats()
        .await?
        .ok_or(FetchError::empty("today stats"))
}

/// Fetch the report for `date` (`YYYY-MM-DD`, forwarded untouched).
pub async fn fetch_daily_stats<S>(service: &S, date: &str) -> FetchResult<DailyReport>
where
    S: ScreenTimeService + ?Sized,
{
    debug!("Fetching daily stats for {}", date);
    service
        .get_daily_stats(date)
        .await?
        .ok_or(FetchError::empty("daily stats"))
}
