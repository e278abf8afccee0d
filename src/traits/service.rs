//! Screen-time service capability contract.
//!
//! This is the upstream boundary the dashboard reads from. Implementations
//! wrap whatever the host application exposes (an IPC binding, a local HTTP
//! endpoint, a test double). `Ok(None)` means the service had nothing to
//! return; `Err` is any failure the service raised.

use async_trait::async_trait;

use crate::error::ServiceResult;
use crate::models::{DailyReport, Overview};

/// Capability contract for the external screen-time service.
///
/// # Example
///
/// ```ignore
/// use screentime::traits::ScreenTimeService;
///
/// async fn today_total<S: ScreenTimeService + ?Sized>(service: &S) -> u64 {
///     match service.get_today_stats().await {
///         Ok(Some(report)) => report.total_time_seconds,
///         _ => 0,
///     }
/// }
/// ```
#[async_trait]
pub trait ScreenTimeService: Send + Sync {
    /// All-time aggregate plus today's summary.
    async fn get_overview(&self) -> ServiceResult<Option<Overview>>;

    /// Report for the current date as the service sees it.
    async fn get_today_stats(&self) -> ServiceResult<Option<DailyReport>>;

    /// Report for an explicit `YYYY-MM-DD` date.
    ///
    /// The date is not validated on this side of the boundary.
    async fn get_daily_stats(&self, date: &str) -> ServiceResult<Option<DailyReport>>;
}
