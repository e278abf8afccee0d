//! Usage report value types.
//!
//! These are the snapshots handed out by the screen-time service. They are
//! never mutated in place: every successful fetch produces fresh values that
//! replace the previous ones wholesale.

use serde::{Deserialize, Serialize};

use super::format::{format_duration, usage_percentage};

// ============================================================================
// AppUsage
// ============================================================================

/// One application's share of tracked time within a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppUsage {
    /// Window class / application identifier
    #[serde(rename = "class")]
    pub identifier: String,
    /// Time spent in the application, in seconds
    #[serde(rename = "total_time")]
    pub total_time_seconds: u64,
    /// Human readable duration (e.g. "1h 2m 3s")
    pub total_time_formatted: String,
    /// Number of times the application was focused
    pub open_count: u64,
    /// Timestamp of the last activity, as reported by the service
    #[serde(default)]
    pub last_seen: String,
    /// Share of the period total, 0-100
    pub percentage: f64,
}

impl AppUsage {
    /// Build a usage entry, deriving the formatted duration and the
    /// percentage of `period_total_seconds`.
    pub fn new(
        identifier: impl Into<String>,
        total_time_seconds: u64,
        open_count: u64,
        last_seen: impl Into<String>,
        period_total_seconds: u64,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            total_time_seconds,
            total_time_formatted: format_duration(total_time_seconds),
            open_count,
            last_seen: last_seen.into(),
            percentage: usage_percentage(total_time_seconds, period_total_seconds),
        }
    }

    /// Whether the percentage lies in the valid 0-100 range.
    pub fn has_valid_percentage(&self) -> bool {
        (0.0..=100.0).contains(&self.percentage)
    }
}

// ============================================================================
// DailyReport
// ============================================================================

/// Usage for a single calendar day.
///
/// `apps` keeps the order chosen by the service (descending usage); nothing
/// in this crate reorders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    /// Day in `YYYY-MM-DD` form
    pub date: String,
    #[serde(rename = "total_time")]
    pub total_time_seconds: u64,
    pub total_time_formatted: String,
    #[serde(default)]
    pub apps: Vec<AppUsage>,
}

impl DailyReport {
    /// Build a report whose total is the sum of the given apps.
    pub fn new(date: impl Into<String>, apps: Vec<AppUsage>) -> Self {
        let total: u64 = apps.iter().map(|a| a.total_time_seconds).sum();
        Self {
            date: date.into(),
            total_time_seconds: total,
            total_time_formatted: format_duration(total),
            apps,
        }
    }

    /// Number of applications in the report.
    pub fn app_count(&self) -> usize {
        self.apps.len()
    }

    /// True when no time was tracked that day.
    pub fn is_empty(&self) -> bool {
        self.apps.is_empty() && self.total_time_seconds == 0
    }
}

// ============================================================================
// Overview
// ============================================================================

/// Aggregate across all tracked history plus a same-day summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    #[serde(rename = "total_time")]
    pub total_time_seconds: u64,
    pub total_time_formatted: String,
    #[serde(rename = "today_time")]
    pub today_time_seconds: u64,
    pub today_time_formatted: String,
    #[serde(default)]
    pub top_apps: Vec<AppUsage>,
}

impl Overview {
    pub fn new(total_time_seconds: u64, today_time_seconds: u64, top_apps: Vec<AppUsage>) -> Self {
        Self {
            total_time_seconds,
            total_time_formatted: format_duration(total_time_seconds),
            today_time_seconds,
            today_time_formatted: format_duration(today_time_seconds),
            top_apps,
        }
    }

    /// The most used application, if any.
    pub fn top_app(&self) -> Option<&AppUsage> {
        self.top_apps.first()
    }
}
