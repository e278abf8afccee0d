//! Formatting and date helpers shared by the usage models.

use chrono::{Local, NaiveDate};

/// Date format used on the wire and in the store.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Format a duration in seconds the way the service does.
///
/// Examples: `3723` -> `"1h 2m 3s"`, `125` -> `"2m 5s"`, `42` -> `"42s"`.
pub fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds / 60) % 60;
    let secs = seconds % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Share of `total` taken by `part`, as a percentage clamped to 0-100.
pub fn usage_percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 100.0).clamp(0.0, 100.0)
}

/// Today's local date in `YYYY-MM-DD` form.
///
/// Local rather than UTC: the service buckets usage by local day.
pub fn today_iso() -> String {
    Local::now().date_naive().format(ISO_DATE_FORMAT).to_string()
}

/// Strict `YYYY-MM-DD` check that also rejects impossible calendar dates.
pub fn is_iso_date(value: &str) -> bool {
    value.len() == 10 && NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration_seconds_only() {
        assert_eq!(format_duration(0), "0s");
        assert_eq!(format_duration(42), "42s");
    }

    #[test]
    fn test_format_duration_minutes() {
        assert_eq!(format_duration(60), "1m 0s");
        assert_eq!(format_duration(125), "2m 5s");
    }

    #[test]
    fn test_format_duration_hours() {
        assert_eq!(format_duration(3600), "1h 0m 0s");
        assert_eq!(format_duration(3723), "1h 2m 3s");
        assert_eq!(format_duration(90_000), "25h 0m 0s");
    }

    #[test]
    fn test_usage_percentage() {
        assert_eq!(usage_percentage(0, 0), 0.0);
        assert_eq!(usage_percentage(5, 0), 0.0);
        assert_eq!(usage_percentage(1, 4), 25.0);
        assert_eq!(usage_percentage(10, 10), 100.0);
        // Inconsistent service totals never escape the valid range
        assert_eq!(usage_percentage(20, 10), 100.0);
    }

    #[test]
    fn test_today_iso_shape() {
        let today = today_iso();
        assert!(is_iso_date(&today), "unexpected date {}", today);
    }

    #[test]
    fn test_today_iso_is_local_date() {
        let expected = Local::now().date_naive().format(ISO_DATE_FORMAT).to_string();
        assert_eq!(today_iso(), expected);
    }

    #[test]
    fn test_is_iso_date() {
        assert!(is_iso_date("2024-01-01"));
        assert!(is_iso_date("2024-02-29"));
        assert!(!is_iso_date("2023-02-29"));
        assert!(!is_iso_date("2024-1-1"));
        assert!(!is_iso_date("01/01/2024"));
        assert!(!is_iso_date(""));
    }
}
