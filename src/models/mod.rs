//! Data model for the screen-time dashboard.
//!
//! - [`AppUsage`] - one application's share of a period
//! - [`DailyReport`] - usage for a single day
//! - [`Overview`] - all-time aggregate plus today's summary
//! - [`ViewMode`] - which report the dashboard shows

pub mod format;
pub mod usage;
pub mod view;

pub use format::{format_duration, is_iso_date, today_iso, usage_percentage, ISO_DATE_FORMAT};
pub use usage::{AppUsage, DailyReport, Overview};
pub use view::ViewMode;
