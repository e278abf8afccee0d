//! Point-in-time copy of the store state.

use crate::models::{DailyReport, Overview, ViewMode};

/// Every store field read at one moment. Handy for rendering and asserting.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSnapshot {
    pub view_mode: ViewMode,
    pub selected_date: String,
    pub overview: Option<Overview>,
    pub daily_data: Option<DailyReport>,
    pub loading: bool,
    pub error: String,
}

impl StoreSnapshot {
    pub fn has_overview_data(&self) -> bool {
        self.overview.is_some()
    }

    pub fn has_daily_data(&self) -> bool {
        self.daily_data.is_some()
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }

    /// Status line for the header: loading, error, or idle.
    pub fn status_display(&self) -> &str {
        if self.loading {
            "Loading..."
        } else if self.has_error() {
            &self.error
        } else {
            ""
        }
    }
}
