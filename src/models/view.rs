//! Which report the dashboard is currently showing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Dashboard view selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    /// Aggregate across all history plus today's summary
    #[default]
    Overview,
    /// Single-day breakdown for the selected date
    Daily,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Overview => "overview",
            ViewMode::Daily => "daily",
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overview" => Ok(ViewMode::Overview),
            "daily" => Ok(ViewMode::Daily),
            other => Err(format!("unknown view mode: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_mode_default() {
        assert_eq!(ViewMode::default(), ViewMode::Overview);
    }

    #[test]
    fn test_view_mode_parse() {
        assert_eq!("overview".parse::<ViewMode>(), Ok(ViewMode::Overview));
        assert_eq!(" Daily ".parse::<ViewMode>(), Ok(ViewMode::Daily));
        assert!("weekly".parse::<ViewMode>().is_err());
    }

    #[test]
    fn test_view_mode_serde() {
        assert_eq!(serde_json::to_string(&ViewMode::Daily).unwrap(), "\"daily\"");
        let mode: ViewMode = serde_json::from_str("\"overview\"").unwrap();
        assert_eq!(mode, ViewMode::Overview);
    }
}
