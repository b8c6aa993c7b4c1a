use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Watch status values used across filtering, aggregation, and export
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum WatchStatus {
    /// Finished watching
    Watched,
    /// Want to watch
    Planning,
    /// Currently watching
    Watching,
    /// Stopped watching
    Dropped,
}

impl WatchStatus {
    /// All statuses in display order
    pub const ALL: [WatchStatus; 4] = [
        WatchStatus::Watched,
        WatchStatus::Planning,
        WatchStatus::Watching,
        WatchStatus::Dropped,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            WatchStatus::Watched => "watched",
            WatchStatus::Planning => "planning",
            WatchStatus::Watching => "watching",
            WatchStatus::Dropped => "dropped",
        }
    }
}

impl fmt::Display for WatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WatchStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "watched" => Ok(WatchStatus::Watched),
            "planning" => Ok(WatchStatus::Planning),
            "watching" => Ok(WatchStatus::Watching),
            "dropped" => Ok(WatchStatus::Dropped),
            other => Err(format!(
                "Invalid status: {}. Use 'watched', 'planning', 'watching', or 'dropped'",
                other
            )),
        }
    }
}
