//! Environmental signals - externally supplied current values that drive
//! re-prioritization. No history is kept.

use serde::{Deserialize, Serialize};

/// Staffing shortage threshold: below this headcount the engine delays all
/// non-critical work.
pub const STAFFING_THRESHOLD: u32 = 30;

/// Current weather over the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    /// Outdoor work feasible
    Sunny,
    /// Outdoor work suspended
    Rain,
    /// Outdoor work suspended
    Storm,
}

impl Weather {
    /// Whether this weather suspends outdoor work.
    pub fn suspends_outdoor_work(self) -> bool {
        matches!(self, Self::Rain | Self::Storm)
    }
}

impl std::fmt::Display for Weather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Sunny => "sunny",
            Self::Rain => "rain",
            Self::Storm => "storm",
        };
        f.write_str(s)
    }
}

/// Snapshot of both signals as the engine reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvSignals {
    /// Current weather
    pub weather: Weather,
    /// Current available headcount
    pub personnel_count: u32,
}

impl EnvSignals {
    /// Whether the current headcount is below the shortage threshold.
    pub fn understaffed(&self) -> bool {
        self.personnel_count < STAFFING_THRESHOLD
    }
}
