//! Spending watchdog records.

use serde::{Deserialize, Serialize};

/// Limit shown before the first status read completes.
pub const DEFAULT_LIMIT: f64 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WatchdogStatus {
    pub active: bool,
    pub limit: f64,
    pub blocked: bool,
}

impl Default for WatchdogStatus {
    fn default() -> Self {
        Self {
            active: false,
            limit: DEFAULT_LIMIT,
            blocked: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Notification {
    #[serde(rename = "type")]
    pub kind: String,
    pub msg: String,
    pub date: String,
}

/// The watchdog is switched through two distinct endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchdogSwitch {
    Activate,
    Deactivate,
}

impl WatchdogSwitch {
    /// The switch that flips the current `active` flag.
    pub fn toggling(active: bool) -> Self {
        if active {
            Self::Deactivate
        } else {
            Self::Activate
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SetLimitRequest {
    pub limit: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovementRequest {
    pub amount: f64,
    pub desc: String,
}
