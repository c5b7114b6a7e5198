//! Decoders for the payloads the controller pushes.
//!
//! Sensor topics carry plain text: temperatures and fan speed as decimal
//! numbers, the lid/hopper/ash flags as `"1"`/`"0"`, power as
//! `"true"`/`"false"`. History and system info arrive as JSON.

use serde::{Deserialize, Serialize};

/// Temperature or fan speed reading. `None` if the text is not a number.
pub fn reading(payload: &str) -> Option<f64> {
    payload.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Lid, hopper and ash status flags: `"1"` means the condition is active.
pub fn status_flag(payload: &str) -> bool {
    payload.trim() == "1"
}

pub fn power(payload: &str) -> bool {
    payload.trim() == "true"
}

/// One past cook, as listed on `grill/history/data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySession {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub start_time: String,
    #[serde(default)]
    pub max_temp: Option<f64>,
    /// Minutes.
    #[serde(default)]
    pub duration: Option<f64>,
}

impl HistorySession {
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .unwrap_or("Unnamed Session")
    }
}

/// Controller identity, as pushed on `grill/system/info`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    #[serde(default)]
    pub device_name: String,
    #[serde(default)]
    pub firmware_version: String,
    #[serde(default)]
    pub uptime: String,
}

pub fn history(payload: &str) -> serde_json::Result<Vec<HistorySession>> {
    serde_json::from_str(payload)
}

pub fn system_info(payload: &str) -> serde_json::Result<SystemInfo> {
    serde_json::from_str(payload)
}
