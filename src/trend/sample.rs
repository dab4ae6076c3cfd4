use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// One captured point of the slope-movement trend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrendSample {
    pub timestamp: DateTime<Utc>,
    /// mm
    pub movement: f64,
}

impl TrendSample {
    pub fn new(timestamp: DateTime<Utc>, movement: f64) -> Self {
        Self { timestamp, movement }
    }

    /// `HH:MM` in local time, as shown on the chart axis.
    pub fn time_label(&self) -> String {
        self.timestamp.with_timezone(&Local).format("%H:%M").to_string()
    }
}
