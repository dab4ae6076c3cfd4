use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::alert::{AlertInfo, AlertLevel};
use crate::error::TelemetryResult;
use crate::sensors::SensorReading;
use crate::trend::{max_movement, TrendSample};

/// Immutable copy of engine state handed to display adapters.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TelemetrySnapshot {
    pub reading: SensorReading,
    pub alert_level: AlertLevel,
    /// Oldest first.
    pub window: Vec<TrendSample>,
    pub updated_at: DateTime<Utc>,
    /// Bumped on every publication.
    pub sequence: u64,
}

impl TelemetrySnapshot {
    pub fn alert_info(&self) -> AlertInfo {
        self.alert_level.info()
    }

    /// Chart scale for the trend panel.
    pub fn max_movement(&self) -> TelemetryResult<f64> {
        max_movement(&self.window)
    }
}
