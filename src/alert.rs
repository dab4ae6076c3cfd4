//! Slope-movement alert classification.
//!
//! Thresholds are fixed and strict: a reading has to move *past* a threshold to
//! escalate, so exactly 7.0 mm is still Safe and exactly 10.0 mm is still Warning.

use serde::{Deserialize, Serialize};

/// Movement above this (mm) is at least Warning.
pub const WARNING_ABOVE_MM: f64 = 7.0;
/// Movement above this (mm) is Critical.
pub const CRITICAL_ABOVE_MM: f64 = 10.0;

/// Risk level, ordered `Safe < Warning < Critical`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum AlertLevel {
    Safe,
    Warning,
    Critical,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct AlertInfo {
    pub label: &'static str,
    pub description: &'static str,
}

pub fn classify(slope_movement: f64) -> AlertLevel {
    if slope_movement > CRITICAL_ABOVE_MM {
        AlertLevel::Critical
    } else if slope_movement > WARNING_ABOVE_MM {
        AlertLevel::Warning
    } else {
        AlertLevel::Safe
    }
}

impl AlertLevel {
    pub const ALL: [AlertLevel; 3] = [AlertLevel::Safe, AlertLevel::Warning, AlertLevel::Critical];

    pub fn info(self) -> AlertInfo {
        match self {
            AlertLevel::Safe => AlertInfo {
                label: "SAFE",
                description: "All systems normal",
            },
            AlertLevel::Warning => AlertInfo {
                label: "WARNING",
                description: "Increased monitoring required",
            },
            AlertLevel::Critical => AlertInfo {
                label: "CRITICAL",
                description: "Immediate evacuation recommended",
            },
        }
    }

    /// Legend caption for the trend chart.
    pub fn range_caption(self) -> &'static str {
        match self {
            AlertLevel::Safe => "Safe (<7mm)",
            AlertLevel::Warning => "Warning (7-10mm)",
            AlertLevel::Critical => "Critical (>10mm)",
        }
    }
}
