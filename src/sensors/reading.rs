use serde::{Deserialize, Serialize};

use crate::error::{TelemetryError, TelemetryResult};

use super::channel::ReadingField;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReading {
    /// km/h
    pub wind_speed: f64,
    /// °C, kept within [-10, 35]
    pub temperature: f64,
    /// %, kept within [0, 100]
    pub humidity: f64,
}

/// One point-in-time set of readings across every monitoring station.
///
/// Distances are millimetres and the acoustic level is dB.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SensorReading {
    pub radar: f64,
    pub lidar: f64,
    pub weather: WeatherReading,
    pub acoustic: f64,
    pub slope_movement: f64,
}

impl Default for SensorReading {
    fn default() -> Self {
        Self::seed()
    }
}

impl SensorReading {
    /// Reading the dashboard shows before the first update arrives.
    pub fn seed() -> Self {
        Self {
            radar: 2.3,
            lidar: 1.8,
            weather: WeatherReading {
                wind_speed: 12.5,
                temperature: 18.0,
                humidity: 65.0,
            },
            acoustic: 45.0,
            slope_movement: 8.2,
        }
    }

    pub fn with_slope_movement(mut self, slope_movement: f64) -> Self {
        self.slope_movement = slope_movement;
        self
    }

    /// Checks every field against its bounds and reports the first offender.
    pub fn validate(&self) -> TelemetryResult<()> {
        for field in ReadingField::ALL {
            let value = field.get(self);
            if !field.contains(value) {
                return Err(TelemetryError::OutOfRangeInput {
                    field: field.name(),
                    value,
                });
            }
        }
        Ok(())
    }

    /// Copy with every field pulled back into range. NaN lands on the lower bound.
    pub fn clamped(&self) -> Self {
        let mut next = *self;
        for field in ReadingField::ALL {
            let value = field.get(self);
            let value = if value.is_nan() { field.bounds().0 } else { value };
            field.set(&mut next, field.clamp(value));
        }
        next
    }
}
