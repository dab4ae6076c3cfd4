use serde::{Deserialize, Serialize};

use super::reading::SensorReading;

/// Every scalar carried by a [`SensorReading`], with its random-walk step and bounds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum ReadingField {
    Radar,
    Lidar,
    WindSpeed,
    Temperature,
    Humidity,
    Acoustic,
    SlopeMovement,
}

impl ReadingField {
    pub const ALL: [ReadingField; 7] = [
        ReadingField::Radar,
        ReadingField::Lidar,
        ReadingField::WindSpeed,
        ReadingField::Temperature,
        ReadingField::Humidity,
        ReadingField::Acoustic,
        ReadingField::SlopeMovement,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ReadingField::Radar => "radar",
            ReadingField::Lidar => "lidar",
            ReadingField::WindSpeed => "weather.windSpeed",
            ReadingField::Temperature => "weather.temperature",
            ReadingField::Humidity => "weather.humidity",
            ReadingField::Acoustic => "acoustic",
            ReadingField::SlopeMovement => "slopeMovement",
        }
    }

    /// Full width of the uniform perturbation applied per tick.
    pub fn step(self) -> f64 {
        match self {
            ReadingField::Radar => 0.5,
            ReadingField::Lidar => 0.3,
            ReadingField::WindSpeed => 2.0,
            ReadingField::Temperature => 0.5,
            ReadingField::Humidity => 2.0,
            ReadingField::Acoustic => 5.0,
            ReadingField::SlopeMovement => 0.8,
        }
    }

    /// Inclusive `(lower, upper)` bounds. Unbounded fields use `f64::INFINITY`.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            ReadingField::Temperature => (-10.0, 35.0),
            ReadingField::Humidity => (0.0, 100.0),
            _ => (0.0, f64::INFINITY),
        }
    }

    pub fn clamp(self, value: f64) -> f64 {
        let (lower, upper) = self.bounds();
        value.clamp(lower, upper)
    }

    pub fn contains(self, value: f64) -> bool {
        let (lower, upper) = self.bounds();
        value >= lower && value <= upper
    }

    pub fn get(self, reading: &SensorReading) -> f64 {
        match self {
            ReadingField::Radar => reading.radar,
            ReadingField::Lidar => reading.lidar,
            ReadingField::WindSpeed => reading.weather.wind_speed,
            ReadingField::Temperature => reading.weather.temperature,
            ReadingField::Humidity => reading.weather.humidity,
            ReadingField::Acoustic => reading.acoustic,
            ReadingField::SlopeMovement => reading.slope_movement,
        }
    }

    pub(crate) fn set(self, reading: &mut SensorReading, value: f64) {
        match self {
            ReadingField::Radar => reading.radar = value,
            ReadingField::Lidar => reading.lidar = value,
            ReadingField::WindSpeed => reading.weather.wind_speed = value,
            ReadingField::Temperature => reading.weather.temperature = value,
            ReadingField::Humidity => reading.weather.humidity = value,
            ReadingField::Acoustic => reading.acoustic = value,
            ReadingField::SlopeMovement => reading.slope_movement = value,
        }
    }
}

/// Physical sensor stations shown on the live data panel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SensorChannel {
    Radar,
    Lidar,
    Weather,
    Acoustic,
}

impl SensorChannel {
    pub const ALL: [SensorChannel; 4] = [
        SensorChannel::Radar,
        SensorChannel::Lidar,
        SensorChannel::Weather,
        SensorChannel::Acoustic,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SensorChannel::Radar => "Radar",
            SensorChannel::Lidar => "LiDAR",
            SensorChannel::Weather => "Weather",
            SensorChannel::Acoustic => "Acoustic",
        }
    }

    pub fn caption(self) -> &'static str {
        match self {
            SensorChannel::Radar => "Displacement detected",
            SensorChannel::Lidar => "Surface deformation",
            SensorChannel::Weather => "Wind, temperature, humidity",
            SensorChannel::Acoustic => "Rock crack sounds",
        }
    }

    pub fn fields(self) -> &'static [ReadingField] {
        match self {
            SensorChannel::Radar => &[ReadingField::Radar],
            SensorChannel::Lidar => &[ReadingField::Lidar],
            SensorChannel::Weather => &[
                ReadingField::WindSpeed,
                ReadingField::Temperature,
                ReadingField::Humidity,
            ],
            SensorChannel::Acoustic => &[ReadingField::Acoustic],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set_roundtrip_touches_only_one_field() {
        let mut reading = SensorReading::seed();
        ReadingField::Humidity.set(&mut reading, 12.0);

        for field in ReadingField::ALL {
            let expected = if field == ReadingField::Humidity {
                12.0
            } else {
                field.get(&SensorReading::seed())
            };
            assert_eq!(field.get(&reading), expected, "{}", field.name());
        }
    }

    #[test]
    fn test_clamp_respects_bounds() {
        assert_eq!(ReadingField::Temperature.clamp(40.0), 35.0);
        assert_eq!(ReadingField::Temperature.clamp(-12.0), -10.0);
        assert_eq!(ReadingField::Humidity.clamp(101.0), 100.0);
        assert_eq!(ReadingField::Radar.clamp(-0.1), 0.0);
        assert_eq!(ReadingField::Acoustic.clamp(1e6), 1e6);
    }

    #[test]
    fn test_channels_cover_every_field_except_slope() {
        let covered: Vec<ReadingField> = SensorChannel::ALL
            .iter()
            .flat_map(|channel| channel.fields().iter().copied())
            .collect();

        assert_eq!(covered.len(), ReadingField::ALL.len() - 1);
        assert!(!covered.contains(&ReadingField::SlopeMovement));
    }
}
