use tokio_util::sync::CancellationToken;

use crate::alert::AlertLevel;
use crate::engine::{TelemetryEngine, TelemetrySnapshot};
use crate::sensors::SensorChannel;
use crate::{log_debug, log_error, log_info};

const ENABLE_LOGS: bool = true;

/// Formats one snapshot as the lines of a text dashboard.
pub fn render(snapshot: &TelemetrySnapshot) -> Vec<String> {
    let reading = &snapshot.reading;
    let info = snapshot.alert_info();

    let mut lines = vec![format!(
        "{} - {} | Slope Movement: {:.1} mm",
        info.label, info.description, reading.slope_movement
    )];

    for channel in SensorChannel::ALL {
        let value = match channel {
            SensorChannel::Radar => format!("{:.1} mm", reading.radar),
            SensorChannel::Lidar => format!("{:.1} mm", reading.lidar),
            SensorChannel::Weather => format!(
                "{:.1} km/h, {:.0}°C, {:.0}% RH",
                reading.weather.wind_speed, reading.weather.temperature, reading.weather.humidity
            ),
            SensorChannel::Acoustic => format!("{:.0} dB", reading.acoustic),
        };
        lines.push(format!("{}: {} ({})", channel.title(), value, channel.caption()));
    }

    let points: Vec<String> = snapshot
        .window
        .iter()
        .map(|sample| format!("{} {:.1}", sample.time_label(), sample.movement))
        .collect();
    let trend = match snapshot.max_movement() {
        Ok(scale) => format!("Trend: {} (scale {:.1} mm)", points.join(" | "), scale),
        Err(_) => "Trend: no samples yet".to_string(),
    };
    lines.push(trend);

    let legend: Vec<&str> = AlertLevel::ALL
        .iter()
        .map(|level| level.range_caption())
        .collect();
    lines.push(format!("Legend: {}", legend.join(" | ")));

    lines
}

/// Headless display adapter that logs every published snapshot.
pub struct ConsoleDisplay {
    engine: TelemetryEngine,
}

impl ConsoleDisplay {
    pub fn new(engine: TelemetryEngine) -> Self {
        Self { engine }
    }

    pub async fn run(self, cancel_token: CancellationToken) {
        let mut rx = self.engine.subscribe();
        show(&self.engine.current_snapshot());

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => break,
                changed = rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let snapshot = rx.borrow_and_update().clone();
                    show(&snapshot);
                }
            }
        }

        log_info!("console display detached");
    }
}

fn show(snapshot: &TelemetrySnapshot) {
    for line in render(snapshot) {
        log_info!("{line}");
    }

    match serde_json::to_string(snapshot) {
        Ok(payload) => log_debug!("snapshot #{}: {}", snapshot.sequence, payload),
        Err(err) => log_error!("failed to serialize snapshot #{}: {err}", snapshot.sequence),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sensors::SensorReading;
    use crate::trend::TrendSample;
    use chrono::{TimeZone, Utc};

    fn snapshot_with(reading: SensorReading, window: Vec<TrendSample>) -> TelemetrySnapshot {
        TelemetrySnapshot {
            alert_level: crate::alert::classify(reading.slope_movement),
            reading,
            window,
            updated_at: Utc.with_ymd_and_hms(2025, 3, 1, 6, 0, 0).unwrap(),
            sequence: 4,
        }
    }

    #[test]
    fn test_render_seed_snapshot() {
        let at = Utc.with_ymd_and_hms(2025, 3, 1, 6, 0, 0).unwrap();
        let snapshot = snapshot_with(
            SensorReading::seed(),
            vec![TrendSample::new(at, 5.2), TrendSample::new(at, 8.2)],
        );

        let lines = render(&snapshot);

        assert_eq!(snapshot.alert_level, AlertLevel::Warning);
        assert_eq!(
            lines[0],
            "WARNING - Increased monitoring required | Slope Movement: 8.2 mm"
        );
        assert_eq!(lines[1], "Radar: 2.3 mm (Displacement detected)");
        assert_eq!(lines[2], "LiDAR: 1.8 mm (Surface deformation)");
        assert_eq!(
            lines[3],
            "Weather: 12.5 km/h, 18°C, 65% RH (Wind, temperature, humidity)"
        );
        assert_eq!(lines[4], "Acoustic: 45 dB (Rock crack sounds)");
        assert!(lines[5].starts_with("Trend: "));
        assert!(lines[5].ends_with("(scale 8.2 mm)"));
        assert_eq!(
            lines[6],
            "Legend: Safe (<7mm) | Warning (7-10mm) | Critical (>10mm)"
        );
    }

    #[test]
    fn test_render_empty_trend() {
        let snapshot = snapshot_with(SensorReading::seed().with_slope_movement(11.0), Vec::new());
        let lines = render(&snapshot);

        assert!(lines[0].starts_with("CRITICAL - Immediate evacuation recommended"));
        assert_eq!(lines[5], "Trend: no samples yet");
    }
}
