use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alert::{classify, AlertLevel};
use crate::error::{TelemetryError, TelemetryResult};
use crate::sensors::{ReadingGenerator, SensorReading};
use crate::trend::{TrendSample, TrendWindow};

use super::config::EngineConfig;
use super::snapshot::TelemetrySnapshot;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum EngineStatus {
    Idle,
    Running,
    Stopped,
}

impl Default for EngineStatus {
    fn default() -> Self {
        EngineStatus::Idle
    }
}

/// Result of one fast tick.
#[derive(Debug, Clone, PartialEq)]
pub enum FastTick {
    Applied {
        previous_level: AlertLevel,
        level: AlertLevel,
    },
    /// Generated reading failed validation; the last good one was kept.
    Discarded(TelemetryError),
}

/// Everything the engine owns. Only the ticker tasks and lifecycle calls mutate it,
/// always under the engine's state lock.
pub struct EngineState {
    pub status: EngineStatus,
    reading: SensorReading,
    window: TrendWindow,
    generator: ReadingGenerator,
    updated_at: DateTime<Utc>,
    sequence: u64,
    pub fast_ticks: u64,
    pub slow_ticks: u64,
}

impl EngineState {
    pub fn new(config: &EngineConfig, now: DateTime<Utc>) -> TelemetryResult<Self> {
        config.validate()?;

        let spacing = chrono::Duration::from_std(config.slow_tick)
            .map_err(|err| TelemetryError::InvalidConfig(format!("slow tick cadence: {err}")))?;
        let window = TrendWindow::seeded(config.window_capacity, now, spacing)?;

        Ok(Self {
            status: EngineStatus::Idle,
            reading: config.seed_reading,
            window,
            generator: ReadingGenerator::from_optional_seed(config.rng_seed),
            updated_at: now,
            sequence: 0,
            fast_ticks: 0,
            slow_ticks: 0,
        })
    }

    pub fn reading(&self) -> &SensorReading {
        &self.reading
    }

    pub fn window(&self) -> &TrendWindow {
        &self.window
    }

    /// Always derived from the current reading, never stored.
    pub fn alert_level(&self) -> AlertLevel {
        classify(self.reading.slope_movement)
    }

    /// Replaces the reading with the generator's next value.
    pub fn apply_fast_tick(&mut self, now: DateTime<Utc>) -> FastTick {
        let previous_level = self.alert_level();
        let next = self.generator.advance(&self.reading);

        if let Err(err) = next.validate() {
            return FastTick::Discarded(err);
        }

        self.reading = next;
        self.fast_ticks = self.fast_ticks.wrapping_add(1);
        self.touch(now);

        FastTick::Applied {
            previous_level,
            level: self.alert_level(),
        }
    }

    /// Captures the current slope movement into the trend window.
    /// Returns the evicted sample, if any.
    pub fn apply_slow_tick(&mut self, now: DateTime<Utc>) -> Option<TrendSample> {
        let evicted = self
            .window
            .append(TrendSample::new(now, self.reading.slope_movement));
        self.slow_ticks = self.slow_ticks.wrapping_add(1);
        self.touch(now);
        evicted
    }

    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            reading: self.reading,
            alert_level: self.alert_level(),
            window: self.window.to_vec(),
            updated_at: self.updated_at,
            sequence: self.sequence,
        }
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
        self.sequence = self.sequence.wrapping_add(1);
    }
}
