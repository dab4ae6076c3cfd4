use std::str::FromStr;
use std::time::Duration;

use log::warn;

use crate::error::{TelemetryError, TelemetryResult};
use crate::sensors::SensorReading;
use crate::trend::DEFAULT_CAPACITY;

pub const FAST_TICK_ENV: &str = "SAFESLOPE_FAST_TICK_MS";
pub const SLOW_TICK_ENV: &str = "SAFESLOPE_SLOW_TICK_MS";
pub const RNG_SEED_ENV: &str = "SAFESLOPE_RNG_SEED";
pub const DEBUG_ENV: &str = "SAFESLOPE_DEBUG";

/// Tunables for the telemetry engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Reading refresh cadence.
    pub fast_tick: Duration,

    /// Trend capture cadence. Also spaces the timestamps of the seeded trend.
    pub slow_tick: Duration,

    pub window_capacity: usize,

    /// Reading the engine starts from. Must satisfy the sensor bounds.
    pub seed_reading: SensorReading,

    /// Fixed RNG seed for reproducible walks; entropy when `None`.
    pub rng_seed: Option<u64>,

    /// Emit a debug heartbeat every N fast ticks.
    pub heartbeat_every_ticks: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fast_tick: Duration::from_secs(2),
            slow_tick: Duration::from_secs(30),
            window_capacity: DEFAULT_CAPACITY,
            seed_reading: SensorReading::seed(),
            rng_seed: None,
            heartbeat_every_ticks: 15,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for the `SAFESLOPE_*` keys.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(ms) = parse_override::<u64, _>(&lookup, FAST_TICK_ENV) {
            config.fast_tick = Duration::from_millis(ms);
        }
        if let Some(ms) = parse_override::<u64, _>(&lookup, SLOW_TICK_ENV) {
            config.slow_tick = Duration::from_millis(ms);
        }
        if let Some(seed) = parse_override::<u64, _>(&lookup, RNG_SEED_ENV) {
            config.rng_seed = Some(seed);
        }

        let debug_mode = lookup(DEBUG_ENV)
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        if debug_mode {
            config.heartbeat_every_ticks = 1;
        }

        config
    }

    pub fn validate(&self) -> TelemetryResult<()> {
        if self.fast_tick.is_zero() {
            return Err(TelemetryError::InvalidConfig(
                "fast tick cadence must be non-zero".into(),
            ));
        }
        if self.slow_tick.is_zero() {
            return Err(TelemetryError::InvalidConfig(
                "slow tick cadence must be non-zero".into(),
            ));
        }
        if self.window_capacity == 0 {
            return Err(TelemetryError::InvalidConfig(
                "trend window capacity must be at least 1".into(),
            ));
        }
        if self.heartbeat_every_ticks == 0 {
            return Err(TelemetryError::InvalidConfig(
                "heartbeat interval must be at least 1 tick".into(),
            ));
        }
        self.seed_reading.validate()
    }
}

fn parse_override<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("ignoring {key}={raw:?}: not a valid value, keeping default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_match_reference_build() {
        let config = EngineConfig::default();
        assert_eq!(config.fast_tick, Duration::from_secs(2));
        assert_eq!(config.slow_tick, Duration::from_secs(30));
        assert_eq!(config.window_capacity, 7);
        assert_eq!(config.seed_reading.slope_movement, 8.2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides_applied() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            (FAST_TICK_ENV, "250"),
            (SLOW_TICK_ENV, " 5000 "),
            (RNG_SEED_ENV, "17"),
            (DEBUG_ENV, "TRUE"),
        ]));

        assert_eq!(config.fast_tick, Duration::from_millis(250));
        assert_eq!(config.slow_tick, Duration::from_millis(5000));
        assert_eq!(config.rng_seed, Some(17));
        assert_eq!(config.heartbeat_every_ticks, 1);
    }

    #[test]
    fn test_garbage_overrides_keep_defaults() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            (FAST_TICK_ENV, "fast"),
            (RNG_SEED_ENV, "-3"),
            (DEBUG_ENV, "0"),
        ]));

        assert_eq!(config.fast_tick, Duration::from_secs(2));
        assert_eq!(config.rng_seed, None);
        assert_eq!(config.heartbeat_every_ticks, 15);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = EngineConfig {
            fast_tick: Duration::ZERO,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(TelemetryError::InvalidConfig(_))));

        let config = EngineConfig {
            seed_reading: SensorReading::seed().with_slope_movement(-1.0),
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TelemetryError::OutOfRangeInput { .. })
        ));
    }
}
