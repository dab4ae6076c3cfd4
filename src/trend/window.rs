use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::error::{TelemetryError, TelemetryResult};

use super::sample::TrendSample;

pub const DEFAULT_CAPACITY: usize = 7;

/// Monotonic trend the chart starts with before any live sample is captured.
pub const SEED_TREND_MM: [f64; 7] = [5.2, 5.8, 6.1, 6.8, 7.2, 7.9, 8.2];

/// Bounded FIFO of trend samples, oldest first.
///
/// Samples are kept in call order; the window never sorts or deduplicates, so the
/// caller is responsible for appending chronologically.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TrendWindow {
    capacity: usize,
    samples: VecDeque<TrendSample>,
}

impl TrendWindow {
    pub fn new(capacity: usize) -> TelemetryResult<Self> {
        if capacity == 0 {
            return Err(TelemetryError::InvalidConfig(
                "trend window capacity must be at least 1".into(),
            ));
        }
        Ok(Self {
            capacity,
            samples: VecDeque::with_capacity(capacity),
        })
    }

    /// Window pre-filled with [`SEED_TREND_MM`], the newest sample stamped `end` and
    /// each earlier one `spacing` before the next.
    pub fn seeded(capacity: usize, end: DateTime<Utc>, spacing: Duration) -> TelemetryResult<Self> {
        let mut window = Self::new(capacity)?;
        let count = SEED_TREND_MM.len();
        for (i, movement) in SEED_TREND_MM.iter().enumerate() {
            let steps_back = (count - 1 - i) as i32;
            let timestamp = spacing
                .checked_mul(steps_back)
                .and_then(|offset| end.checked_sub_signed(offset))
                .ok_or_else(|| {
                    TelemetryError::InvalidConfig(
                        "slow tick cadence too large to seed the trend window".into(),
                    )
                })?;
            window.append(TrendSample::new(timestamp, *movement));
        }
        Ok(window)
    }

    /// Appends `sample`, evicting and returning the oldest one when already full.
    pub fn append(&mut self, sample: TrendSample) -> Option<TrendSample> {
        let evicted = if self.samples.len() == self.capacity {
            self.samples.pop_front()
        } else {
            None
        };
        self.samples.push_back(sample);
        evicted
    }

    /// Largest movement in the window, used to scale the chart.
    pub fn max_movement(&self) -> TelemetryResult<f64> {
        max_movement(&self.samples)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<&TrendSample> {
        self.samples.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrendSample> {
        self.samples.iter()
    }

    pub fn to_vec(&self) -> Vec<TrendSample> {
        self.samples.iter().copied().collect()
    }
}

/// Largest movement across `samples`; `DegenerateInput` when there are none.
pub fn max_movement<'a, I>(samples: I) -> TelemetryResult<f64>
where
    I: IntoIterator<Item = &'a TrendSample>,
{
    samples
        .into_iter()
        .map(|sample| sample.movement)
        .reduce(f64::max)
        .ok_or(TelemetryError::DegenerateInput(
            "max_movement on an empty trend window",
        ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 0, minute, 0).unwrap()
    }

    fn window_of(capacity: usize, movements: &[f64]) -> TrendWindow {
        let mut window = TrendWindow::new(capacity).unwrap();
        for (i, movement) in movements.iter().enumerate() {
            window.append(TrendSample::new(at(i as u32), *movement));
        }
        window
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            TrendWindow::new(0),
            Err(TelemetryError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_append_below_capacity_grows_by_one() {
        let mut window = window_of(7, &[1.0, 2.0, 3.0]);
        let before = window.to_vec();
        let sample = TrendSample::new(at(10), 4.0);

        assert_eq!(window.append(sample), None);

        let mut expected = before;
        expected.push(sample);
        assert_eq!(window.to_vec(), expected);
        assert_eq!(window.len(), 4);
    }

    #[test]
    fn test_append_at_capacity_shifts_left() {
        let mut window = window_of(7, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
        let before = window.to_vec();
        let sample = TrendSample::new(at(30), 9.5);

        let evicted = window.append(sample);

        let after = window.to_vec();
        assert_eq!(evicted, Some(before[0]));
        assert_eq!(after.len(), 7);
        assert_eq!(&after[..6], &before[1..]);
        assert_eq!(after[6], sample);
    }

    #[test]
    fn test_capacity_one_keeps_only_latest() {
        let mut window = window_of(1, &[1.0, 2.0, 3.0]);
        assert_eq!(window.len(), 1);
        assert_eq!(window.latest().map(|s| s.movement), Some(3.0));
        window.append(TrendSample::new(at(5), 0.5));
        assert_eq!(window.to_vec(), vec![TrendSample::new(at(5), 0.5)]);
    }

    #[test]
    fn test_out_of_order_timestamps_are_kept_as_given() {
        let mut window = TrendWindow::new(3).unwrap();
        window.append(TrendSample::new(at(9), 1.0));
        window.append(TrendSample::new(at(2), 1.0));

        let stamps: Vec<_> = window.iter().map(|s| s.timestamp).collect();
        assert_eq!(stamps, vec![at(9), at(2)]);
    }

    #[test]
    fn test_max_movement() {
        let window = window_of(7, &[5.0, 8.0, 3.0]);
        assert_eq!(window.max_movement(), Ok(8.0));
    }

    #[test]
    fn test_max_movement_on_empty_window_is_degenerate() {
        let window = TrendWindow::new(7).unwrap();
        assert!(matches!(
            window.max_movement(),
            Err(TelemetryError::DegenerateInput(_))
        ));
    }

    #[test]
    fn test_seeded_window() {
        let end = at(30);
        let window = TrendWindow::seeded(7, end, Duration::seconds(30)).unwrap();

        let movements: Vec<f64> = window.iter().map(|s| s.movement).collect();
        assert_eq!(movements, SEED_TREND_MM.to_vec());
        assert_eq!(window.latest().map(|s| s.timestamp), Some(end));
        assert_eq!(
            window.iter().next().map(|s| s.timestamp),
            Some(end - Duration::seconds(180))
        );
        assert_eq!(window.max_movement(), Ok(8.2));
    }

    #[test]
    fn test_seeded_window_with_huge_spacing_is_invalid_config() {
        let spacing = Duration::milliseconds(i64::MAX / 4);
        assert!(matches!(
            TrendWindow::seeded(7, at(30), spacing),
            Err(TelemetryError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_seeded_window_smaller_than_seed_keeps_newest() {
        let window = TrendWindow::seeded(3, at(30), Duration::seconds(30)).unwrap();
        let movements: Vec<f64> = window.iter().map(|s| s.movement).collect();
        assert_eq!(movements, vec![7.2, 7.9, 8.2]);
    }
}
