pub mod sample;
pub mod window;

pub use sample::TrendSample;
pub use window::{max_movement, TrendWindow, DEFAULT_CAPACITY, SEED_TREND_MM};
