use thiserror::Error;

pub type TelemetryResult<T> = Result<T, TelemetryError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TelemetryError {
    #[error("{field} out of range: {value}")]
    OutOfRangeInput { field: &'static str, value: f64 },

    #[error("degenerate input: {0}")]
    DegenerateInput(&'static str),

    #[error("invalid engine config: {0}")]
    InvalidConfig(String),

    #[error("telemetry engine already running")]
    AlreadyRunning,

    #[error("ticker task failed to join: {0}")]
    TaskJoin(String),
}
