pub mod config;
pub mod controller;
pub mod snapshot;
pub mod state;

pub use config::EngineConfig;
pub use controller::TelemetryEngine;
pub use snapshot::TelemetrySnapshot;
pub use state::{EngineState, EngineStatus};
