pub mod alert;
pub mod display;
pub mod engine;
pub mod error;
pub mod sensors;
pub mod trend;
mod utils;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

pub use alert::{classify, AlertInfo, AlertLevel};
pub use display::ConsoleDisplay;
pub use engine::{EngineConfig, EngineStatus, TelemetryEngine, TelemetrySnapshot};
pub use error::{TelemetryError, TelemetryResult};
pub use sensors::{ReadingGenerator, SensorReading, WeatherReading};
pub use trend::{TrendSample, TrendWindow};

/// Runs the engine with the console display until Ctrl-C.
pub fn run() -> Result<()> {
    // Reads RUST_LOG, info by default
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("SafeSlope starting up...");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;

    runtime.block_on(async {
        let config = EngineConfig::from_env();
        let engine = TelemetryEngine::new(config).context("invalid engine configuration")?;

        let cancel_token = CancellationToken::new();
        let display = tokio::spawn(ConsoleDisplay::new(engine.clone()).run(cancel_token.clone()));

        engine.start().await.context("failed to start telemetry engine")?;

        tokio::signal::ctrl_c()
            .await
            .context("failed to listen for shutdown signal")?;
        log::info!("shutdown requested");

        cancel_token.cancel();
        engine.stop().await.context("failed to stop telemetry engine")?;
        display.await.context("console display task failed to join")?;

        Ok::<(), anyhow::Error>(())
    })
}
