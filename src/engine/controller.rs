use std::{sync::Arc, time::Duration};

use chrono::Utc;
use tokio::{
    sync::{watch, Mutex},
    task::JoinHandle,
    time::{self, Instant, MissedTickBehavior},
};
use tokio_util::sync::CancellationToken;

use crate::alert::AlertLevel;
use crate::error::{TelemetryError, TelemetryResult};
use crate::{log_debug, log_info, log_warn};

use super::config::EngineConfig;
use super::snapshot::TelemetrySnapshot;
use super::state::{EngineState, EngineStatus, FastTick};

const ENABLE_LOGS: bool = true;

/// Owns the sensor state and the two tickers that advance it.
///
/// Readers never touch the state lock: every mutation publishes a fresh
/// [`TelemetrySnapshot`] on a watch channel, and `current_snapshot` clones the latest.
#[derive(Clone)]
pub struct TelemetryEngine {
    state: Arc<Mutex<EngineState>>,
    snapshot_tx: Arc<watch::Sender<TelemetrySnapshot>>,
    snapshot_rx: watch::Receiver<TelemetrySnapshot>,
    tickers: Arc<Mutex<Option<Tickers>>>,
    fast_tick: Duration,
    slow_tick: Duration,
    heartbeat_every_ticks: u32,
}

impl TelemetryEngine {
    pub fn new(config: EngineConfig) -> TelemetryResult<Self> {
        let state = EngineState::new(&config, Utc::now())?;
        let (snapshot_tx, snapshot_rx) = watch::channel(state.snapshot());

        Ok(Self {
            state: Arc::new(Mutex::new(state)),
            snapshot_tx: Arc::new(snapshot_tx),
            snapshot_rx,
            tickers: Arc::new(Mutex::new(None)),
            fast_tick: config.fast_tick,
            slow_tick: config.slow_tick,
            heartbeat_every_ticks: config.heartbeat_every_ticks,
        })
    }

    /// Latest published snapshot. Never waits on a tick in progress.
    pub fn current_snapshot(&self) -> TelemetrySnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Receiver that wakes on every publication.
    pub fn subscribe(&self) -> watch::Receiver<TelemetrySnapshot> {
        self.snapshot_tx.subscribe()
    }

    pub async fn status(&self) -> EngineStatus {
        self.state.lock().await.status
    }

    /// Spawns both tickers. A stopped engine resumes from the state it stopped with.
    pub async fn start(&self) -> TelemetryResult<TelemetrySnapshot> {
        let mut tickers_guard = self.tickers.lock().await;

        {
            let mut state = self.state.lock().await;
            if state.status == EngineStatus::Running {
                return Err(TelemetryError::AlreadyRunning);
            }
            state.status = EngineStatus::Running;
        }

        *tickers_guard = Some(self.spawn_tickers());

        let snapshot = self.current_snapshot();
        log_info!(
            "telemetry engine started (fast every {:?}, trend every {:?}), alert level {:?}",
            self.fast_tick,
            self.slow_tick,
            snapshot.alert_level
        );
        Ok(snapshot)
    }

    /// Cancels both tickers and waits for them to exit. No-op when not running.
    pub async fn stop(&self) -> TelemetryResult<()> {
        let mut tickers_guard = self.tickers.lock().await;
        let Some(tickers) = tickers_guard.take() else {
            return Ok(());
        };

        self.state.lock().await.status = EngineStatus::Stopped;

        tickers.shutdown().await?;
        log_info!("telemetry engine stopped");
        Ok(())
    }

    fn spawn_tickers(&self) -> Tickers {
        let cancel_token = CancellationToken::new();

        let fast = tokio::spawn(fast_ticker(
            self.state.clone(),
            self.snapshot_tx.clone(),
            self.fast_tick,
            self.heartbeat_every_ticks,
            cancel_token.clone(),
        ));
        let slow = tokio::spawn(slow_ticker(
            self.state.clone(),
            self.snapshot_tx.clone(),
            self.slow_tick,
            cancel_token.clone(),
        ));

        Tickers {
            cancel_token,
            handles: vec![fast, slow],
        }
    }
}

/// Running ticker tasks. Dropping this without `shutdown` still cancels and aborts
/// them, so an engine dropped while running releases its timers.
struct Tickers {
    cancel_token: CancellationToken,
    handles: Vec<JoinHandle<()>>,
}

impl Tickers {
    async fn shutdown(mut self) -> TelemetryResult<()> {
        self.cancel_token.cancel();
        for handle in self.handles.drain(..) {
            handle
                .await
                .map_err(|err| TelemetryError::TaskJoin(err.to_string()))?;
        }
        Ok(())
    }
}

impl Drop for Tickers {
    fn drop(&mut self) {
        self.cancel_token.cancel();
        for handle in &self.handles {
            handle.abort();
        }
    }
}

/// First tick fires one full period after start, not immediately.
fn periodic(period: Duration) -> time::Interval {
    let mut ticker = time::interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

async fn fast_ticker(
    state: Arc<Mutex<EngineState>>,
    snapshot_tx: Arc<watch::Sender<TelemetrySnapshot>>,
    period: Duration,
    heartbeat_every: u32,
    cancel_token: CancellationToken,
) {
    let mut ticker = periodic(period);

    loop {
        tokio::select! {
            biased;
            _ = cancel_token.cancelled() => break,
            _ = ticker.tick() => {
                let mut guard = state.lock().await;
                match guard.apply_fast_tick(Utc::now()) {
                    FastTick::Applied { previous_level, level } => {
                        if level != previous_level {
                            log_level_change(previous_level, level, guard.reading().slope_movement);
                        }
                    }
                    FastTick::Discarded(err) => {
                        log_warn!("discarding generated reading, keeping last good one: {err}");
                        continue;
                    }
                }

                if guard.fast_ticks % u64::from(heartbeat_every) == 0 {
                    log_debug!(
                        "heartbeat: {} fast ticks, slope movement {:.2} mm, alert {:?}",
                        guard.fast_ticks,
                        guard.reading().slope_movement,
                        guard.alert_level()
                    );
                }

                // Published under the lock so sequence numbers reach readers in order.
                snapshot_tx.send_replace(guard.snapshot());
            }
        }
    }

    log_debug!("fast ticker shutting down");
}

async fn slow_ticker(
    state: Arc<Mutex<EngineState>>,
    snapshot_tx: Arc<watch::Sender<TelemetrySnapshot>>,
    period: Duration,
    cancel_token: CancellationToken,
) {
    let mut ticker = periodic(period);

    loop {
        tokio::select! {
            biased;
            _ = cancel_token.cancelled() => break,
            _ = ticker.tick() => {
                let mut guard = state.lock().await;
                guard.apply_slow_tick(Utc::now());
                if let Some(sample) = guard.window().latest() {
                    log_debug!("trend sample captured at {}: {:.2} mm", sample.time_label(), sample.movement);
                }
                snapshot_tx.send_replace(guard.snapshot());
            }
        }
    }

    log_debug!("slow ticker shutting down");
}

fn log_level_change(previous: AlertLevel, level: AlertLevel, slope_movement: f64) {
    if level == AlertLevel::Critical {
        log_warn!(
            "alert level {:?} -> {:?}: {} ({:.1} mm)",
            previous,
            level,
            level.info().description,
            slope_movement
        );
    } else {
        log_info!(
            "alert level {:?} -> {:?} ({:.1} mm)",
            previous,
            level,
            slope_movement
        );
    }
}
