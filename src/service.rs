//! Service layer driving the periodic dashboard tick.
//!
//! One task owns the dashboard and the sample source. Each tick draws a
//! sample per channel, updates its display surface, appends to its series
//! and redraws its chart, all from the same in-memory value. The service
//! runs headless here; the interactive loop lives in [`crate::ui`].

use std::time::Duration;

use chrono::Local;
use futures_util::StreamExt;
use signal_hook::consts::signal::{SIGINT, SIGTERM};
use signal_hook_tokio::Signals;
use tokio::task::JoinHandle;
use tokio::time::{Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::config::AppConfig;
use crate::dashboard::{Dashboard, TickReport};
use crate::error::{Result, ServiceError};
use crate::publisher::Publisher;
use crate::sensors::{RandomSource, SampleSource};

/// Service state for the dashboard and its sample source
pub struct DashboardService {
    dashboard: Dashboard,
    source: Box<dyn SampleSource>,
    publisher: Box<dyn Publisher>,
    period: Duration,
}

impl DashboardService {
    pub fn new(
        config: &AppConfig,
        source: Box<dyn SampleSource>,
        publisher: Box<dyn Publisher>,
    ) -> Result<Self> {
        if config.service.update_interval_ms == 0 {
            return Err(ServiceError::InitializationError(
                "update interval must be greater than 0".to_string(),
            )
            .into());
        }

        let dashboard = Dashboard::from_config(config)?;
        Ok(Self {
            dashboard,
            source,
            publisher,
            period: Duration::from_millis(config.service.update_interval_ms),
        })
    }

    /// Service with a random source seeded from the configuration
    pub fn from_config(config: &AppConfig, publisher: Box<dyn Publisher>) -> Result<Self> {
        if let Some(seed) = config.service.seed {
            tracing::info!(seed, "Using seeded sample source");
        }
        let source = Box::new(RandomSource::new(config.service.seed));
        Self::new(config, source, publisher)
    }

    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    pub fn dashboard_mut(&mut self) -> &mut Dashboard {
        &mut self.dashboard
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Advance the dashboard by one tick and publish the readings.
    ///
    /// Publish failures are logged; they never stop the dashboard.
    pub fn tick(&mut self) -> Result<TickReport> {
        let report = self.dashboard.tick(Local::now(), self.source.as_mut())?;
        if let Err(e) = self.publisher.publish(&report) {
            tracing::error!(tick = report.tick, "Failed to publish readings: {}", e);
        }
        Ok(report)
    }

    /// Run headless until cancelled, or until `max_ticks` ticks have run
    pub async fn run_daemon(
        &mut self,
        cancel: &CancellationToken,
        max_ticks: Option<u64>,
    ) -> Result<()> {
        tracing::info!(
            period_ms = self.period.as_millis() as u64,
            channels = self.dashboard.channels().len(),
            "Starting dashboard service in daemon mode"
        );

        let mut ticker = ticker(self.period);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let report = self.tick()?;
                    tracing::debug!(tick = report.tick, "Tick complete");
                    if max_ticks.is_some_and(|max| report.tick >= max) {
                        break;
                    }
                }
            }
        }

        tracing::info!(ticks = self.dashboard.tick_count(), "Dashboard service stopped");
        Ok(())
    }
}

/// Periodic timer whose first tick completes immediately
pub fn ticker(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    interval
}

/// Cancel `cancel` on SIGINT or SIGTERM
pub fn spawn_signal_handler(cancel: CancellationToken) -> Result<JoinHandle<()>> {
    let mut signals = Signals::new([SIGINT, SIGTERM])
        .map_err(|e| ServiceError::SignalError(e.to_string()))?;
    let handle = signals.handle();

    Ok(tokio::spawn(async move {
        tokio::select! {
            Some(signal) = signals.next() => {
                tracing::info!(signal, "Received shutdown signal");
                cancel.cancel();
            }
            _ = cancel.cancelled() => {}
        }
        handle.close();
    }))
}
