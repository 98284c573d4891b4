//! Periodic clock and forecast refresh.
//!
//! Two independent tokio tasks write into the [`StateStore`]: a fast clock
//! that publishes the formatted local time, and a slow refresh that runs the
//! fetch-map-publish cycle. A slow provider never delays the clock.
//!
//! A failed cycle is logged and the next attempt happens on the next regular
//! tick. There is no retry or backoff.

use std::{
    sync::{Arc, Mutex, PoisonError},
    time::Duration,
};

use chrono::{Local, NaiveDateTime};
use tokio::{
    runtime::{Handle, TryCurrentError},
    sync::watch,
    task::JoinHandle,
    time::{Instant, MissedTickBehavior, interval_at},
};
use tracing::{debug, info, warn};

use crate::{
    config::ConfigSource,
    error::RefreshError,
    mapper::map_forecast,
    model::ForecastRequest,
    provider::ForecastProvider,
    store::StateStore,
};

/// Clock text format, e.g. `Sun, Jun 30  10:55:29 PM`.
pub const CLOCK_FORMAT: &str = "%a, %b %-d  %-I:%M:%S %p";

pub fn format_clock(now: NaiveDateTime) -> String {
    now.format(CLOCK_FORMAT).to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerTimings {
    pub clock_initial_delay: Duration,
    pub clock_period: Duration,
    pub refresh_initial_delay: Duration,
    pub refresh_period: Duration,
    /// Upper bound for a single provider call.
    pub fetch_timeout: Duration,
}

impl Default for SchedulerTimings {
    fn default() -> Self {
        Self {
            clock_initial_delay: Duration::from_millis(100),
            clock_period: Duration::from_millis(500),
            refresh_initial_delay: Duration::from_millis(100),
            refresh_period: Duration::from_secs(5 * 60),
            fetch_timeout: Duration::from_secs(60),
        }
    }
}

struct Inner {
    provider: Arc<dyn ForecastProvider>,
    config: Arc<dyn ConfigSource>,
    store: StateStore,
    timings: SchedulerTimings,
}

struct Running {
    shutdown: watch::Sender<bool>,
    clock: JoinHandle<()>,
    refresh: JoinHandle<()>,
}

/// Owns the clock and refresh tasks.
///
/// Dropping the scheduler without calling [`stop`](Self::stop) also ends both
/// tasks, since their shutdown channel closes.
pub struct RefreshScheduler {
    inner: Arc<Inner>,
    running: Mutex<Option<Running>>,
}

impl RefreshScheduler {
    pub fn new(
        provider: Arc<dyn ForecastProvider>,
        config: Arc<dyn ConfigSource>,
        store: StateStore,
    ) -> Self {
        Self::with_timings(provider, config, store, SchedulerTimings::default())
    }

    pub fn with_timings(
        provider: Arc<dyn ForecastProvider>,
        config: Arc<dyn ConfigSource>,
        store: StateStore,
        timings: SchedulerTimings,
    ) -> Self {
        Self {
            inner: Arc::new(Inner { provider, config, store, timings }),
            running: Mutex::new(None),
        }
    }

    pub fn store(&self) -> &StateStore {
        &self.inner.store
    }

    pub fn is_running(&self) -> bool {
        self.running.lock().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    /// Spawn the clock and refresh tasks on the current tokio runtime.
    ///
    /// Does nothing if they are already running. Fails when called outside a
    /// tokio runtime.
    pub fn start(&self) -> Result<(), TryCurrentError> {
        let mut running = self.running.lock().unwrap_or_else(PoisonError::into_inner);
        if running.is_some() {
            debug!("Scheduler already running");
            return Ok(());
        }

        let runtime = Handle::try_current()?;
        let (shutdown, shutdown_rx) = watch::channel(false);
        let clock = runtime.spawn(run_clock(self.inner.clone(), shutdown_rx.clone()));
        let refresh = runtime.spawn(run_refresh(self.inner.clone(), shutdown_rx));

        info!(
            clock_period = ?self.inner.timings.clock_period,
            refresh_period = ?self.inner.timings.refresh_period,
            "Scheduler started"
        );

        *running = Some(Running { shutdown, clock, refresh });
        Ok(())
    }

    /// Stop both tasks and wait for them to finish. Safe to call repeatedly.
    ///
    /// An in-flight refresh is abandoned without publishing.
    pub async fn stop(&self) {
        let running = self.running.lock().unwrap_or_else(PoisonError::into_inner).take();
        let Some(running) = running else {
            return;
        };

        running.shutdown.send_replace(true);
        for (name, handle) in [("clock", running.clock), ("refresh", running.refresh)] {
            if let Err(e) = handle.await {
                warn!(task = name, error = %e, "Scheduler task ended abnormally");
            }
        }

        info!("Scheduler stopped");
    }

    /// Run one fetch-map-publish cycle now.
    ///
    /// On error the store is left exactly as it was.
    pub async fn refresh_once(&self) -> Result<(), RefreshError> {
        self.inner.refresh_once().await
    }
}

impl Inner {
    async fn refresh_once(&self) -> Result<(), RefreshError> {
        let config = self.config.load().map_err(RefreshError::Config)?;
        let request = ForecastRequest::from_config(&config).map_err(RefreshError::Config)?;

        let timeout = self.timings.fetch_timeout;
        let raw = tokio::time::timeout(timeout, self.provider.fetch(&request))
            .await
            .map_err(|_| RefreshError::Timeout(timeout))??;

        let mapped = map_forecast(&raw, self.store.slot_indices())?;

        // One hand-off per cycle: consumers never see a partial update.
        self.store.weather().update(|snapshot| mapped.apply(snapshot));

        info!(
            summary = %mapped.current.summary,
            slots = mapped.slots.len(),
            "Forecast refreshed"
        );
        Ok(())
    }
}

async fn run_clock(inner: Arc<Inner>, mut shutdown: watch::Receiver<bool>) {
    let timings = inner.timings;
    let mut ticker = interval_at(Instant::now() + timings.clock_initial_delay, timings.clock_period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            _ = ticker.tick() => {
                let text = format_clock(Local::now().naive_local());
                inner.store.current_time_text().set(text);
            }
        }
    }
}

async fn run_refresh(inner: Arc<Inner>, mut shutdown: watch::Receiver<bool>) {
    let timings = inner.timings;
    let mut ticker =
        interval_at(Instant::now() + timings.refresh_initial_delay, timings.refresh_period);
    // A cycle that overruns its period pushes the next one back instead of
    // firing a burst, so cycles never overlap.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            _ = ticker.tick() => {}
        }

        tokio::select! {
            _ = shutdown.changed() => break,
            result = inner.refresh_once() => {
                if let Err(e) = result {
                    warn!(error = %e, "Forecast refresh failed, keeping previous data");
                }
            }
        }
    }
}
