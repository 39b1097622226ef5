use std::sync::{Arc, RwLock};
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use dioxus_logger::tracing;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{
    model::cloudnet::CloudNetStatusDto,
    server::{error::AppError, service::cloudnet::CloudNetClient},
};

/// Seconds between scheduled probes.
const PROBE_INTERVAL_SECONDS: u64 = 10;

const DISABLED_MESSAGE: &str = "CloudNet integration is disabled";

/// The shared record of whether CloudNet is currently reachable.
///
/// Overwritten wholesale on every probe; `enabled == false` implies
/// `connected == false` with `last_error` explaining the disablement rather
/// than a network fault.
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectivityState {
    pub connected: bool,
    pub enabled: bool,
    pub last_check: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

impl ConnectivityState {
    fn initial(enabled: bool) -> Self {
        Self {
            connected: false,
            enabled,
            last_check: None,
            last_error: (!enabled).then(|| DISABLED_MESSAGE.to_string()),
        }
    }
}

impl From<ConnectivityState> for CloudNetStatusDto {
    fn from(state: ConnectivityState) -> Self {
        Self {
            connected: state.connected,
            enabled: state.enabled,
            last_check: state.last_check,
            last_error: state.last_error,
        }
    }
}

/// Single source of truth for CloudNet reachability.
///
/// State transitions happen only inside [`probe`](Self::probe); every other
/// component reads the most recently *completed* probe result through
/// [`state`](Self::state). The periodic probe is an explicit lifecycle:
/// nothing runs until [`start`](Self::start) and [`stop`](Self::stop)
/// shuts the scheduler down again, so tests can drive probes manually.
pub struct ConnectivityMonitor {
    client: Arc<CloudNetClient>,
    state: RwLock<ConnectivityState>,
    scheduler: Mutex<Option<JobScheduler>>,
    interval: StdDuration,
}

impl ConnectivityMonitor {
    pub fn new(client: Arc<CloudNetClient>) -> Self {
        Self::with_interval(client, StdDuration::from_secs(PROBE_INTERVAL_SECONDS))
    }

    pub fn with_interval(client: Arc<CloudNetClient>, interval: StdDuration) -> Self {
        let enabled = client.enabled();
        Self {
            client,
            state: RwLock::new(ConnectivityState::initial(enabled)),
            scheduler: Mutex::new(None),
            interval,
        }
    }

    /// Synchronous read of the current connectivity state. Never probes.
    pub fn state(&self) -> ConnectivityState {
        self.state.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Runs one probe and returns whether CloudNet is reachable.
    ///
    /// With integration disabled this records the disabled state without any
    /// network call. Otherwise it issues a health request through the
    /// upstream client and overwrites the state with the outcome. Overlapping
    /// probes are tolerated; the state reflects whichever probe completed
    /// last.
    pub async fn probe(&self) -> bool {
        if !self.client.enabled() {
            self.store(ConnectivityState {
                connected: false,
                enabled: false,
                last_check: Some(Utc::now()),
                last_error: Some(DISABLED_MESSAGE.to_string()),
            });
            return false;
        }

        match self.client.health().await {
            Ok(()) => {
                self.store(ConnectivityState {
                    connected: true,
                    enabled: true,
                    last_check: Some(Utc::now()),
                    last_error: None,
                });
                true
            }
            Err(err) => {
                tracing::warn!("CloudNet health probe failed: {}", err);
                self.store(ConnectivityState {
                    connected: false,
                    enabled: true,
                    last_check: Some(Utc::now()),
                    last_error: Some(err.to_string()),
                });
                false
            }
        }
    }

    /// Returns the connectivity verdict, probing first when the last probe
    /// is missing or older than the probe interval.
    ///
    /// Used by the fallback gateway so a request never acts on state staler
    /// than one scheduled interval.
    pub async fn probe_if_stale(&self) -> bool {
        let state = self.state();
        let stale = match state.last_check {
            Some(checked) => {
                Utc::now() - checked > Duration::from_std(self.interval).unwrap_or(Duration::MAX)
            }
            None => true,
        };

        if stale {
            self.probe().await
        } else {
            state.connected
        }
    }

    /// Starts the periodic probe job. Idempotent: a second call while
    /// running is a no-op.
    pub async fn start(self: Arc<Self>) -> Result<(), AppError> {
        let mut guard = self.scheduler.lock().await;
        if guard.is_some() {
            return Ok(());
        }

        let scheduler = JobScheduler::new().await?;

        let monitor = Arc::clone(&self);
        let schedule = format!("*/{} * * * * *", PROBE_INTERVAL_SECONDS);
        let job = Job::new_async(schedule.as_str(), move |_uuid, _lock| {
            let monitor = Arc::clone(&monitor);
            Box::pin(async move {
                monitor.probe().await;
            })
        })?;

        scheduler.add(job).await?;
        scheduler.start().await?;
        *guard = Some(scheduler);

        tracing::info!(
            "CloudNet connectivity monitor started (every {}s)",
            PROBE_INTERVAL_SECONDS
        );

        Ok(())
    }

    /// Stops the periodic probe job and clears the scheduler.
    pub async fn stop(&self) -> Result<(), AppError> {
        let mut guard = self.scheduler.lock().await;
        if let Some(mut scheduler) = guard.take() {
            scheduler.shutdown().await?;
            tracing::info!("CloudNet connectivity monitor stopped");
        }
        Ok(())
    }

    fn store(&self, state: ConnectivityState) {
        *self.state.write().unwrap_or_else(|e| e.into_inner()) = state;
    }
}
