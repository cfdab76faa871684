use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use lexio_types::{AppError, HealthState, HealthStatus};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

const ADVISORY_MESSAGE: &str = "AI examples may be delayed or unavailable.";

/// One bounded-time availability probe against the enrichment backend,
/// resolving to the status string the backend reported.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn probe(&self) -> Result<String, AppError>;
}

/// Process-wide tri-state availability signal for the enrichment backend.
///
/// Unconfigured (`probe` absent) means `Unavailable` for the life of the
/// process: no probe is ever issued and `refresh` is a no-op. Configured
/// starts `Degraded` until the first check says otherwise.
#[derive(Clone)]
pub struct HealthMonitor {
    probe: Option<Arc<dyn HealthProbe>>,
    probe_timeout: Duration,
    status: Arc<RwLock<HealthStatus>>,
    epoch: Arc<AtomicU64>,
}

impl HealthMonitor {
    pub fn new(probe: Option<Arc<dyn HealthProbe>>, probe_timeout: Duration) -> Self {
        let initial = if probe.is_some() {
            HealthStatus::unchecked()
        } else {
            HealthStatus::unavailable()
        };

        Self {
            probe,
            probe_timeout,
            status: Arc::new(RwLock::new(initial)),
            epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn status(&self) -> HealthStatus {
        self.status.read().await.clone()
    }

    /// Run one check now. Checks race by epoch: a check started before a
    /// newer one discards its result instead of overwriting a later state.
    pub async fn check(&self) {
        let Some(probe) = &self.probe else {
            return;
        };

        let ticket = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;

        let state = match tokio::time::timeout(self.probe_timeout, probe.probe()).await {
            Ok(Ok(reported)) if reported == "ok" || reported == "healthy" => HealthState::Healthy,
            Ok(Ok(reported)) => {
                tracing::warn!("enrichment backend reported status {reported:?}");
                HealthState::Degraded
            }
            Ok(Err(error)) => {
                tracing::warn!("enrichment health probe failed: {error}");
                HealthState::Degraded
            }
            Err(_) => {
                tracing::warn!("enrichment health probe timed out");
                HealthState::Degraded
            }
        };

        // The staleness comparison must happen under the write lock: writers
        // are serialized by it, so a newer check's epoch bump is always
        // visible here before this one can touch the state.
        let mut status = self.status.write().await;
        if self.epoch.load(Ordering::SeqCst) != ticket {
            tracing::debug!("discarding superseded health check");
            return;
        }

        status.state = state;
        status.last_checked_at = Some(SystemTime::now());
        status.error_message =
            (state == HealthState::Degraded).then(|| ADVISORY_MESSAGE.to_string());
    }

    /// Request one additional check. Idempotent, safe while a check is in
    /// flight, and a no-op while unconfigured.
    pub fn refresh(&self) {
        if self.probe.is_none() {
            return;
        }

        let monitor = self.clone();
        tokio::spawn(async move {
            monitor.check().await;
        });
    }

    /// Poll on an interval until cancelled. Returns immediately while
    /// unconfigured.
    pub async fn run(self, interval: Duration, cancel: CancellationToken) {
        if self.probe.is_none() {
            return;
        }

        let mut ticker = tokio::time::interval(interval);
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("health monitor stopping");
                    break;
                }
                _ = ticker.tick() => self.check().await,
            }
        }
    }
}
