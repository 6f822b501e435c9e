use gatesync_application::use_cases::SyncGatewayUseCase;
use gatesync_domain::SyncRequest;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

const DEFAULT_INTERVAL_SECS: u64 = 86_400;

/// Periodic gateway sync.
///
/// Runs never overlap; a slow run delays the next tick. Cancellation is
/// observed between runs, not in the middle of one.
pub struct GatewaySyncJob {
    use_case: Arc<SyncGatewayUseCase>,
    request: SyncRequest,
    interval_secs: u64,
    run_at_start: bool,
    shutdown: CancellationToken,
}

impl GatewaySyncJob {
    pub fn new(use_case: Arc<SyncGatewayUseCase>, request: SyncRequest) -> Self {
        Self {
            use_case,
            request,
            interval_secs: DEFAULT_INTERVAL_SECS,
            run_at_start: true,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs.max(1);
        self
    }

    /// When false the first run waits one full interval.
    pub fn with_run_at_start(mut self, run_at_start: bool) -> Self {
        self.run_at_start = run_at_start;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(
            interval_secs = self.interval_secs,
            run_at_start = self.run_at_start,
            "Starting gateway sync job"
        );

        let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        if !self.run_at_start {
            interval.tick().await;
        }

        loop {
            tokio::select! {
                _ = self.shutdown.cancelled() => {
                    info!("GatewaySyncJob: shutting down");
                    break;
                }
                _ = interval.tick() => {
                    self.run_once().await;
                }
            }
        }
    }

    async fn run_once(&self) {
        info!("GatewaySyncJob: sync started");
        match self.use_case.execute(&self.request).await {
            Ok(report) => info!(
                applied = report.applied,
                summary = %report.summary(),
                "GatewaySyncJob: sync completed"
            ),
            Err(e) => error!(error = %e, "GatewaySyncJob: sync failed"),
        }
    }
}
