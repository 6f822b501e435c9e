use crate::GatewaySyncJob;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub struct JobRunner {
    gateway_sync: Option<GatewaySyncJob>,
    shutdown: Option<CancellationToken>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            gateway_sync: None,
            shutdown: None,
        }
    }

    pub fn with_gateway_sync(mut self, job: GatewaySyncJob) -> Self {
        self.gateway_sync = Some(job);
        self
    }

    pub fn with_shutdown_token(mut self, token: CancellationToken) -> Self {
        self.shutdown = Some(token);
        self
    }

    /// Spawns every configured job and returns their handles. Jobs stop when
    /// the shutdown token is cancelled.
    pub async fn start(self) -> Vec<JoinHandle<()>> {
        info!("Starting background job runner");

        let mut handles = Vec::new();
        if let Some(job) = self.gateway_sync {
            let job = match self.shutdown {
                Some(token) => job.with_cancellation(token),
                None => job,
            };
            let job = Arc::new(job);
            handles.push(tokio::spawn(async move { job.start().await }));
        }

        info!(jobs = handles.len(), "All background jobs started");
        handles
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
