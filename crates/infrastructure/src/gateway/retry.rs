use gatesync_domain::config::GatewayConfig;
use gatesync_domain::DomainError;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Retry schedule for gateway API calls.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the initial attempt.
    pub max_retries: usize,
    /// Delay before retry `n`; the last entry repeats.
    pub backoff: Vec<Duration>,
}

impl RetryPolicy {
    pub fn from_config(config: &GatewayConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            backoff: config
                .backoff_ms
                .iter()
                .map(|ms| Duration::from_millis(*ms))
                .collect(),
        }
    }

    fn backoff_for(&self, retry: usize) -> Duration {
        self.backoff
            .get(retry)
            .or_else(|| self.backoff.last())
            .copied()
            .unwrap_or(Duration::from_secs(1))
    }
}

/// Outcome of a single attempt that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptError {
    /// Rate limited, server side or network failure.
    Retryable(String),
    Fatal(String),
}

impl AttemptError {
    fn message(self) -> String {
        match self {
            AttemptError::Retryable(m) | AttemptError::Fatal(m) => m,
        }
    }
}

/// Runs `f` up to `1 + max_retries` times. Fatal errors and exhaustion are
/// reported as `DomainError::Gateway` tagged with `operation`.
pub async fn retry_with_backoff<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    mut f: F,
) -> Result<T, DomainError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AttemptError>>,
{
    let mut attempt = 0;
    loop {
        match f().await {
            Ok(value) => return Ok(value),
            Err(AttemptError::Retryable(message)) if attempt < policy.max_retries => {
                let delay = policy.backoff_for(attempt);
                attempt += 1;
                warn!(
                    operation = %operation,
                    attempt,
                    max_retries = policy.max_retries,
                    delay_ms = delay.as_millis() as u64,
                    error = %message,
                    "Gateway call failed, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(DomainError::gateway(operation, e.message())),
        }
    }
}
