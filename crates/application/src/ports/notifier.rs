use async_trait::async_trait;

/// Best-effort operator notification. Delivery failures are the
/// implementation's problem and never reach the caller.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, message: &str, is_error: bool);
}
