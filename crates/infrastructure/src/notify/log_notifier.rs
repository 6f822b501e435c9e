use async_trait::async_trait;
use gatesync_application::ports::Notifier;
use tracing::{error, info};

/// Sends notifications to the log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, message: &str, is_error: bool) {
        if is_error {
            error!(notification = %message, "Sync notification");
        } else {
            info!(notification = %message, "Sync notification");
        }
    }
}
