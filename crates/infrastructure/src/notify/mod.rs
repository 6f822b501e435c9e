mod log_notifier;
mod telegram;

pub use log_notifier::LogNotifier;
pub use telegram::TelegramNotifier;
