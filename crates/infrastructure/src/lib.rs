pub mod feeds;
pub mod gateway;
pub mod notify;

pub use feeds::HttpFeedSource;
pub use gateway::CloudflareGatewayClient;
pub use notify::{LogNotifier, TelegramNotifier};

pub(crate) const USER_AGENT: &str = concat!("gatesync/", env!("CARGO_PKG_VERSION"));
