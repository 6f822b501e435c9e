mod feed_source;
mod gateway_client;
mod notifier;

pub use feed_source::FeedSource;
pub use gateway_client::GatewayClient;
pub use notifier::Notifier;
