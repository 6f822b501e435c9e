pub mod errors;
pub mod feeds;
pub mod gateway;
pub mod logging;
pub mod notifier;
pub mod root;
pub mod sync;

pub use errors::ConfigError;
pub use feeds::FeedsConfig;
pub use gateway::GatewayConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use notifier::NotifierConfig;
pub use root::{CliOverrides, Config};
pub use sync::SyncConfig;
