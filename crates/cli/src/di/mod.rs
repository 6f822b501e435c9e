use gatesync_application::ports::{FeedSource, GatewayClient, Notifier};
use gatesync_application::use_cases::{PurgeGatewayUseCase, SyncGatewayUseCase};
use gatesync_domain::Config;
use gatesync_infrastructure::{
    CloudflareGatewayClient, HttpFeedSource, LogNotifier, TelegramNotifier,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

pub struct Adapters {
    pub feeds: Arc<dyn FeedSource>,
    pub gateway: Arc<dyn GatewayClient>,
    pub notifier: Arc<dyn Notifier>,
}

impl Adapters {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let feeds = Arc::new(HttpFeedSource::new(Duration::from_secs(
            config.feeds.fetch_timeout_secs,
        ))?);
        let gateway = Arc::new(CloudflareGatewayClient::new(&config.gateway)?);

        let notifier: Arc<dyn Notifier> = if config.notifier.telegram_enabled {
            info!("Telegram notifications enabled");
            Arc::new(TelegramNotifier::new(&config.notifier)?)
        } else {
            Arc::new(LogNotifier)
        };

        Ok(Self {
            feeds,
            gateway,
            notifier,
        })
    }
}

pub struct UseCases {
    pub sync_gateway: Arc<SyncGatewayUseCase>,
    pub purge_gateway: Arc<PurgeGatewayUseCase>,
}

impl UseCases {
    pub fn new(adapters: &Adapters) -> Self {
        Self {
            sync_gateway: Arc::new(SyncGatewayUseCase::new(
                adapters.feeds.clone(),
                adapters.gateway.clone(),
                adapters.notifier.clone(),
            )),
            purge_gateway: Arc::new(PurgeGatewayUseCase::new(adapters.gateway.clone())),
        }
    }
}
