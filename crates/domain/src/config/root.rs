use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::feeds::FeedsConfig;
use super::gateway::GatewayConfig;
use super::logging::LoggingConfig;
use super::notifier::NotifierConfig;
use super::sync::SyncConfig;
use crate::sync::SyncRequest;

const LOCAL_CONFIG_PATH: &str = "gatesync.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/gatesync/config.toml";

/// Main configuration structure for gatesync
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Gateway API account and credentials
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Allowlist and blocklist feed URLs
    #[serde(default)]
    pub feeds: FeedsConfig,

    /// Reconciliation limits and remote naming
    #[serde(default)]
    pub sync: SyncConfig,

    #[serde(default)]
    pub notifier: NotifierConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. gatesync.toml in current directory
    /// 3. /etc/gatesync/config.toml
    /// 4. Default configuration
    ///
    /// Command-line and environment overrides are applied on top.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::get_config_path() {
                Some(found) => Self::from_file(&found)?,
                None => Self::default(),
            },
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(account_id) = overrides.account_id {
            self.gateway.account_id = account_id;
        }
        if let Some(token) = overrides.api_token {
            self.gateway.api_token = token;
        }
        if let Some(token) = overrides.telegram_bot_token {
            self.notifier.telegram_bot_token = token;
        }
        if let Some(chat_id) = overrides.telegram_chat_id {
            self.notifier.telegram_chat_id = chat_id;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if overrides.dry_run {
            self.sync.dry_run = true;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sync = &self.sync;

        if sync.chunk_size == 0 {
            return Err(ConfigError::Validation(
                "sync.chunk_size must be at least 1".to_string(),
            ));
        }

        if sync.ceiling <= sync.chunk_size {
            return Err(ConfigError::Validation(format!(
                "sync.ceiling ({}) must be greater than sync.chunk_size ({})",
                sync.ceiling, sync.chunk_size
            )));
        }

        if sync.list_prefix.trim().is_empty() {
            return Err(ConfigError::Validation(
                "sync.list_prefix cannot be empty".to_string(),
            ));
        }

        if sync.rule_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "sync.rule_name cannot be empty".to_string(),
            ));
        }

        if self.feeds.blocklist_urls.is_empty() {
            return Err(ConfigError::Validation(
                "No blocklist feeds configured".to_string(),
            ));
        }

        for url in self
            .feeds
            .allowlist_urls
            .iter()
            .chain(&self.feeds.blocklist_urls)
        {
            validate_feed_url(url)?;
        }

        if !sync.dry_run {
            self.validate_credentials()?;
        }

        if self.notifier.telegram_enabled
            && (self.notifier.telegram_bot_token.is_empty()
                || self.notifier.telegram_chat_id.is_empty())
        {
            return Err(ConfigError::Validation(
                "Telegram notifications need both a bot token and a chat id".to_string(),
            ));
        }

        Ok(())
    }

    /// Gateway account and token, needed by anything that talks to the API.
    pub fn validate_credentials(&self) -> Result<(), ConfigError> {
        if self.gateway.account_id.is_empty() {
            return Err(ConfigError::Validation(
                "gateway.account_id is required".to_string(),
            ));
        }
        if self.gateway.api_token.is_empty() {
            return Err(ConfigError::Validation(
                "gateway.api_token is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|p| std::path::Path::new(p).exists())
            .map(str::to_string)
    }

    pub fn sync_request(&self) -> SyncRequest {
        let sync = &self.sync;
        SyncRequest {
            allowlist_urls: self.feeds.allowlist_urls.clone(),
            blocklist_urls: self.feeds.blocklist_urls.clone(),
            ceiling: sync.ceiling,
            chunk_size: sync.chunk_size,
            enable_sni: sync.enable_sni,
            list_prefix: sync.list_prefix.clone(),
            rule_name: sync.rule_name.clone(),
            sni_rule_suffix: sync.sni_rule_suffix.clone(),
            block_page_enabled: sync.block_page_enabled,
            dry_run: sync.dry_run,
        }
    }
}

fn validate_feed_url(url: &str) -> Result<(), ConfigError> {
    let supported = ["http://", "https://", "file://"];
    if supported.iter().any(|scheme| url.starts_with(scheme)) {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "Feed URL must start with http://, https:// or file://: {}",
            url
        )))
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub account_id: Option<String>,
    pub api_token: Option<String>,
    pub telegram_bot_token: Option<String>,
    pub telegram_chat_id: Option<String>,
    pub log_level: Option<String>,
    pub dry_run: bool,
}
