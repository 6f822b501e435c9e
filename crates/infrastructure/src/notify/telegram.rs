use async_trait::async_trait;
use gatesync_application::ports::Notifier;
use gatesync_domain::config::NotifierConfig;
use gatesync_domain::DomainError;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::USER_AGENT;

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: String,
    disable_web_page_preview: bool,
}

/// Telegram Bot API `sendMessage`. Delivery failures are logged and dropped.
pub struct TelegramNotifier {
    client: reqwest::Client,
    endpoint: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(config: &NotifierConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_secs(10))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DomainError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/bot{}/sendMessage",
                config.telegram_api_url.trim_end_matches('/'),
                config.telegram_bot_token
            ),
            chat_id: config.telegram_chat_id.clone(),
        })
    }

    async fn send(&self, text: String) -> Result<(), String> {
        let body = SendMessage {
            chat_id: &self.chat_id,
            text,
            disable_web_page_preview: true,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| e.without_url().to_string())?;

        if !response.status().is_success() {
            return Err(format!("HTTP {}", response.status().as_u16()));
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn notify(&self, message: &str, is_error: bool) {
        let text = if is_error {
            format!("[gatesync] ERROR\n{}", message)
        } else {
            format!("[gatesync]\n{}", message)
        };

        match self.send(text).await {
            Ok(()) => debug!(chat_id = %self.chat_id, "Telegram notification sent"),
            Err(e) => warn!(error = %e, "Telegram notification failed"),
        }
    }
}
