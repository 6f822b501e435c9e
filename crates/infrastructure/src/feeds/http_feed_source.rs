use async_trait::async_trait;
use gatesync_application::ports::FeedSource;
use gatesync_domain::DomainError;
use std::time::Duration;
use tracing::debug;

use crate::USER_AGENT;

const FILE_SCHEME: &str = "file://";

/// Downloads feeds over HTTP(S); `file://` URLs are read from local disk.
pub struct HttpFeedSource {
    client: reqwest::Client,
}

impl HttpFeedSource {
    pub fn new(timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DomainError::InvalidConfig(format!("HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    async fn fetch_file(&self, url: &str, path: &str) -> Result<String, DomainError> {
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| DomainError::feed(url, format!("read error: {}", e)))
    }

    async fn fetch_http(&self, url: &str) -> Result<String, DomainError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::feed(url, format!("fetch error: {}", e)))?;

        if !response.status().is_success() {
            return Err(DomainError::feed(
                url,
                format!("HTTP {}", response.status().as_u16()),
            ));
        }

        response
            .text()
            .await
            .map_err(|e| DomainError::feed(url, format!("read error: {}", e)))
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self, url: &str) -> Result<String, DomainError> {
        let body = match url.strip_prefix(FILE_SCHEME) {
            Some(path) => self.fetch_file(url, path).await?,
            None => self.fetch_http(url).await?,
        };
        debug!(url = %url, bytes = body.len(), "Feed downloaded");
        Ok(body)
    }
}
