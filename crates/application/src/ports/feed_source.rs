use async_trait::async_trait;
use gatesync_domain::DomainError;

/// Raw feed download. Fails with `DomainError::FeedFetch` on non-success.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, DomainError>;
}
