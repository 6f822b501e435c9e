use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Feed fetch failed for {url}: {message}")]
    FeedFetch { url: String, message: String },

    /// A gateway API call failed after the client exhausted its own retries.
    /// `operation` names the remote call, e.g. `create_list "CGPS List - Chunk 3"`.
    #[error("Gateway operation {operation} failed: {message}")]
    Gateway { operation: String, message: String },

    #[error("Gateway list not found after creation: {0}")]
    GatewayListMissing(String),

    #[error("Configuration error: {0}")]
    InvalidConfig(String),
}

impl DomainError {
    pub fn gateway(operation: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::Gateway {
            operation: operation.into(),
            message: message.into(),
        }
    }

    pub fn feed(url: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::FeedFetch {
            url: url.into(),
            message: message.into(),
        }
    }
}
