use async_trait::async_trait;
use gatesync_domain::{BlockRule, Domain, DomainError, GatewayList, GatewayRule};

/// CRUD over the remote list and rule objects.
///
/// Implementations own retry and backoff; an `Err` here means the call is
/// exhausted and the sync run must stop.
#[async_trait]
pub trait GatewayClient: Send + Sync {
    async fn list_lists(&self) -> Result<Vec<GatewayList>, DomainError>;

    async fn create_list(&self, name: &str, domains: &[Domain]) -> Result<GatewayList, DomainError>;

    async fn delete_list(&self, id: &str) -> Result<(), DomainError>;

    async fn list_rules(&self) -> Result<Vec<GatewayRule>, DomainError>;

    async fn create_rule(&self, rule: &BlockRule) -> Result<GatewayRule, DomainError>;

    async fn update_rule(&self, id: &str, rule: &BlockRule) -> Result<(), DomainError>;

    async fn delete_rule(&self, id: &str) -> Result<(), DomainError>;
}
