use gatesync_domain::{DomainError, SyncRequest};
use std::sync::Arc;
use tracing::{info, instrument};

use super::cleanup::{delete_lists_prefixed, delete_rules_named};
use crate::ports::GatewayClient;

/// Removes every rule and list a sync run would own.
pub struct PurgeGatewayUseCase {
    gateway: Arc<dyn GatewayClient>,
}

impl PurgeGatewayUseCase {
    pub fn new(gateway: Arc<dyn GatewayClient>) -> Self {
        Self { gateway }
    }

    /// Returns `(rules_deleted, lists_deleted)`. Rules go first since they
    /// reference the lists.
    #[instrument(skip(self, request))]
    pub async fn execute(&self, request: &SyncRequest) -> Result<(usize, usize), DomainError> {
        let gateway = self.gateway.as_ref();
        let rules = delete_rules_named(gateway, &request.managed_rule_names()).await?;
        let lists = delete_lists_prefixed(gateway, &request.list_prefix).await?;

        info!(rules, lists, prefix = %request.list_prefix, "Gateway purged");
        Ok((rules, lists))
    }
}
