use crate::ports::GatewayClient;
use gatesync_domain::DomainError;
use tracing::info;

pub(crate) async fn delete_rules_named(
    gateway: &dyn GatewayClient,
    names: &[String],
) -> Result<usize, DomainError> {
    let mut deleted = 0;
    for rule in gateway.list_rules().await? {
        if names.iter().any(|n| *n == rule.name) {
            gateway.delete_rule(&rule.id).await?;
            info!(rule = %rule.name, id = %rule.id, "Deleted gateway rule");
            deleted += 1;
        }
    }
    Ok(deleted)
}

pub(crate) async fn delete_lists_prefixed(
    gateway: &dyn GatewayClient,
    prefix: &str,
) -> Result<usize, DomainError> {
    let mut deleted = 0;
    for list in gateway.list_lists().await? {
        if list.name.starts_with(prefix) {
            gateway.delete_list(&list.id).await?;
            info!(list = %list.name, id = %list.id, "Deleted gateway list");
            deleted += 1;
        }
    }
    Ok(deleted)
}
