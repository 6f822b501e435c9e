use gatesync_domain::{
    build_expression, partition, reconcile, BlockRule, DomainError, HierarchyIndex, ListChunk,
    MatchField, SyncReport, SyncRequest,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use super::cleanup::{delete_lists_prefixed, delete_rules_named};
use super::feeds::{feed_domains, fetch_feeds};
use crate::ports::{FeedSource, GatewayClient, Notifier};

/// Feed download, reconciliation and the remote replace cycle for one run.
pub struct SyncGatewayUseCase {
    feeds: Arc<dyn FeedSource>,
    gateway: Arc<dyn GatewayClient>,
    notifier: Arc<dyn Notifier>,
}

impl SyncGatewayUseCase {
    pub fn new(
        feeds: Arc<dyn FeedSource>,
        gateway: Arc<dyn GatewayClient>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            feeds,
            gateway,
            notifier,
        }
    }

    #[instrument(skip(self, request), fields(dry_run = request.dry_run))]
    pub async fn execute(&self, request: &SyncRequest) -> Result<SyncReport, DomainError> {
        match self.run(request).await {
            Ok(report) => {
                self.notifier.notify(&success_message(&report, request), false).await;
                Ok(report)
            }
            Err(e) => {
                error!(error = %e, "Gateway sync failed");
                self.notifier
                    .notify(&format!("Gateway sync failed: {}", e), true)
                    .await;
                Err(e)
            }
        }
    }

    async fn run(&self, request: &SyncRequest) -> Result<SyncReport, DomainError> {
        let (allow_bodies, block_bodies) = tokio::try_join!(
            fetch_feeds(self.feeds.as_ref(), &request.allowlist_urls),
            fetch_feeds(self.feeds.as_ref(), &request.blocklist_urls),
        )?;

        let allow: HierarchyIndex = feed_domains(&allow_bodies, true).collect();
        info!(allowlisted = allow.len(), "Allowlist index built");

        let reconciliation = reconcile(
            &allow,
            feed_domains(&block_bodies, false),
            request.ceiling,
            request.chunk_size,
        );
        let stats = reconciliation.stats;
        info!(
            processed = stats.processed,
            allowed = stats.allowed,
            duplicate = stats.duplicate,
            dropped = stats.dropped(),
            final_blocked = stats.final_blocked,
            "Reconciliation complete"
        );

        if reconciliation.domains.is_empty() {
            warn!("No domains left to block, skipping gateway update");
            return Ok(SyncReport {
                stats,
                final_block_count: 0,
                chunk_count: 0,
                applied: false,
            });
        }

        let chunks = partition(
            &reconciliation.domains,
            request.chunk_size,
            &request.list_prefix,
        );
        let mut report = SyncReport {
            stats,
            final_block_count: reconciliation.domains.len(),
            chunk_count: chunks.len(),
            applied: false,
        };

        if request.dry_run {
            info!(chunks = chunks.len(), "Dry run, gateway left untouched");
            return Ok(report);
        }

        let gateway = self.gateway.as_ref();
        delete_rules_named(gateway, &request.managed_rule_names()).await?;
        delete_lists_prefixed(gateway, &request.list_prefix).await?;

        self.create_lists(&chunks).await?;
        let list_ids = self.resolve_list_ids(&chunks).await?;

        self.upsert_rule(BlockRule {
            name: request.dns_rule_name().to_string(),
            expression: build_expression(&list_ids, MatchField::DnsDomains),
            field: MatchField::DnsDomains,
            block_page_enabled: request.block_page_enabled,
        })
        .await?;

        if request.enable_sni {
            self.upsert_rule(BlockRule {
                name: request.sni_rule_name(),
                expression: build_expression(&list_ids, MatchField::SniDomains),
                field: MatchField::SniDomains,
                block_page_enabled: request.block_page_enabled,
            })
            .await?;
        }

        report.applied = true;
        info!(summary = %report.summary(), "Gateway sync applied");
        Ok(report)
    }

    /// One list per chunk, strictly in chunk order. A failure on chunk `k`
    /// leaves chunks `1..k` committed remotely.
    async fn create_lists(&self, chunks: &[ListChunk]) -> Result<(), DomainError> {
        let total = chunks.len();
        for chunk in chunks {
            let list = self.gateway.create_list(&chunk.name, &chunk.domains).await?;
            info!(
                list = %chunk.name,
                id = %list.id,
                items = chunk.len(),
                chunk = chunk.index,
                of = total,
                "Created gateway list"
            );
        }
        Ok(())
    }

    /// Remote ids in chunk order, looked up by name from a fresh listing.
    async fn resolve_list_ids(&self, chunks: &[ListChunk]) -> Result<Vec<String>, DomainError> {
        let remote: HashMap<String, String> = self
            .gateway
            .list_lists()
            .await?
            .into_iter()
            .map(|l| (l.name, l.id))
            .collect();

        chunks
            .iter()
            .map(|chunk| {
                remote
                    .get(&chunk.name)
                    .cloned()
                    .ok_or_else(|| DomainError::GatewayListMissing(chunk.name.clone()))
            })
            .collect()
    }

    async fn upsert_rule(&self, rule: BlockRule) -> Result<(), DomainError> {
        if rule.expression.is_empty() {
            warn!(rule = %rule.name, "Empty rule expression, rule not submitted");
            return Ok(());
        }

        let existing = self
            .gateway
            .list_rules()
            .await?
            .into_iter()
            .find(|r| r.name == rule.name);

        match existing {
            Some(current) => {
                self.gateway.update_rule(&current.id, &rule).await?;
                info!(rule = %rule.name, id = %current.id, field = %rule.field, "Updated gateway rule");
            }
            None => {
                let created = self.gateway.create_rule(&rule).await?;
                info!(rule = %rule.name, id = %created.id, field = %rule.field, "Created gateway rule");
            }
        }
        Ok(())
    }
}

fn success_message(report: &SyncReport, request: &SyncRequest) -> String {
    if report.final_block_count == 0 {
        return format!(
            "Gateway sync: nothing to block ({} processed, {} allowed, {} duplicate)",
            report.stats.processed, report.stats.allowed, report.stats.duplicate
        );
    }
    if request.dry_run {
        return format!("Gateway sync (dry run): {}", report.summary());
    }
    format!("Gateway sync complete: {}", report.summary())
}
