use crate::list_chunk::DEFAULT_CHUNK_SIZE;
use crate::reconciliation::ReconciliationStats;
use serde::Serialize;

pub const DEFAULT_LIST_PREFIX: &str = "CGPS List";
pub const DEFAULT_RULE_NAME: &str = "CGPS Filter Lists";
pub const DEFAULT_SNI_RULE_SUFFIX: &str = " - SNI Based Filtering";

/// Input of one sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    pub allowlist_urls: Vec<String>,
    pub blocklist_urls: Vec<String>,
    pub ceiling: usize,
    pub chunk_size: usize,
    pub enable_sni: bool,
    pub list_prefix: String,
    pub rule_name: String,
    pub sni_rule_suffix: String,
    pub block_page_enabled: bool,
    pub dry_run: bool,
}

impl SyncRequest {
    pub fn new(allowlist_urls: Vec<String>, blocklist_urls: Vec<String>) -> Self {
        Self {
            allowlist_urls,
            blocklist_urls,
            ceiling: 300_000,
            chunk_size: DEFAULT_CHUNK_SIZE,
            enable_sni: false,
            list_prefix: DEFAULT_LIST_PREFIX.to_string(),
            rule_name: DEFAULT_RULE_NAME.to_string(),
            sni_rule_suffix: DEFAULT_SNI_RULE_SUFFIX.to_string(),
            block_page_enabled: false,
            dry_run: false,
        }
    }

    pub fn dns_rule_name(&self) -> &str {
        &self.rule_name
    }

    pub fn sni_rule_name(&self) -> String {
        format!("{}{}", self.rule_name, self.sni_rule_suffix)
    }

    /// Rule names this tool owns, whether or not SNI is enabled for this run.
    pub fn managed_rule_names(&self) -> [String; 2] {
        [self.rule_name.clone(), self.sni_rule_name()]
    }
}

/// Outcome of a sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub stats: ReconciliationStats,
    pub final_block_count: usize,
    pub chunk_count: usize,
    /// False when nothing was pushed to the gateway (empty result or dry run).
    pub applied: bool,
}

impl SyncReport {
    pub fn summary(&self) -> String {
        format!(
            "{} domains in {} lists ({} processed, {} allowed, {} duplicate, {} dropped)",
            self.final_block_count,
            self.chunk_count,
            self.stats.processed,
            self.stats.allowed,
            self.stats.duplicate,
            self.stats.dropped(),
        )
    }
}
