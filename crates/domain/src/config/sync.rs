use crate::list_chunk::DEFAULT_CHUNK_SIZE;
use crate::sync::{DEFAULT_LIST_PREFIX, DEFAULT_RULE_NAME, DEFAULT_SNI_RULE_SUFFIX};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    /// Maximum number of blocked domains across all lists.
    #[serde(default = "default_ceiling")]
    pub ceiling: usize,

    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    #[serde(default)]
    pub enable_sni: bool,

    #[serde(default = "default_list_prefix")]
    pub list_prefix: String,

    #[serde(default = "default_rule_name")]
    pub rule_name: String,

    #[serde(default = "default_sni_rule_suffix")]
    pub sni_rule_suffix: String,

    #[serde(default)]
    pub block_page_enabled: bool,

    #[serde(default)]
    pub dry_run: bool,

    /// Period of `gatesync run`. Default: 24 h.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            ceiling: default_ceiling(),
            chunk_size: default_chunk_size(),
            enable_sni: false,
            list_prefix: default_list_prefix(),
            rule_name: default_rule_name(),
            sni_rule_suffix: default_sni_rule_suffix(),
            block_page_enabled: false,
            dry_run: false,
            interval_secs: default_interval_secs(),
        }
    }
}

// 300 lists of 1000 items, the free-plan gateway quota.
fn default_ceiling() -> usize {
    300_000
}

fn default_chunk_size() -> usize {
    DEFAULT_CHUNK_SIZE
}

fn default_list_prefix() -> String {
    DEFAULT_LIST_PREFIX.to_string()
}

fn default_rule_name() -> String {
    DEFAULT_RULE_NAME.to_string()
}

fn default_sni_rule_suffix() -> String {
    DEFAULT_SNI_RULE_SUFFIX.to_string()
}

fn default_interval_secs() -> u64 {
    86_400
}
