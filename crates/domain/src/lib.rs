//! gatesync domain layer: feed normalization, hierarchy-aware reconciliation,
//! list partitioning and rule expressions. No I/O.
pub mod config;
pub mod domain_name;
pub mod errors;
pub mod gateway;
pub mod hierarchy_index;
pub mod list_chunk;
pub mod reconciliation;
pub mod rule_expression;
pub mod sync;

pub use config::{CliOverrides, Config, ConfigError};
pub use domain_name::{is_valid_domain, normalize, Domain};
pub use errors::DomainError;
pub use gateway::{BlockRule, GatewayList, GatewayRule};
pub use hierarchy_index::HierarchyIndex;
pub use list_chunk::{chunk_name, partition, ListChunk, DEFAULT_CHUNK_SIZE};
pub use reconciliation::{reconcile, Reconciler, Reconciliation, ReconciliationStats, Verdict};
pub use rule_expression::{build_expression, MatchField};
pub use sync::{SyncReport, SyncRequest};
