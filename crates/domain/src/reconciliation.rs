use crate::domain_name::Domain;
use crate::hierarchy_index::HierarchyIndex;
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationStats {
    pub processed: usize,
    pub allowed: usize,
    pub duplicate: usize,
    pub final_blocked: usize,
}

impl ReconciliationStats {
    /// Domains that passed every precedence check but did not fit under the ceiling.
    pub fn dropped(&self) -> usize {
        self.processed
            .saturating_sub(self.allowed)
            .saturating_sub(self.duplicate)
            .saturating_sub(self.final_blocked)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    /// The domain or one of its ancestors is allowlisted.
    Allowed,
    /// The domain or one of its ancestors is already blocked this run.
    Duplicate,
    /// No headroom left under the ceiling.
    Dropped,
}

#[derive(Debug, Clone, Default)]
pub struct Reconciliation {
    /// Accepted domains in first-accepted order.
    pub domains: Vec<Domain>,
    pub stats: ReconciliationStats,
}

/// Incremental allow/block precedence resolution for one sync run.
///
/// Owns the growing blocklist index; the allowlist index is borrowed and
/// only read. Feed domains are offered one at a time in feed order.
pub struct Reconciler<'a> {
    allow: &'a HierarchyIndex,
    block: HierarchyIndex,
    accepted: Vec<Domain>,
    stats: ReconciliationStats,
    limit: usize,
    ceiling: usize,
    chunk_size: usize,
    truncated: bool,
}

impl<'a> Reconciler<'a> {
    /// Accepts at most `ceiling - chunk_size` domains, keeping one full chunk
    /// of headroom under the ceiling.
    pub fn new(allow: &'a HierarchyIndex, ceiling: usize, chunk_size: usize) -> Self {
        Self {
            allow,
            block: HierarchyIndex::new(),
            accepted: Vec::new(),
            stats: ReconciliationStats::default(),
            limit: ceiling.saturating_sub(chunk_size),
            ceiling,
            chunk_size,
            truncated: false,
        }
    }

    pub fn offer(&mut self, domain: Domain) -> Verdict {
        self.stats.processed += 1;

        let verdict = self.classify(&domain);
        match verdict {
            Verdict::Allowed => self.stats.allowed += 1,
            Verdict::Duplicate => self.stats.duplicate += 1,
            Verdict::Dropped => {
                if !self.truncated {
                    self.truncated = true;
                    warn!(
                        ceiling = self.ceiling,
                        chunk_size = self.chunk_size,
                        accepted = self.accepted.len(),
                        "Blocklist ceiling reached, dropping remaining domains"
                    );
                }
                debug!(domain = %domain, "Dropped over ceiling");
            }
            Verdict::Accepted => {
                self.block.insert(&domain);
                self.accepted.push(domain);
                self.stats.final_blocked += 1;
            }
        }

        verdict
    }

    fn classify(&self, domain: &Domain) -> Verdict {
        if self.allow.contains(domain) {
            return Verdict::Allowed;
        }
        if self.block.contains(domain) {
            return Verdict::Duplicate;
        }

        // The deeper ancestor wins; an allow and a block on the same
        // ancestor cannot both exist because allowed domains never enter
        // the block index.
        match (
            self.allow.deepest_ancestor(domain),
            self.block.deepest_ancestor(domain),
        ) {
            (Some(allow), Some(block)) if allow >= block => Verdict::Allowed,
            (Some(_), Some(_)) | (None, Some(_)) => Verdict::Duplicate,
            (Some(_), None) => Verdict::Allowed,
            (None, None) if self.accepted.len() >= self.limit => Verdict::Dropped,
            (None, None) => Verdict::Accepted,
        }
    }

    pub fn finish(self) -> Reconciliation {
        let dropped = self.stats.dropped();
        if dropped > 0 {
            warn!(
                dropped,
                accepted = self.accepted.len(),
                ceiling = self.ceiling,
                "Blocklist truncated at ceiling"
            );
        }

        Reconciliation {
            domains: self.accepted,
            stats: self.stats,
        }
    }
}

/// Runs every raw blocklist domain through a fresh [`Reconciler`].
pub fn reconcile<I>(
    allow: &HierarchyIndex,
    raw_block: I,
    ceiling: usize,
    chunk_size: usize,
) -> Reconciliation
where
    I: IntoIterator<Item = Domain>,
{
    let mut reconciler = Reconciler::new(allow, ceiling, chunk_size);
    for domain in raw_block {
        reconciler.offer(domain);
    }
    reconciler.finish()
}
