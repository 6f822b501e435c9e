use crate::domain_name::Domain;

pub const DEFAULT_CHUNK_SIZE: usize = 1000;

/// One remote list worth of domains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListChunk {
    /// 1-based position in creation order.
    pub index: usize,
    pub name: String,
    pub domains: Vec<Domain>,
}

impl ListChunk {
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

pub fn chunk_name(prefix: &str, index: usize) -> String {
    format!("{} - Chunk {}", prefix, index)
}

/// Splits `domains` by position into chunks of `chunk_size` (the last one may
/// be shorter). Names depend only on position, so identical input always
/// yields identical chunk names.
pub fn partition(domains: &[Domain], chunk_size: usize, prefix: &str) -> Vec<ListChunk> {
    domains
        .chunks(chunk_size.max(1))
        .enumerate()
        .map(|(i, slice)| ListChunk {
            index: i + 1,
            name: chunk_name(prefix, i + 1),
            domains: slice.to_vec(),
        })
        .collect()
}
