use crate::domain_name::Domain;
use compact_str::CompactString;
use rustc_hash::FxBuildHasher;
use std::collections::HashMap;

#[derive(Default)]
struct TrieNode {
    children: HashMap<CompactString, TrieNode, FxBuildHasher>,
    present: bool,
}

impl TrieNode {
    fn new() -> Self {
        Self {
            children: HashMap::with_hasher(FxBuildHasher),
            present: false,
        }
    }
}

/// Label-reversed trie over a set of domains.
///
/// `ads.example.com` is stored under `com -> example -> ads`, so every
/// ancestor of a queried name is visited by a single walk from the root.
/// Lookups see every insert made before them, which the reconciler relies on
/// while the blocklist grows.
#[derive(Default)]
pub struct HierarchyIndex {
    root: TrieNode,
    len: usize,
}

impl HierarchyIndex {
    pub fn new() -> Self {
        Self {
            root: TrieNode::new(),
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `false` when the domain was already present.
    pub fn insert(&mut self, domain: &Domain) -> bool {
        let mut node = &mut self.root;
        for label in domain.as_str().split('.').rev() {
            node = node.children.entry(CompactString::new(label)).or_default();
        }
        if node.present {
            return false;
        }
        node.present = true;
        self.len += 1;
        true
    }

    #[inline]
    pub fn contains(&self, domain: &Domain) -> bool {
        let mut node = &self.root;
        for label in domain.as_str().split('.').rev() {
            match node.children.get(label) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.present
    }

    #[inline]
    pub fn contains_self_or_ancestor(&self, domain: &Domain) -> bool {
        let mut node = &self.root;
        for label in domain.as_str().split('.').rev() {
            match node.children.get(label) {
                Some(child) => {
                    if child.present {
                        return true;
                    }
                    node = child;
                }
                None => return false,
            }
        }
        false
    }

    /// Label count of the most specific strict ancestor present in the index.
    ///
    /// For `a.b.example.com` with `example.com` indexed this is `Some(2)`;
    /// the domain itself is never reported.
    #[inline]
    pub fn deepest_ancestor(&self, domain: &Domain) -> Option<usize> {
        let strict = domain.label_count().saturating_sub(1);
        let mut node = &self.root;
        let mut deepest = None;

        for (i, label) in domain.as_str().split('.').rev().take(strict).enumerate() {
            match node.children.get(label) {
                Some(child) => {
                    if child.present {
                        deepest = Some(i + 1);
                    }
                    node = child;
                }
                None => break,
            }
        }

        deepest
    }
}

impl Extend<Domain> for HierarchyIndex {
    fn extend<T: IntoIterator<Item = Domain>>(&mut self, iter: T) {
        for domain in iter {
            self.insert(&domain);
        }
    }
}

impl FromIterator<Domain> for HierarchyIndex {
    fn from_iter<T: IntoIterator<Item = Domain>>(iter: T) -> Self {
        let mut index = HierarchyIndex::new();
        index.extend(iter);
        index
    }
}
