//! Canonical domain names and the feed line normalizer.
//!
//! Feeds come in three flavours that are handled by the same pipeline:
//!
//! ```text
//! 0.0.0.0 tracker.example.com      # hosts file
//! ||ads.example.com^$important     # adblock syntax
//! @@||cdn.example.com^             # adblock exception (allowlists only)
//! ```
//!
//! Anything that is not a plain domain after stripping is rejected, never
//! reported as an error.

use crate::errors::DomainError;
use compact_str::CompactString;
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

const COMMENT_MARKERS: [&str; 5] = ["#", "//", "!", "/*", "*/"];
const HOSTS_ADDRESSES: [&str; 4] = ["0.0.0.0", "127.0.0.1", "::1", "::"];
const ALLOW_EXCEPTION_PREFIX: &str = "@@||";

/// Lowercase, dot-separated domain that passed [`is_valid_domain`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Domain(CompactString);

impl Domain {
    /// Validates an already-clean name. Use [`normalize`] for raw feed lines.
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        let lowered = name.to_ascii_lowercase();
        if is_valid_domain(&lowered) {
            Ok(Domain(CompactString::new(lowered)))
        } else {
            Err(DomainError::InvalidDomainName(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn label_count(&self) -> usize {
        self.0.split('.').count()
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for Domain {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Domain::parse(s)
    }
}

/// Turns one raw feed line into a canonical [`Domain`], or `None` when the
/// line is a comment, blank, or not a domain once list markers are removed.
///
/// Pure and idempotent: `normalize(d.as_str(), _) == Some(d)` for every `Domain`.
pub fn normalize(raw: &str, is_allowlist_entry: bool) -> Option<Domain> {
    let mut line = raw.trim();

    if line.is_empty() || COMMENT_MARKERS.iter().any(|m| line.starts_with(m)) {
        return None;
    }

    if is_allowlist_entry {
        line = line.strip_prefix(ALLOW_EXCEPTION_PREFIX).unwrap_or(line);
    }

    line = strip_hosts_address(line);

    line = strip_inline_comment(line);

    line = line.strip_prefix("||").unwrap_or(line);
    line = line.strip_suffix("^$important").unwrap_or(line);
    line = line.strip_prefix("*.").unwrap_or(line);
    line = line.strip_suffix('^').unwrap_or(line);
    line = line.strip_suffix('.').unwrap_or(line);

    Domain::parse(line).ok()
}

/// Drops a trailing `# comment` separated by whitespace. A `#` glued to the
/// name (`example.com##.banner`) is left alone so the line fails the grammar.
fn strip_inline_comment(line: &str) -> &str {
    match line.split_once(char::is_whitespace) {
        Some((name, rest)) if rest.trim_start().starts_with('#') => name,
        _ => line,
    }
}

fn strip_hosts_address(line: &str) -> &str {
    for addr in HOSTS_ADDRESSES {
        if let Some(rest) = line.strip_prefix(addr) {
            if rest.starts_with(char::is_whitespace) {
                return rest.trim_start();
            }
        }
    }
    line
}

/// Strict domain grammar: two or more labels of 1-63 `[a-z0-9-]` characters
/// not starting or ending with a hyphen, the last one alphabetic (2+ letters)
/// or an IDNA `xn--` label.
pub fn is_valid_domain(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_DOMAIN_LEN {
        return false;
    }

    let labels: SmallVec<[&str; 8]> = name.split('.').collect();
    let Some((tld, rest)) = labels.split_last() else {
        return false;
    };

    !rest.is_empty() && rest.iter().all(|l| is_valid_label(l)) && is_valid_tld(tld)
}

fn is_valid_label(label: &str) -> bool {
    let bytes = label.as_bytes();
    (1..=MAX_LABEL_LEN).contains(&bytes.len())
        && bytes
            .iter()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
        && bytes[0] != b'-'
        && bytes[bytes.len() - 1] != b'-'
}

fn is_valid_tld(tld: &str) -> bool {
    match tld.strip_prefix("xn--") {
        Some(encoded) => !encoded.is_empty() && is_valid_label(tld),
        None => {
            (2..=MAX_LABEL_LEN).contains(&tld.len())
                && tld.bytes().all(|b| b.is_ascii_lowercase())
        }
    }
}
