use serde::{Deserialize, Serialize};
use std::fmt;

/// Traffic field a gateway rule matches list membership against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchField {
    DnsDomains,
    SniDomains,
}

impl MatchField {
    pub fn selector(&self) -> &'static str {
        match self {
            MatchField::DnsDomains => "dns.domains",
            MatchField::SniDomains => "net.sni.domains",
        }
    }

    /// Gateway filter the rule is evaluated under.
    pub fn filter(&self) -> &'static str {
        match self {
            MatchField::DnsDomains => "dns",
            MatchField::SniDomains => "l4",
        }
    }
}

impl fmt::Display for MatchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

/// `any(<field>[*] in $<id>)` per list, joined with ` or `, in the given order.
///
/// An empty id list yields an empty expression, which callers must treat as
/// "no rule" rather than submit.
pub fn build_expression<S: AsRef<str>>(list_ids: &[S], field: MatchField) -> String {
    list_ids
        .iter()
        .map(|id| format!("any({}[*] in ${})", field.selector(), id.as_ref()))
        .collect::<Vec<_>>()
        .join(" or ")
}
