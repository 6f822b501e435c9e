use gatesync_domain::{BlockRule, Domain};
use serde::{Deserialize, Serialize};

/// `{success, errors, result}` wrapper around every API response.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub errors: Vec<ApiMessage>,
    pub result: Option<T>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiMessage {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

pub(crate) fn describe_errors(errors: &[ApiMessage]) -> String {
    if errors.is_empty() {
        return "no error details".to_string();
    }
    errors
        .iter()
        .map(|e| format!("{} ({})", e.message, e.code))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Serialize)]
pub(crate) struct CreateListRequest<'a> {
    pub name: &'a str,
    pub description: &'a str,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub items: Vec<ListItem<'a>>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ListItem<'a> {
    pub value: &'a str,
}

impl<'a> CreateListRequest<'a> {
    pub fn new(name: &'a str, domains: &'a [Domain]) -> Self {
        Self {
            name,
            description: "Managed by gatesync",
            kind: "DOMAIN",
            items: domains
                .iter()
                .map(|d| ListItem { value: d.as_str() })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RuleRequest<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub action: &'static str,
    pub enabled: bool,
    pub filters: Vec<&'static str>,
    pub traffic: &'a str,
    pub rule_settings: RuleSettings,
}

#[derive(Debug, Serialize)]
pub(crate) struct RuleSettings {
    pub block_page_enabled: bool,
}

impl<'a> From<&'a BlockRule> for RuleRequest<'a> {
    fn from(rule: &'a BlockRule) -> Self {
        Self {
            name: &rule.name,
            description: "Managed by gatesync",
            action: "block",
            enabled: true,
            filters: rule.filters(),
            traffic: &rule.expression,
            rule_settings: RuleSettings {
                block_page_enabled: rule.block_page_enabled,
            },
        }
    }
}
