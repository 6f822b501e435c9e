use crate::rule_expression::MatchField;
use serde::{Deserialize, Serialize};

/// Remote list object as reported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayList {
    pub id: String,
    pub name: String,
}

/// Remote rule object as reported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayRule {
    pub id: String,
    pub name: String,
}

/// Everything needed to create or update a blocking rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRule {
    pub name: String,
    pub expression: String,
    pub field: MatchField,
    pub block_page_enabled: bool,
}

impl BlockRule {
    pub fn filters(&self) -> Vec<&'static str> {
        vec![self.field.filter()]
    }
}
