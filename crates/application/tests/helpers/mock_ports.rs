use async_trait::async_trait;
use gatesync_application::ports::{FeedSource, GatewayClient, Notifier};
use gatesync_domain::{BlockRule, Domain, DomainError, GatewayList, GatewayRule};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct MockFeedSource {
    feeds: Arc<RwLock<HashMap<String, String>>>,
    fetched: Arc<RwLock<Vec<String>>>,
}

impl MockFeedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_feed(self, url: &str, lines: &[&str]) -> Self {
        self.feeds
            .write()
            .await
            .insert(url.to_string(), lines.join("\n"));
        self
    }

    pub async fn fetched(&self) -> Vec<String> {
        self.fetched.read().await.clone()
    }
}

#[async_trait]
impl FeedSource for MockFeedSource {
    async fn fetch(&self, url: &str) -> Result<String, DomainError> {
        self.fetched.write().await.push(url.to_string());
        self.feeds
            .read()
            .await
            .get(url)
            .cloned()
            .ok_or_else(|| DomainError::feed(url, "HTTP 404"))
    }
}

#[derive(Debug, Clone)]
pub struct StoredRule {
    pub id: String,
    pub rule: BlockRule,
}

/// In-memory gateway. Every call is recorded as `"<operation> <argument>"`.
#[derive(Clone, Default)]
pub struct MockGatewayClient {
    lists: Arc<RwLock<Vec<(GatewayList, Vec<String>)>>>,
    rules: Arc<RwLock<Vec<StoredRule>>>,
    calls: Arc<RwLock<Vec<String>>>,
    fail_on: Arc<RwLock<Option<String>>>,
    hide_lists: Arc<RwLock<bool>>,
    keep_deleted_rules: Arc<RwLock<bool>>,
    next_id: Arc<AtomicU64>,
}

impl MockGatewayClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a list as if a previous run had created it.
    pub async fn seed_list(&self, name: &str, domains: &[&str]) -> String {
        let id = self.next_id("list");
        self.lists.write().await.push((
            GatewayList {
                id: id.clone(),
                name: name.to_string(),
            },
            domains.iter().map(|d| d.to_string()).collect(),
        ));
        id
    }

    pub async fn seed_rule(&self, rule: BlockRule) -> String {
        let id = self.next_id("rule");
        self.rules.write().await.push(StoredRule {
            id: id.clone(),
            rule,
        });
        id
    }

    /// Makes the first call whose record starts with `prefix` fail.
    pub async fn fail_on(&self, prefix: &str) {
        *self.fail_on.write().await = Some(prefix.to_string());
    }

    /// `list_lists` returns nothing, as if creation never became visible.
    pub async fn set_hide_lists(&self, hide: bool) {
        *self.hide_lists.write().await = hide;
    }

    /// `delete_rule` succeeds but leaves the rule listed, as a lagging API would.
    pub async fn set_keep_deleted_rules(&self, keep: bool) {
        *self.keep_deleted_rules.write().await = keep;
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.read().await.clone()
    }

    pub async fn list_names(&self) -> Vec<String> {
        self.lists
            .read()
            .await
            .iter()
            .map(|(l, _)| l.name.clone())
            .collect()
    }

    pub async fn list_items(&self, name: &str) -> Option<Vec<String>> {
        self.lists
            .read()
            .await
            .iter()
            .find(|(l, _)| l.name == name)
            .map(|(_, items)| items.clone())
    }

    pub async fn list_id(&self, name: &str) -> Option<String> {
        self.lists
            .read()
            .await
            .iter()
            .find(|(l, _)| l.name == name)
            .map(|(l, _)| l.id.clone())
    }

    pub async fn rules(&self) -> Vec<StoredRule> {
        self.rules.read().await.clone()
    }

    pub async fn rule(&self, name: &str) -> Option<StoredRule> {
        self.rules
            .read()
            .await
            .iter()
            .find(|r| r.rule.name == name)
            .cloned()
    }

    fn next_id(&self, kind: &str) -> String {
        format!("{}-{}", kind, self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn record(&self, call: String) -> Result<(), DomainError> {
        let mut fail_on = self.fail_on.write().await;
        let fails = fail_on.as_deref().is_some_and(|p| call.starts_with(p));
        self.calls.write().await.push(call.clone());
        if fails {
            *fail_on = None;
            return Err(DomainError::gateway(call, "HTTP 500: mock failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl GatewayClient for MockGatewayClient {
    async fn list_lists(&self) -> Result<Vec<GatewayList>, DomainError> {
        self.record("list_lists".to_string()).await?;
        if *self.hide_lists.read().await {
            return Ok(vec![]);
        }
        Ok(self
            .lists
            .read()
            .await
            .iter()
            .map(|(l, _)| l.clone())
            .collect())
    }

    async fn create_list(&self, name: &str, domains: &[Domain]) -> Result<GatewayList, DomainError> {
        self.record(format!("create_list {}", name)).await?;
        let list = GatewayList {
            id: self.next_id("list"),
            name: name.to_string(),
        };
        let items = domains.iter().map(|d| d.to_string()).collect();
        self.lists.write().await.push((list.clone(), items));
        Ok(list)
    }

    async fn delete_list(&self, id: &str) -> Result<(), DomainError> {
        self.record(format!("delete_list {}", id)).await?;
        self.lists.write().await.retain(|(l, _)| l.id != id);
        Ok(())
    }

    async fn list_rules(&self) -> Result<Vec<GatewayRule>, DomainError> {
        self.record("list_rules".to_string()).await?;
        Ok(self
            .rules
            .read()
            .await
            .iter()
            .map(|r| GatewayRule {
                id: r.id.clone(),
                name: r.rule.name.clone(),
            })
            .collect())
    }

    async fn create_rule(&self, rule: &BlockRule) -> Result<GatewayRule, DomainError> {
        self.record(format!("create_rule {}", rule.name)).await?;
        let id = self.next_id("rule");
        self.rules.write().await.push(StoredRule {
            id: id.clone(),
            rule: rule.clone(),
        });
        Ok(GatewayRule {
            id,
            name: rule.name.clone(),
        })
    }

    async fn update_rule(&self, id: &str, rule: &BlockRule) -> Result<(), DomainError> {
        self.record(format!("update_rule {}", id)).await?;
        let mut rules = self.rules.write().await;
        match rules.iter_mut().find(|r| r.id == id) {
            Some(stored) => {
                stored.rule = rule.clone();
                Ok(())
            }
            None => Err(DomainError::gateway(format!("update_rule {}", id), "HTTP 404")),
        }
    }

    async fn delete_rule(&self, id: &str) -> Result<(), DomainError> {
        self.record(format!("delete_rule {}", id)).await?;
        if !*self.keep_deleted_rules.read().await {
            self.rules.write().await.retain(|r| r.id != id);
        }
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MockNotifier {
    messages: Arc<RwLock<Vec<(String, bool)>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn messages(&self) -> Vec<(String, bool)> {
        self.messages.read().await.clone()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn notify(&self, message: &str, is_error: bool) {
        self.messages
            .write()
            .await
            .push((message.to_string(), is_error));
    }
}
