use async_trait::async_trait;
use gatesync_application::ports::{FeedSource, GatewayClient, Notifier};
use gatesync_application::use_cases::SyncGatewayUseCase;
use gatesync_domain::{BlockRule, Domain, DomainError, GatewayList, GatewayRule, SyncRequest};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

pub const BLOCK_URL: &str = "https://feeds.test/block.txt";

/// Serves a fixed blocklist body and counts fetches.
#[derive(Default)]
pub struct CountingFeedSource {
    fetches: AtomicUsize,
    failing: AtomicBool,
}

impl CountingFeedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl FeedSource for CountingFeedSource {
    async fn fetch(&self, url: &str) -> Result<String, DomainError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::feed(url, "HTTP 503"));
        }
        Ok("ads.example.com\ntracker.test\n".to_string())
    }
}

/// Accepts every call; only counts created lists. `list_lists` echoes them
/// back so id resolution succeeds.
#[derive(Default)]
pub struct NullGatewayClient {
    created: std::sync::Mutex<Vec<GatewayList>>,
}

impl NullGatewayClient {
    pub fn created_lists(&self) -> usize {
        self.created.lock().unwrap().len()
    }
}

#[async_trait]
impl GatewayClient for NullGatewayClient {
    async fn list_lists(&self) -> Result<Vec<GatewayList>, DomainError> {
        Ok(self.created.lock().unwrap().clone())
    }

    async fn create_list(&self, name: &str, _domains: &[Domain]) -> Result<GatewayList, DomainError> {
        let mut created = self.created.lock().unwrap();
        let list = GatewayList {
            id: format!("list-{}", created.len() + 1),
            name: name.to_string(),
        };
        created.push(list.clone());
        Ok(list)
    }

    async fn delete_list(&self, _id: &str) -> Result<(), DomainError> {
        Ok(())
    }

    async fn list_rules(&self) -> Result<Vec<GatewayRule>, DomainError> {
        Ok(vec![])
    }

    async fn create_rule(&self, rule: &BlockRule) -> Result<GatewayRule, DomainError> {
        Ok(GatewayRule {
            id: "rule-1".to_string(),
            name: rule.name.clone(),
        })
    }

    async fn update_rule(&self, _id: &str, _rule: &BlockRule) -> Result<(), DomainError> {
        Ok(())
    }

    async fn delete_rule(&self, _id: &str) -> Result<(), DomainError> {
        Ok(())
    }
}

pub struct SilentNotifier;

#[async_trait]
impl Notifier for SilentNotifier {
    async fn notify(&self, _message: &str, _is_error: bool) {}
}

pub fn dry_run_request() -> SyncRequest {
    let mut request = SyncRequest::new(vec![], vec![BLOCK_URL.to_string()]);
    request.dry_run = true;
    request
}

pub fn make_use_case(
    feeds: Arc<CountingFeedSource>,
    gateway: Arc<NullGatewayClient>,
) -> Arc<SyncGatewayUseCase> {
    Arc::new(SyncGatewayUseCase::new(
        feeds,
        gateway,
        Arc::new(SilentNotifier),
    ))
}
