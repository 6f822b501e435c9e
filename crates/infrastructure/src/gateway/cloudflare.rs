use async_trait::async_trait;
use gatesync_application::ports::GatewayClient;
use gatesync_domain::config::GatewayConfig;
use gatesync_domain::{BlockRule, Domain, DomainError, GatewayList, GatewayRule};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use super::dto::{describe_errors, CreateListRequest, Envelope, RuleRequest};
use super::retry::{retry_with_backoff, AttemptError, RetryPolicy};
use crate::USER_AGENT;

/// Zero Trust Gateway REST client for one account.
///
/// ```text
/// GET|POST        {base}/accounts/{account}/gateway/lists
/// DELETE          {base}/accounts/{account}/gateway/lists/{id}
/// GET|POST        {base}/accounts/{account}/gateway/rules
/// PUT|DELETE      {base}/accounts/{account}/gateway/rules/{id}
/// ```
pub struct CloudflareGatewayClient {
    http: reqwest::Client,
    gateway_url: String,
    api_token: String,
    retry: RetryPolicy,
}

impl CloudflareGatewayClient {
    pub fn new(config: &GatewayConfig) -> Result<Self, DomainError> {
        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| DomainError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(Self {
            http,
            gateway_url: format!(
                "{}/accounts/{}/gateway",
                config.api_base_url.trim_end_matches('/'),
                config.account_id
            ),
            api_token: config.api_token.clone(),
            retry: RetryPolicy::from_config(config),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, format!("{}/{}", self.gateway_url, path))
            .bearer_auth(&self.api_token)
    }

    /// One API call under the retry policy with the envelope unwrapped.
    /// `None` when the API answered `"result": null`.
    async fn call<T, B>(
        &self,
        operation: &str,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Option<T>, DomainError>
    where
        T: DeserializeOwned + Send,
        B: Serialize + Sync,
    {
        let this = self;
        retry_with_backoff(&self.retry, operation, move || {
            let method = method.clone();
            async move {
                let mut request = this.request(method, path);
                if let Some(body) = body {
                    request = request.json(body);
                }
                let response = request
                    .send()
                    .await
                    .map_err(|e| AttemptError::Retryable(format!("network error: {}", e)))?;
                decode(response).await
            }
        })
        .await
    }
}

async fn decode<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<Option<T>, AttemptError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| AttemptError::Retryable(format!("read error: {}", e)))?;

    let envelope = serde_json::from_str::<Envelope<T>>(&text);

    if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
        let detail = match &envelope {
            Ok(env) => describe_errors(&env.errors),
            Err(_) => "no error details".to_string(),
        };
        return Err(AttemptError::Retryable(format!(
            "HTTP {}: {}",
            status.as_u16(),
            detail
        )));
    }

    let envelope = envelope.map_err(|e| {
        AttemptError::Fatal(format!("HTTP {}: invalid response body: {}", status.as_u16(), e))
    })?;

    if !status.is_success() || !envelope.success {
        return Err(AttemptError::Fatal(format!(
            "HTTP {}: {}",
            status.as_u16(),
            describe_errors(&envelope.errors)
        )));
    }

    Ok(envelope.result)
}

#[async_trait]
impl GatewayClient for CloudflareGatewayClient {
    async fn list_lists(&self) -> Result<Vec<GatewayList>, DomainError> {
        let lists: Option<Vec<GatewayList>> = self
            .call("list_lists", Method::GET, "lists", None::<&()>)
            .await?;
        let lists = lists.unwrap_or_default();
        debug!(count = lists.len(), "Fetched gateway lists");
        Ok(lists)
    }

    async fn create_list(&self, name: &str, domains: &[Domain]) -> Result<GatewayList, DomainError> {
        let operation = format!("create_list \"{}\"", name);
        let body = CreateListRequest::new(name, domains);
        self.call(&operation, Method::POST, "lists", Some(&body))
            .await?
            .ok_or_else(|| DomainError::gateway(operation, "response without result"))
    }

    async fn delete_list(&self, id: &str) -> Result<(), DomainError> {
        let _: Option<serde_json::Value> = self
            .call(
                &format!("delete_list {}", id),
                Method::DELETE,
                &format!("lists/{}", id),
                None::<&()>,
            )
            .await?;
        Ok(())
    }

    async fn list_rules(&self) -> Result<Vec<GatewayRule>, DomainError> {
        let rules: Option<Vec<GatewayRule>> = self
            .call("list_rules", Method::GET, "rules", None::<&()>)
            .await?;
        Ok(rules.unwrap_or_default())
    }

    async fn create_rule(&self, rule: &BlockRule) -> Result<GatewayRule, DomainError> {
        let operation = format!("create_rule \"{}\"", rule.name);
        let body = RuleRequest::from(rule);
        self.call(&operation, Method::POST, "rules", Some(&body))
            .await?
            .ok_or_else(|| DomainError::gateway(operation, "response without result"))
    }

    async fn update_rule(&self, id: &str, rule: &BlockRule) -> Result<(), DomainError> {
        let body = RuleRequest::from(rule);
        let _: Option<serde_json::Value> = self
            .call(
                &format!("update_rule \"{}\"", rule.name),
                Method::PUT,
                &format!("rules/{}", id),
                Some(&body),
            )
            .await?;
        Ok(())
    }

    async fn delete_rule(&self, id: &str) -> Result<(), DomainError> {
        let _: Option<serde_json::Value> = self
            .call(
                &format!("delete_rule {}", id),
                Method::DELETE,
                &format!("rules/{}", id),
                None::<&()>,
            )
            .await?;
        Ok(())
    }
}
