use axum::extract::{Path, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Default)]
struct GatewayState {
    lists: Vec<Value>,
    rules: Vec<Value>,
    requests: Vec<RecordedRequest>,
    /// Status codes answered (in order) before any real handling.
    injected: VecDeque<StatusCode>,
    next_id: u64,
}

/// In-process stand-in for the Gateway lists/rules REST API.
#[derive(Clone, Default)]
pub struct MockGatewayApi {
    state: Arc<Mutex<GatewayState>>,
}

type Reply = (StatusCode, Json<Value>);

impl MockGatewayApi {
    pub async fn start() -> (Self, SocketAddr) {
        let api = Self::default();
        let app = Router::new()
            .route(
                "/client/v4/accounts/{account}/gateway/lists",
                get(list_lists).post(create_list),
            )
            .route(
                "/client/v4/accounts/{account}/gateway/lists/{id}",
                delete(delete_list),
            )
            .route(
                "/client/v4/accounts/{account}/gateway/rules",
                get(list_rules).post(create_rule),
            )
            .route(
                "/client/v4/accounts/{account}/gateway/rules/{id}",
                put(update_rule).delete(delete_rule),
            )
            .with_state(api.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        (api, addr)
    }

    pub fn inject_status(&self, status: StatusCode) {
        self.state.lock().unwrap().injected.push_back(status);
    }

    pub fn seed_list(&self, name: &str) -> String {
        let mut state = self.state.lock().unwrap();
        let id = next_id(&mut state);
        state.lists.push(json!({ "id": id, "name": name, "type": "DOMAIN", "count": 0 }));
        id
    }

    pub fn seed_rule(&self, name: &str) -> String {
        let mut state = self.state.lock().unwrap();
        let id = next_id(&mut state);
        state.rules.push(json!({ "id": id, "name": name, "action": "block" }));
        id
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn lists(&self) -> Vec<Value> {
        self.state.lock().unwrap().lists.clone()
    }

    pub fn rules(&self) -> Vec<Value> {
        self.state.lock().unwrap().rules.clone()
    }
}

fn next_id(state: &mut GatewayState) -> String {
    state.next_id += 1;
    format!("00000000-0000-0000-0000-{:012}", state.next_id)
}

fn ok(result: Value) -> Reply {
    (
        StatusCode::OK,
        Json(json!({ "success": true, "errors": [], "messages": [], "result": result })),
    )
}

fn failure(status: StatusCode, code: u16, message: &str) -> Reply {
    (
        status,
        Json(json!({
            "success": false,
            "errors": [{ "code": code, "message": message }],
            "messages": [],
            "result": null
        })),
    )
}

/// Records the request; returns an injected failure when one is queued.
fn enter(
    api: &MockGatewayApi,
    method: Method,
    path: String,
    headers: &HeaderMap,
    body: Option<Value>,
) -> Option<Reply> {
    let mut state = api.state.lock().unwrap();
    state.requests.push(RecordedRequest {
        method,
        path,
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });
    state
        .injected
        .pop_front()
        .map(|status| failure(status, 10000 + status.as_u16(), "injected failure"))
}

async fn list_lists(
    State(api): State<MockGatewayApi>,
    Path(account): Path<String>,
    headers: HeaderMap,
) -> Reply {
    let path = format!("/accounts/{}/gateway/lists", account);
    if let Some(reply) = enter(&api, Method::GET, path, &headers, None) {
        return reply;
    }
    let lists = api.state.lock().unwrap().lists.clone();
    if lists.is_empty() {
        return ok(Value::Null);
    }
    ok(Value::Array(lists))
}

async fn create_list(
    State(api): State<MockGatewayApi>,
    Path(account): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let path = format!("/accounts/{}/gateway/lists", account);
    if let Some(reply) = enter(&api, Method::POST, path, &headers, Some(body.clone())) {
        return reply;
    }
    let Some(name) = body["name"].as_str() else {
        return failure(StatusCode::BAD_REQUEST, 2001, "name required");
    };
    let mut state = api.state.lock().unwrap();
    let id = next_id(&mut state);
    let list = json!({
        "id": id,
        "name": name,
        "type": body["type"],
        "count": body["items"].as_array().map(|a| a.len()).unwrap_or(0),
    });
    state.lists.push(list.clone());
    ok(list)
}

async fn delete_list(
    State(api): State<MockGatewayApi>,
    Path((account, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Reply {
    let path = format!("/accounts/{}/gateway/lists/{}", account, id);
    if let Some(reply) = enter(&api, Method::DELETE, path, &headers, None) {
        return reply;
    }
    let mut state = api.state.lock().unwrap();
    let before = state.lists.len();
    state.lists.retain(|l| l["id"] != id.as_str());
    if state.lists.len() == before {
        return failure(StatusCode::NOT_FOUND, 2002, "list not found");
    }
    ok(json!({}))
}

async fn list_rules(
    State(api): State<MockGatewayApi>,
    Path(account): Path<String>,
    headers: HeaderMap,
) -> Reply {
    let path = format!("/accounts/{}/gateway/rules", account);
    if let Some(reply) = enter(&api, Method::GET, path, &headers, None) {
        return reply;
    }
    let rules = api.state.lock().unwrap().rules.clone();
    ok(Value::Array(rules))
}

async fn create_rule(
    State(api): State<MockGatewayApi>,
    Path(account): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let path = format!("/accounts/{}/gateway/rules", account);
    if let Some(reply) = enter(&api, Method::POST, path, &headers, Some(body.clone())) {
        return reply;
    }
    let mut state = api.state.lock().unwrap();
    let mut rule = body;
    rule["id"] = Value::String(next_id(&mut state));
    state.rules.push(rule.clone());
    ok(rule)
}

async fn update_rule(
    State(api): State<MockGatewayApi>,
    Path((account, id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let path = format!("/accounts/{}/gateway/rules/{}", account, id);
    if let Some(reply) = enter(&api, Method::PUT, path, &headers, Some(body.clone())) {
        return reply;
    }
    let mut state = api.state.lock().unwrap();
    match state.rules.iter_mut().find(|r| r["id"] == id.as_str()) {
        Some(rule) => {
            let mut updated = body;
            updated["id"] = Value::String(id);
            *rule = updated.clone();
            ok(updated)
        }
        None => failure(StatusCode::NOT_FOUND, 2003, "rule not found"),
    }
}

async fn delete_rule(
    State(api): State<MockGatewayApi>,
    Path((account, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Reply {
    let path = format!("/accounts/{}/gateway/rules/{}", account, id);
    if let Some(reply) = enter(&api, Method::DELETE, path, &headers, None) {
        return reply;
    }
    let mut state = api.state.lock().unwrap();
    state.rules.retain(|r| r["id"] != id.as_str());
    ok(json!({}))
}
