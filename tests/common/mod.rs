//! Shared utilities for integration testing: an in-memory Caddy admin API.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use caddy_route_admin::route::{encode, ReverseRoute};
use caddy_route_admin::AdminClientConfig;

/// A request as seen by the mock server.
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub content_type: Option<String>,
    pub request_id: Option<String>,
    pub body: String,
}

/// In-memory stand-in for Caddy's admin API.
///
/// Implements `/load`, `/stop`, `/config/...` (GET and POST-append) and
/// `/id/...` (GET, PATCH, DELETE) over a single JSON tree.
#[derive(Clone)]
pub struct MockCaddy {
    config: Arc<Mutex<Value>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    stopped: Arc<AtomicBool>,
    delay_ms: Arc<AtomicU64>,
}

#[allow(dead_code)]
impl MockCaddy {
    /// Config with one HTTP server `srv0` and an empty route list.
    pub fn empty_server() -> Value {
        json!({
            "apps": {
                "http": {
                    "servers": {
                        "srv0": { "listen": [":443"], "routes": [] }
                    }
                }
            }
        })
    }

    /// Start the mock on an ephemeral port, seeded with `config`.
    pub async fn start(config: Value) -> (Self, SocketAddr) {
        let mock = Self {
            config: Arc::new(Mutex::new(config)),
            requests: Arc::new(Mutex::new(Vec::new())),
            stopped: Arc::new(AtomicBool::new(false)),
            delay_ms: Arc::new(AtomicU64::new(0)),
        };

        let app = Router::new().fallback(handle).with_state(mock.clone());
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        (mock, addr)
    }

    /// Start the mock with the given routes already in place, in order.
    pub async fn start_with_routes(routes: &[ReverseRoute]) -> (Self, SocketAddr) {
        let mut config = Self::empty_server();
        let list: Vec<Value> = routes.iter().map(|r| encode(r).unwrap()).collect();
        config["apps"]["http"]["servers"]["srv0"]["routes"] = Value::Array(list);
        Self::start(config).await
    }

    pub fn config(&self) -> Value {
        self.config.lock().unwrap().clone()
    }

    pub fn routes(&self) -> Vec<Value> {
        self.config()
            .pointer("/apps/http/servers/srv0/routes")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Delay every answer, for timeout tests.
    pub fn set_delay(&self, delay: Duration) {
        self.delay_ms.store(delay.as_millis() as u64, Ordering::SeqCst);
    }
}

/// Client settings pointing at a mock started on `addr`.
#[allow(dead_code)]
pub fn client_config(addr: SocketAddr) -> AdminClientConfig {
    AdminClientConfig::new(addr.ip().to_string(), addr.port())
}

/// An address nothing listens on.
#[allow(dead_code)]
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

fn error_body(message: String) -> String {
    json!({ "error": message }).to_string()
}

async fn handle(
    State(mock): State<MockCaddy>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    mock.requests.lock().unwrap().push(RecordedRequest {
        method: method.clone(),
        path: uri.path().to_string(),
        content_type: header("content-type"),
        request_id: header("x-request-id"),
        body: body.clone(),
    });

    let delay = mock.delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }

    let path = uri.path().to_string();
    let mut config = mock.config.lock().unwrap();

    if path == "/load" && method == Method::POST {
        return match serde_json::from_str::<Value>(&body) {
            Ok(new_config) => {
                *config = new_config;
                (StatusCode::OK, String::new())
            }
            Err(e) => (
                StatusCode::BAD_REQUEST,
                error_body(format!("decoding request body: {}", e)),
            ),
        };
    }

    if path == "/stop" && method == Method::POST {
        mock.stopped.store(true, Ordering::SeqCst);
        return (StatusCode::OK, String::new());
    }

    if let Some(rest) = path.strip_prefix("/config") {
        let pointer = rest.trim_end_matches('/');
        return match method {
            Method::GET => {
                let value = config.pointer(pointer).cloned().unwrap_or(Value::Null);
                (StatusCode::OK, format!("{}\n", value))
            }
            Method::POST => append_at(&mut config, pointer, &body),
            _ => (
                StatusCode::METHOD_NOT_ALLOWED,
                error_body(format!("method not allowed: {}", method)),
            ),
        };
    }

    if let Some(id) = path.strip_prefix("/id/") {
        let Some(pointer) = find_id(&config, id, String::new()) else {
            return (
                StatusCode::NOT_FOUND,
                error_body(format!("unknown object ID '{}'", id)),
            );
        };
        return match method {
            Method::GET => {
                let value = config.pointer(&pointer).cloned().unwrap_or(Value::Null);
                (StatusCode::OK, format!("{}\n", value))
            }
            Method::PATCH => match serde_json::from_str::<Value>(&body) {
                Ok(value) => {
                    if let Some(slot) = config.pointer_mut(&pointer) {
                        *slot = value;
                    }
                    (StatusCode::OK, String::new())
                }
                Err(e) => (
                    StatusCode::BAD_REQUEST,
                    error_body(format!("decoding request body: {}", e)),
                ),
            },
            Method::DELETE => {
                remove_at(&mut config, &pointer);
                (StatusCode::OK, String::new())
            }
            _ => (
                StatusCode::METHOD_NOT_ALLOWED,
                error_body(format!("method not allowed: {}", method)),
            ),
        };
    }

    (StatusCode::NOT_FOUND, error_body(format!("no handler for {}", path)))
}

fn append_at(config: &mut Value, pointer: &str, body: &str) -> (StatusCode, String) {
    let value: Value = match serde_json::from_str(body) {
        Ok(v) => v,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                error_body(format!("decoding request body: {}", e)),
            )
        }
    };
    match config.pointer_mut(pointer) {
        Some(Value::Array(items)) => {
            items.push(value);
            (StatusCode::OK, String::new())
        }
        _ => (
            StatusCode::BAD_REQUEST,
            error_body(format!("path {} is not an array", pointer)),
        ),
    }
}

fn id_matches(value: &Value, id: &str) -> bool {
    match value.get("@id") {
        Some(Value::Number(n)) => n.to_string() == id,
        Some(Value::String(s)) => s == id,
        _ => false,
    }
}

fn find_id(value: &Value, id: &str, prefix: String) -> Option<String> {
    if id_matches(value, id) {
        return Some(prefix);
    }
    match value {
        Value::Object(map) => map.iter().find_map(|(key, child)| {
            let key = key.replace('~', "~0").replace('/', "~1");
            find_id(child, id, format!("{}/{}", prefix, key))
        }),
        Value::Array(items) => items
            .iter()
            .enumerate()
            .find_map(|(i, child)| find_id(child, id, format!("{}/{}", prefix, i))),
        _ => None,
    }
}

fn remove_at(config: &mut Value, pointer: &str) {
    let Some((parent, last)) = pointer.rsplit_once('/') else {
        return;
    };
    match config.pointer_mut(parent) {
        Some(Value::Array(items)) => {
            if let Ok(index) = last.parse::<usize>() {
                if index < items.len() {
                    items.remove(index);
                }
            }
        }
        Some(Value::Object(map)) => {
            map.remove(&last.replace("~1", "/").replace("~0", "~"));
        }
        _ => {}
    }
}
