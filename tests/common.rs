#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use figment::{
    providers::{Format, Yaml},
    Figment,
};
use routegate::config::{Config, ConfigV1};
use routegate::identity::ReactiveAuthState;
use routegate::routes::create_router;
use routegate::state::AppState;
use routegate::storage::memory_storage::MemoryStorage;
use serde::de::DeserializeOwned;

pub const TEST_CONFIG: &str = r#"
version: "1.0.0"
logging:
  level: "debug"
  format: "json"
bind_address: 127.0.0.1:8091
guard:
  poll_interval_ms: 10
  timeout_ms: 80
storage:
  enabled: true
  type: memory
identity:
  publishable_key: pk_test_routegate
  secret_key: sk_test_never_exposed
"#;

pub fn load_config(yaml: &str) -> ConfigV1 {
    Figment::new()
        .merge(Yaml::string(yaml))
        .extract::<Config>()
        .expect("Failed to parse test config YAML")
        .into_latest()
}

pub struct TestApp {
    pub router: Router,
    pub identity: Arc<ReactiveAuthState>,
    pub storage: Arc<MemoryStorage>,
}

pub fn build_app(config: ConfigV1) -> TestApp {
    let identity = Arc::new(ReactiveAuthState::default());
    let storage = Arc::new(MemoryStorage::new());
    let state = AppState::new(Arc::new(config), identity.clone(), storage.clone());
    TestApp {
        router: create_router(state),
        identity,
        storage,
    }
}

pub fn json_request(method: Method, path: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub fn empty_request(method: Method, path: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(path)
        .body(Body::empty())
        .expect("failed to build request")
}

pub async fn read_json<T: DeserializeOwned>(response: Response<Body>) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
