//! Shared test utilities for integration tests
//!
//! Environment isolation for config and log paths, and an in-process HTTP
//! server that answers like the generateContent endpoint.

use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri};
use axum::Router;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use studyforge::provider::ProviderConfig;
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

const ISOLATED_VARS: [&str; 5] = [
    "HOME",
    "XDG_CONFIG_HOME",
    "XDG_DATA_HOME",
    "GEMINI_API_KEY",
    "STUDYFORGE_PROVIDER__API_KEY",
];

/// Environment variable state to restore after test
struct EnvState {
    saved: Vec<(&'static str, Option<String>)>,
}

impl EnvState {
    fn capture() -> Self {
        Self {
            saved: ISOLATED_VARS
                .iter()
                .map(|name| (*name, std::env::var(name).ok()))
                .collect(),
        }
    }

    fn restore(self) {
        for (name, value) in self.saved {
            match value {
                Some(orig) => std::env::set_var(name, orig),
                None => std::env::remove_var(name),
            }
        }
    }
}

/// Run `f` with HOME, XDG_CONFIG_HOME and XDG_DATA_HOME pointing into
/// `test_dir` and no credential variables set. The original environment is
/// restored afterwards.
pub fn with_xdg_env<F, R>(test_dir: &TempDir, f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture();

    let test_config_home = test_dir.path().join("config");
    let test_data_home = test_dir.path().join("data");
    let test_home = test_dir.path().join("home");
    for dir in [&test_config_home, &test_data_home, &test_home] {
        std::fs::create_dir_all(dir).unwrap();
    }

    std::env::set_var("HOME", &test_home);
    std::env::set_var("XDG_CONFIG_HOME", &test_config_home);
    std::env::set_var("XDG_DATA_HOME", &test_data_home);
    std::env::remove_var("GEMINI_API_KEY");
    std::env::remove_var("STUDYFORGE_PROVIDER__API_KEY");

    let result = f();

    env_state.restore();

    result
}

/// One request as seen by the fake provider.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    pub path: String,
    pub query: HashMap<String, String>,
    pub body: Value,
}

#[derive(Clone)]
struct FakeState {
    status: StatusCode,
    body: String,
    delay: Duration,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// In-process stand-in for the generateContent endpoint.
pub struct FakeProvider {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

impl FakeProvider {
    /// Answer every request with a 200 envelope carrying `reply`.
    pub async fn replying(reply: &str) -> Self {
        Self::start(StatusCode::OK, envelope(reply).to_string(), Duration::ZERO).await
    }

    pub async fn start(status: StatusCode, body: String, delay: Duration) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = FakeState {
            status,
            body,
            delay,
            requests: requests.clone(),
        };
        let app = Router::new().fallback(handle).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self { addr, requests }
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Provider profile aimed at this server with model `test-model`.
    pub fn provider_config(&self, api_key: Option<&str>) -> ProviderConfig {
        ProviderConfig {
            api_key: api_key.map(str::to_string),
            base_url: format!("http://{}/v1beta/models", self.addr),
            model: "test-model".to_string(),
            ..ProviderConfig::default()
        }
    }
}

async fn handle(
    State(state): State<FakeState>,
    uri: Uri,
    Query(query): Query<HashMap<String, String>>,
    body: String,
) -> (StatusCode, String) {
    state.requests.lock().unwrap().push(CapturedRequest {
        path: uri.path().to_string(),
        query,
        body: serde_json::from_str(&body).unwrap_or(Value::Null),
    });
    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    (state.status, state.body.clone())
}

/// A successful generateContent response body.
pub fn envelope(reply: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": reply}]},
            "finishReason": "STOP"
        }]
    })
}
