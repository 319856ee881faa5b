//! Mock Langflow server for end-to-end tests

#![allow(dead_code)]

use axum::{
    extract::{Path, RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use socio_provider_langflow::LangflowConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Token the mock expects
pub const TEST_TOKEN: &str = "AstraCS:test-token-12345";

/// Inputs that trigger failure modes in the mock
pub const INPUT_SERVER_ERROR: &str = "trigger-500";
pub const INPUT_BAD_JSON: &str = "trigger-bad-json";
pub const INPUT_BAD_SHAPE: &str = "trigger-bad-shape";
pub const INPUT_EMPTY_TEXT: &str = "trigger-empty-text";

/// One request seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub flow_id: String,
    pub endpoint: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Value,
}

/// Mock server state
#[derive(Default)]
pub struct MockLangflowState {
    pub requests: RwLock<Vec<RecordedRequest>>,
}

/// Start a mock Langflow server on an ephemeral port
pub async fn start_mock_langflow() -> (SocketAddr, Arc<MockLangflowState>) {
    let state = Arc::new(MockLangflowState::default());

    let app = Router::new()
        .route("/lf/:flow_id/api/v1/run/:endpoint", post(mock_run))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, state)
}

/// Provider config pointed at the mock
pub fn test_config(addr: SocketAddr) -> LangflowConfig {
    LangflowConfig::new(TEST_TOKEN).with_api_url(format!("http://{}", addr))
}

/// Run response carrying `text` at the expected location
pub fn run_response(text: &str) -> Value {
    json!({
        "session_id": "mock-session",
        "outputs": [{
            "inputs": { "input_value": text },
            "outputs": [{
                "results": {},
                "outputs": { "message": { "message": { "text": text }, "type": "message" } }
            }]
        }]
    })
}

async fn mock_run(
    State(state): State<Arc<MockLangflowState>>,
    Path((flow_id, endpoint)): Path<(String, String)>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> axum::response::Response {
    let authorization = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());

    state.requests.write().await.push(RecordedRequest {
        flow_id,
        endpoint,
        query,
        authorization: authorization.clone(),
        body: body.clone(),
    });

    let expected = format!("Bearer {}", TEST_TOKEN);
    if authorization.as_deref() != Some(expected.as_str()) {
        return (StatusCode::UNAUTHORIZED, "invalid token").into_response();
    }

    let input = body["input_value"].as_str().unwrap_or_default();
    match input {
        INPUT_SERVER_ERROR => {
            (StatusCode::INTERNAL_SERVER_ERROR, "flow crashed").into_response()
        }
        INPUT_BAD_JSON => (StatusCode::OK, "<html>not json</html>").into_response(),
        INPUT_BAD_SHAPE => Json(json!({ "outputs": [] })).into_response(),
        INPUT_EMPTY_TEXT => Json(run_response("")).into_response(),
        other => Json(run_response(&format!("echo: {}", other))).into_response(),
    }
}
