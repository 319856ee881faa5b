//! Relay routes

use crate::config::WebUiConfig;
use crate::error::ApiError;
use crate::logs::logs_sse;
use crate::page::index_html;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use socio_core::{
    project_series, ChartConfig, ChartRequest, ChartResponse, ChatReply, ChatRequest, FlowClient,
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

/// Shared state for relay handlers
#[derive(Clone)]
pub struct AppState {
    /// Upstream flow
    pub flow: Arc<dyn FlowClient>,
    /// Projection settings
    pub chart_config: Arc<ChartConfig>,
    /// Server start time
    pub start_time: Instant,
    /// Whether the page should open the log stream
    pub logs_enabled: bool,
}

impl AppState {
    /// State for `flow` with the given projection settings
    pub fn new(flow: Arc<dyn FlowClient>, chart_config: ChartConfig) -> Self {
        Self {
            flow,
            chart_config: Arc::new(chart_config),
            start_time: Instant::now(),
            logs_enabled: false,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status (ok/error)
    pub status: String,
    /// Upstream flow client name
    pub flow: String,
    /// Uptime in seconds
    pub uptime: u64,
    /// Current timestamp
    pub timestamp: String,
}

/// Build the relay router
pub fn build_router(mut state: AppState, config: &WebUiConfig) -> Router {
    state.logs_enabled = config.logs_enabled;

    let mut router = Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .route("/api/chat", post(chat_handler))
        .route("/api/chart", post(chart_handler));
    if config.logs_enabled {
        router = router.route("/logs", get(logs_sse));
    }

    let mut router = router
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if config.cors_enabled {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        router = router.layer(cors);
    }

    router
}

async fn index(State(state): State<AppState>) -> Html<String> {
    Html(index_html(state.logs_enabled))
}

/// `GET /health`
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        flow: state.flow.name().to_string(),
        uptime: state.start_time.elapsed().as_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// `POST /api/chat`: relay one user message and return the reply with any
/// table and chart found in it
pub async fn chat_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ChatRequest>, JsonRejection>,
) -> std::result::Result<Json<ChatReply>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ApiError::BadRequest("Message must not be empty".to_string()));
    }

    info!(
        "Relaying message to {} ({} chars)",
        state.flow.name(),
        message.len()
    );
    let text = state.flow.run(message).await?;
    let reply = ChatReply::from_assistant_text(text, &state.chart_config);
    debug!(
        "Reply has table: {}, chart: {}",
        reply.data.is_some(),
        reply.data.as_ref().is_some_and(|d| d.chart.is_some())
    );

    Ok(Json(reply))
}

/// `POST /api/chart`: project an already parsed table
pub async fn chart_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ChartRequest>, JsonRejection>,
) -> std::result::Result<Json<ChartResponse>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let chart = project_series(&request.table, &state.chart_config)
        .map_err(|e| ApiError::Unprocessable(e.to_string()))?
        .ok_or_else(|| ApiError::Unprocessable("Table has no headers or rows".to_string()))?;

    Ok(Json(ChartResponse {
        kind: request.kind,
        chart,
    }))
}
