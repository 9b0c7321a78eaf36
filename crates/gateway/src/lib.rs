//! HTTP chat proxy for hearth.
//!
//! Sits between a local frontend and the configured chat server,
//! handling CORS and exposing a clean REST surface:
//!
//! - `GET /` — health check with the active provider and model
//! - `POST /chat` — tutoring-style completion over supplied material
//!
//! Built on Axum. The upstream client is resolved once at startup and
//! shared read-only.

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

use hearth_core::error::UpstreamError;
use hearth_core::message::Message;
use hearth_core::model::ChatModel;

/// Shared application state for the gateway.
pub struct GatewayState {
    pub model: Arc<dyn ChatModel>,
    pub model_name: String,
}

type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
pub fn build_router(state: SharedState) -> Router {
    // CORS for the local dev frontends this proxy fronts.
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([
            "http://localhost:5173".parse().unwrap(),
            "http://localhost:3000".parse().unwrap(),
            "http://127.0.0.1:5173".parse().unwrap(),
        ]))
        .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(health_handler))
        .route("/chat", post(chat_handler))
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1 MB body limit
        .layer(cors)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the gateway HTTP server.
pub async fn start(config: hearth_config::AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let model = hearth_providers::build_from_config(&config)?;
    let model_name =
        hearth_providers::router::configured_model(&config).unwrap_or_else(|| "unknown".into());

    let state = Arc::new(GatewayState { model, model_name });
    let router = build_router(state);

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    info!(addr = %addr, "Starting chat gateway");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

// --- Request/response types ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub question: String,
    #[serde(default)]
    pub slide_content: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub debug: ChatDebug,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatDebug {
    pub question: String,
    pub slide_content_length: usize,
    pub model: String,
}

// --- Handlers ---

async fn health_handler(State(state): State<SharedState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "hearth chat gateway",
        "provider": state.model.name(),
        "model": state.model_name,
    }))
}

async fn chat_handler(
    State(state): State<SharedState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<serde_json::Value>)> {
    let prompt = format!(
        "You are an AI tutor helping a student understand their learning \
         material.\n\n\
         Current Slide Content:\n{}\n\n\
         Student Question: {}\n\n\
         Please provide a helpful, educational response based on the slide \
         content and the student's question.",
        request.slide_content, request.question,
    );

    info!(
        question_len = request.question.len(),
        context_len = request.slide_content.len(),
        "Handling chat request"
    );

    let messages = [Message::user(prompt)];
    match state.model.complete(&messages, 0.7).await {
        Ok(response) => Ok(Json(ChatResponse {
            debug: ChatDebug {
                question: request.question,
                slide_content_length: request.slide_content.len(),
                model: state.model_name.clone(),
            },
            response,
        })),
        Err(e) => {
            warn!(error = %e, "Upstream chat call failed");
            Err(upstream_error_response(e))
        }
    }
}

fn upstream_error_response(error: UpstreamError) -> (StatusCode, Json<serde_json::Value>) {
    let status = match &error {
        UpstreamError::Network(_) => StatusCode::SERVICE_UNAVAILABLE,
        UpstreamError::Api { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        UpstreamError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
        UpstreamError::StreamingUnsupported(_) => StatusCode::NOT_IMPLEMENTED,
    };

    (status, Json(serde_json::json!({ "detail": error.to_string() })))
}
