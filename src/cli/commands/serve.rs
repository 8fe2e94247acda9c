//! Web UI server.
//!
//! Serves the single-page summarizer and the JSON endpoints it calls.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::PrecisError;
use crate::orchestrator::Orchestrator;
use crate::session::SessionState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

const INDEX_HTML: &str = include_str!("../../../assets/index.html");

/// Shared application state.
struct AppState {
    orchestrator: Orchestrator,
}

/// Run the web UI server.
pub async fn run_serve(
    host: Option<String>,
    port: Option<u16>,
    settings: Settings,
) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::Serve, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let orchestrator = Orchestrator::new(&settings)?;
    if !orchestrator.is_configured() {
        Output::warning(&format!(
            "No API key configured. Set {} or llm.api_key before summarizing.",
            settings.llm.api_key_env
        ));
    }

    let app = router(orchestrator);

    let host = host.unwrap_or(settings.server.host);
    let port = port.unwrap_or(settings.server.port);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Precis");
    println!();
    Output::success(&format!("Open http://{} in your browser", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Page", "GET  /");
    Output::kv("State", "GET  /api/state");
    Output::kv("Summarize", "POST /api/summarize");
    Output::kv("Clear", "POST /api/clear");
    Output::kv("Health", "GET  /health");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router around an orchestrator.
fn router(orchestrator: Orchestrator) -> Router {
    let state = Arc::new(AppState { orchestrator });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/state", get(get_state))
        .route("/api/summarize", post(summarize))
        .route("/api/clear", post(clear))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct SummarizeRequest {
    #[serde(default)]
    url: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    kind: String,
    /// "warning" or "error".
    level: String,
    message: String,
}

fn error_response(e: PrecisError) -> Response {
    let status = match &e {
        PrecisError::Configuration(_)
        | PrecisError::InvalidInput(_)
        | PrecisError::UnsupportedSource(_) => StatusCode::BAD_REQUEST,
        PrecisError::TranscriptUnavailable(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PrecisError::SummarizationFailed(_) => StatusCode::BAD_GATEWAY,
        PrecisError::Busy => StatusCode::CONFLICT,
        PrecisError::Io(_) | PrecisError::TomlParse(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if e.is_warning() {
        warn!("Run halted: {}", e);
    } else {
        error!("Run failed: {}", e);
    }

    (
        status,
        Json(ErrorResponse {
            kind: e.kind().to_string(),
            level: if e.is_warning() { "warning" } else { "error" }.to_string(),
            message: e.to_string(),
        }),
    )
        .into_response()
}

// === Handlers ===

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn get_state(State(state): State<Arc<AppState>>) -> Json<SessionState> {
    Json(state.orchestrator.state().await)
}

async fn summarize(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SummarizeRequest>,
) -> Response {
    match state.orchestrator.run(&req.url).await {
        Ok(session) => Json(session).into_response(),
        Err(e) => error_response(e),
    }
}

async fn clear(State(state): State<Arc<AppState>>) -> Json<SessionState> {
    Json(state.orchestrator.clear().await)
}
