//! Consult server library logic.
//!
//! A small axum application in front of the LiveKit credential service:
//! mints room-join tokens for browser clients, serves the read-only agent
//! profile, and optionally hosts the built client as static files.

pub mod api_agent;
pub mod api_token;
pub mod config;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::{Extension, Json, Router};
use consult_types::AgentProfile;
use consult_voice::VoiceService;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// LiveKit credential service.
    pub voice: Arc<VoiceService>,
    /// Read-only agent display profile.
    pub agent: AgentProfile,
}

/// Maximum request body size (64 KiB). Every route is a small GET; anything
/// larger is noise.
const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Builds the application router with all routes.
///
/// When `client_dir` contains a built client (`index.html` present), it is
/// served as the fallback so the API and the UI shell share one origin.
pub fn app(state: AppState, client_dir: &str) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route("/token", get(api_token::issue_token_handler))
        .route("/api/agent/profile", get(api_agent::get_agent_profile_handler));

    let router = if std::path::Path::new(client_dir).join("index.html").exists() {
        tracing::info!(path = %client_dir, "serving client static files");
        let index = format!("{client_dir}/index.html");
        router.fallback_service(ServeDir::new(client_dir).fallback(ServeFile::new(index)))
    } else {
        tracing::info!(path = %client_dir, "client directory not found, skipping static file serving");
        router
    };

    router
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}
