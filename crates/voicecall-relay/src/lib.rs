//! Voicecall relay library logic.
//!
//! The relay is the only holder of the provider credential. It exposes a
//! call-creation endpoint that forwards validated requests to the provider
//! and a liveness endpoint.

pub mod api;
pub mod config;
pub mod provider;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Json, Router,
};
use provider::ProviderClient;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across all request handlers.
///
/// Read-only after startup, so handlers need no locking.
#[derive(Debug)]
pub struct AppState {
    /// Provider client carrying the bearer credential.
    pub provider: ProviderClient,
}

impl AppState {
    pub fn new(provider: ProviderClient) -> Self {
        Self { provider }
    }
}

/// Maximum request body size (64 KiB). Call-creation bodies are tiny.
const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Health check handler.
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

fn routes() -> Router {
    Router::new()
        .route("/create-web-call", post(api::create_web_call_handler))
        .route("/health", get(health))
}

/// Builds the application router.
///
/// Routes are served at the root and, when `api_prefix` is non-empty, again
/// under that prefix so the browser client's `/api/...` paths resolve without
/// a rewriting proxy in front.
pub fn app(state: AppState, api_prefix: &str) -> Router {
    let prefix = api_prefix.trim_matches('/');
    let router = if prefix.is_empty() {
        routes()
    } else {
        routes().nest(&format!("/{prefix}"), routes())
    };

    router
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(Extension(Arc::new(state)))
}
