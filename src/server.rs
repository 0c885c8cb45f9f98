//! HTTP surface for the relay.

use crate::relay::Relay;
use axum::{
    body::Body,
    extract::{DefaultBodyLimit, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tokio::signal;
use tower_http::trace::TraceLayer;

pub const ANALYZE_PATH: &str = "/api/analyze";
/// Path the existing frontend already posts to.
pub const NETLIFY_ANALYZE_PATH: &str = "/.netlify/functions/analyze";

/// Largest accepted request body, the Netlify Functions payload cap.
pub const MAX_BODY_BYTES: usize = 6 * 1024 * 1024;

pub fn build_router(relay: Arc<Relay>) -> Router {
    Router::new()
        .route(ANALYZE_PATH, post(analyze))
        .route(NETLIFY_ANALYZE_PATH, post(analyze))
        .route("/health", get(health_check))
        // The relay enforces MAX_BODY_BYTES itself so oversize bodies still get a JSON error.
        .layer(DefaultBodyLimit::disable())
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
        .with_state(relay)
}

// Raw body rather than `Json<_>` so malformed and oversized bodies get the relay's JSON errors.
async fn analyze(State(relay): State<Arc<Relay>>, body: Body) -> impl IntoResponse {
    relay.handle_body(body, MAX_BODY_BYTES).await
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "product-lens-relay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
