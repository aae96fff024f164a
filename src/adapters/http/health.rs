//! Liveness endpoint.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

/// Static facts reported by `/health`.
#[derive(Debug, Clone, Copy)]
pub struct HealthInfo {
    pub completion_service_configured: bool,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    completion_service: &'static str,
}

async fn health(State(info): State<HealthInfo>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        completion_service: if info.completion_service_configured {
            "configured"
        } else {
            "missing"
        },
    })
}

/// GET /health
pub fn health_routes(info: HealthInfo) -> Router {
    Router::new().route("/health", get(health)).with_state(info)
}
