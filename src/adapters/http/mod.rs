//! HTTP adapters - REST API implementations.
//!
//! `app_router` assembles the search and health routers and the tower-http
//! middleware stack (request ids, tracing, timeout, compression, CORS).

pub mod health;
pub mod search;

pub use health::{health_routes, HealthInfo};
pub use search::{search_routes, SearchHandlers};

use std::time::Duration;

use axum::{body::Body, Router};
use axum::http::{HeaderValue, Request};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Path prefix of the guided search API.
pub const SEARCH_API_PREFIX: &str = "/api/search/ai";

/// Builds the full application router.
pub fn app_router(
    search: SearchHandlers,
    health: HealthInfo,
    request_timeout: Duration,
    cors_origins: &[String],
) -> Router {
    let trace = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");
        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    });

    Router::new()
        .nest(SEARCH_API_PREFIX, search_routes(search))
        .merge(health_routes(health))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(trace)
                .layer(TimeoutLayer::new(request_timeout))
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(CompressionLayer::new())
                .layer(cors_layer(cors_origins)),
        )
}

/// Any origin when none are configured; otherwise the valid configured ones.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
