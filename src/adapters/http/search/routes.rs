//! HTTP routes for guided search endpoints.

use axum::{routing::post, Router};

use super::handlers::{chat, results, SearchHandlers};

/// Creates the search router, mounted under `/api/search/ai`.
pub fn search_routes(handlers: SearchHandlers) -> Router {
    Router::new()
        .route("/chat", post(chat))
        .route("/results", post(results))
        .with_state(handlers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::adapters::ai::MockAIProvider;
    use crate::adapters::storage::{InMemorySearchSessionLog, InMemoryVendorCatalog};
    use crate::application::{ContinueDialogueHandler, FindMatchesHandler, SessionRecorder};
    use crate::ports::AIProvider;

    fn router(provider: Option<MockAIProvider>, catalog: InMemoryVendorCatalog) -> Router {
        let provider = provider.map(|p| Arc::new(p) as Arc<dyn AIProvider>);
        let handlers = SearchHandlers::new(
            Arc::new(ContinueDialogueHandler::new(provider.clone())),
            Arc::new(FindMatchesHandler::new(
                provider,
                Arc::new(catalog),
                SessionRecorder::new(Arc::new(InMemorySearchSessionLog::new())),
            )),
        );
        search_routes(handlers)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn chat_requires_messages() {
        let response = router(Some(MockAIProvider::new()), InMemoryVendorCatalog::new())
            .oneshot(post_json("/chat", r#"{"messages":[],"criteria":{}}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "messages array required");
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let response = router(Some(MockAIProvider::new()), InMemoryVendorCatalog::new())
            .oneshot(post_json("/chat", "{not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn results_requires_criteria() {
        let response = router(Some(MockAIProvider::new()), InMemoryVendorCatalog::new())
            .oneshot(post_json("/results", r#"{"rawMessages":null}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["error"], "criteria object required");
    }

    #[tokio::test]
    async fn unconfigured_service_is_server_error() {
        let response = router(None, InMemoryVendorCatalog::new())
            .oneshot(post_json("/results", r#"{"criteria":{}}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            json_body(response).await["error"],
            "OPENAI_API_KEY not configured"
        );
    }

    #[tokio::test]
    async fn unavailable_catalog_returns_empty_results() {
        let provider = MockAIProvider::new().with_response("Hospital claims data.");
        let response = router(Some(provider), InMemoryVendorCatalog::unavailable())
            .oneshot(post_json("/results", r#"{"criteria":{"topic":"claims"}}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["assistantSummary"], "Hospital claims data.");
        assert_eq!(body["results"], serde_json::json!([]));
    }
}
