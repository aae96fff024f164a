//! HTTP handlers for guided search endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{
    ContinueDialogueCommand, ContinueDialogueHandler, FindMatchesCommand, FindMatchesHandler,
};
use crate::domain::search::SearchError;

use super::dto::{ChatRequest, ChatResponse, ErrorResponse, ResultsRequest, ResultsResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SearchHandlers {
    dialogue_handler: Arc<ContinueDialogueHandler>,
    matches_handler: Arc<FindMatchesHandler>,
}

impl SearchHandlers {
    pub fn new(
        dialogue_handler: Arc<ContinueDialogueHandler>,
        matches_handler: Arc<FindMatchesHandler>,
    ) -> Self {
        Self {
            dialogue_handler,
            matches_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/search/ai/chat - Next dialogue turn
pub async fn chat(
    State(handlers): State<SearchHandlers>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return handle_rejection(rejection),
    };

    let cmd = ContinueDialogueCommand {
        messages: req.messages.unwrap_or_default(),
        criteria: req.criteria.unwrap_or_default(),
    };

    match handlers.dialogue_handler.handle(cmd).await {
        Ok(turn) => (StatusCode::OK, Json(ChatResponse::from(turn))).into_response(),
        Err(e) => handle_search_error(e),
    }
}

/// POST /api/search/ai/results - Ranked vendor matches
pub async fn results(
    State(handlers): State<SearchHandlers>,
    payload: Result<Json<ResultsRequest>, JsonRejection>,
) -> Response {
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return handle_rejection(rejection),
    };

    let Some(criteria) = req.criteria else {
        return handle_search_error(SearchError::invalid_request("criteria object required"));
    };

    let cmd = FindMatchesCommand {
        criteria,
        raw_messages: req.raw_messages,
    };

    match handlers.matches_handler.handle(cmd).await {
        Ok(result) => (StatusCode::OK, Json(ResultsResponse::from(result))).into_response(),
        Err(e) => handle_search_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_rejection(rejection: JsonRejection) -> Response {
    tracing::debug!(error = %rejection, "Rejected search request body");
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(rejection.body_text())),
    )
        .into_response()
}

fn handle_search_error(error: SearchError) -> Response {
    match error {
        SearchError::InvalidRequest(msg) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(msg)),
        )
            .into_response(),
        e @ SearchError::NotConfigured(_) => {
            tracing::error!(error = %e, "Completion service not configured");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::not_configured(e.to_string())),
            )
                .into_response()
        }
        SearchError::ChatFailed(_) => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse::upstream("Chat failed")),
        )
            .into_response(),
    }
}
