//! HTTP adapter for guided search endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ChatRequest, ChatResponse, ErrorResponse, ResultsRequest, ResultsResponse,
    VendorMatchResponse,
};
pub use handlers::SearchHandlers;
pub use routes::search_routes;
