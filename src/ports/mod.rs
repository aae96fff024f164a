//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - text completion service
//! - `VendorCatalog` - vendor directory listing
//! - `SearchSessionLog` - append-only log of search sessions

mod ai_provider;
mod search_session_log;
mod vendor_catalog;

pub use ai_provider::{
    AIError, AIProvider, CompletionPurpose, CompletionRequest, CompletionResponse, FinishReason,
    Message, MessageRole, ProviderInfo, TokenUsage,
};
pub use search_session_log::SearchSessionLog;
pub use vendor_catalog::VendorCatalog;
