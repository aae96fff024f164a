//! PostgreSQL adapters - Database implementations for the catalog and session log.
//!
//! - `PostgresVendorCatalog` - Lists vendors from `companies`
//! - `PostgresSearchSessionLog` - Appends to `ai_search_sessions`

mod search_session_log;
mod vendor_catalog;

pub use search_session_log::PostgresSearchSessionLog;
pub use vendor_catalog::PostgresVendorCatalog;
