//! In-memory adapters for the catalog and session log.
//!
//! Used by tests and for running without a database.

mod in_memory_search_session_log;
mod in_memory_vendor_catalog;

pub use in_memory_search_session_log::InMemorySearchSessionLog;
pub use in_memory_vendor_catalog::InMemoryVendorCatalog;
