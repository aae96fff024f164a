//! In-Memory Vendor Catalog Adapter
//!
//! Serves a fixed vendor list. Useful for testing and development.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::search::CandidateVendor;
use crate::ports::VendorCatalog;

/// In-memory vendor catalog
#[derive(Debug, Clone, Default)]
pub struct InMemoryVendorCatalog {
    vendors: Arc<RwLock<Vec<CandidateVendor>>>,
    unavailable: bool,
}

impl InMemoryVendorCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding the given vendors
    pub fn with_vendors(vendors: Vec<CandidateVendor>) -> Self {
        Self {
            vendors: Arc::new(RwLock::new(vendors)),
            unavailable: false,
        }
    }

    /// Create a catalog whose listing always fails
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Add a vendor
    pub async fn insert(&self, vendor: CandidateVendor) {
        self.vendors.write().await.push(vendor);
    }
}

#[async_trait]
impl VendorCatalog for InMemoryVendorCatalog {
    async fn list_vendors(&self) -> Result<Vec<CandidateVendor>, DomainError> {
        if self.unavailable {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                "vendor catalog unavailable",
            ));
        }

        let mut vendors = self.vendors.read().await.clone();
        vendors.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(vendors)
    }
}
