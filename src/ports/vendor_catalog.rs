//! Vendor catalog port - read access to the vendor directory.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::search::CandidateVendor;

/// Read-only access to the vendor catalog.
///
/// Matching filters in process, so the only query needed is a full listing.
#[async_trait]
pub trait VendorCatalog: Send + Sync {
    /// Lists every vendor, ordered by name.
    async fn list_vendors(&self) -> Result<Vec<CandidateVendor>, DomainError>;
}
