//! Search session log port - append-only analytics log.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::search::SearchSessionRecord;

/// Write-behind log of completed searches. No reads are defined.
#[async_trait]
pub trait SearchSessionLog: Send + Sync {
    /// Appends one record.
    async fn append(&self, record: &SearchSessionRecord) -> Result<(), DomainError>;
}
