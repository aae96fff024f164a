//! In-Memory Search Session Log Adapter
//!
//! Keeps appended records in memory. Can be put into a failing mode to
//! exercise callers that must tolerate log outages.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::domain::search::SearchSessionRecord;
use crate::ports::SearchSessionLog;

/// In-memory search session log
#[derive(Debug, Clone, Default)]
pub struct InMemorySearchSessionLog {
    records: Arc<RwLock<Vec<SearchSessionRecord>>>,
    failing: bool,
}

impl InMemorySearchSessionLog {
    /// Create an empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a log that rejects every append
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    /// Records appended so far, oldest first
    pub async fn records(&self) -> Vec<SearchSessionRecord> {
        self.records.read().await.clone()
    }

    /// Number of records appended
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

#[async_trait]
impl SearchSessionLog for InMemorySearchSessionLog {
    async fn append(&self, record: &SearchSessionRecord) -> Result<(), DomainError> {
        if self.failing {
            return Err(DomainError::database("search session log unavailable"));
        }
        self.records.write().await.push(record.clone());
        Ok(())
    }
}
