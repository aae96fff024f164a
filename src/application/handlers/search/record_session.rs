//! SessionRecorder - Write-behind logging of search sessions.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::search::SearchSessionRecord;
use crate::ports::SearchSessionLog;

/// Default bound on a single session log write.
pub const DEFAULT_SESSION_LOG_TIMEOUT: Duration = Duration::from_secs(5);

/// Appends search sessions to the log without ever failing the caller.
#[derive(Clone)]
pub struct SessionRecorder {
    log: Arc<dyn SearchSessionLog>,
    timeout: Duration,
}

impl SessionRecorder {
    pub fn new(log: Arc<dyn SearchSessionLog>) -> Self {
        Self {
            log,
            timeout: DEFAULT_SESSION_LOG_TIMEOUT,
        }
    }

    /// Sets the bound on a single write.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Appends one record. Errors and timeouts are logged and absorbed;
    /// returns whether the record was stored.
    pub async fn record(&self, record: &SearchSessionRecord) -> bool {
        match tokio::time::timeout(self.timeout, self.log.append(record)).await {
            Ok(Ok(())) => {
                tracing::debug!(session_id = %record.id, "Search session recorded");
                true
            }
            Ok(Err(err)) => {
                tracing::warn!(session_id = %record.id, error = %err, "Failed to record search session");
                false
            }
            Err(_) => {
                tracing::warn!(
                    session_id = %record.id,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Timed out recording search session"
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySearchSessionLog;
    use crate::domain::foundation::DomainError;
    use crate::domain::search::{CriteriaField, SearchCriteria, Transcript};
    use async_trait::async_trait;

    struct StalledLog;

    #[async_trait]
    impl SearchSessionLog for StalledLog {
        async fn append(&self, _record: &SearchSessionRecord) -> Result<(), DomainError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(())
        }
    }

    fn record() -> SearchSessionRecord {
        SearchSessionRecord::new(
            SearchCriteria::new().with(CriteriaField::Topic, "claims"),
            Some(Transcript::opened()),
        )
    }

    #[tokio::test]
    async fn stores_record() {
        let log = InMemorySearchSessionLog::new();
        let recorder = SessionRecorder::new(Arc::new(log.clone()));

        assert!(recorder.record(&record()).await);
        assert_eq!(log.record_count().await, 1);
    }

    #[tokio::test]
    async fn stores_record_without_transcript() {
        let log = InMemorySearchSessionLog::new();
        let recorder = SessionRecorder::new(Arc::new(log.clone()));

        assert!(recorder.record(&SearchSessionRecord::new(SearchCriteria::new(), None)).await);
        assert_eq!(log.records().await[0].raw_messages, None);
    }

    #[tokio::test]
    async fn absorbs_log_failure() {
        let recorder = SessionRecorder::new(Arc::new(InMemorySearchSessionLog::failing()));
        assert!(!recorder.record(&record()).await);
    }

    #[tokio::test]
    async fn absorbs_stalled_write() {
        let recorder =
            SessionRecorder::new(Arc::new(StalledLog)).with_timeout(Duration::from_millis(20));
        assert!(!recorder.record(&record()).await);
    }
}
