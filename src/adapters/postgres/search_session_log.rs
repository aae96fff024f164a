//! PostgreSQL implementation of SearchSessionLog.
//!
//! Appends rows to `ai_search_sessions`. The transcript goes into the
//! `raw_messages` JSONB column.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::foundation::DomainError;
use crate::domain::search::SearchSessionRecord;
use crate::ports::SearchSessionLog;

/// PostgreSQL implementation of SearchSessionLog.
#[derive(Clone)]
pub struct PostgresSearchSessionLog {
    pool: PgPool,
}

impl PostgresSearchSessionLog {
    /// Creates a new PostgresSearchSessionLog.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SearchSessionLog for PostgresSearchSessionLog {
    async fn append(&self, record: &SearchSessionRecord) -> Result<(), DomainError> {
        let raw_messages = record
            .raw_messages
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| {
                DomainError::database(format!("Failed to serialize raw messages: {}", e))
            })?;

        let c = &record.criteria;

        sqlx::query(
            r#"
            INSERT INTO ai_search_sessions (
                id, created_at, topic, subject_population, years_dates, ownership,
                data_type, data_use, geography, other_details, raw_messages
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11::jsonb)
            "#,
        )
        .bind(record.id.as_uuid())
        .bind(record.created_at.as_datetime())
        .bind(c.topic.as_deref())
        .bind(c.subject_population.as_deref())
        .bind(c.years_dates.as_deref())
        .bind(c.ownership.as_deref())
        .bind(c.data_type.as_deref())
        .bind(c.data_use.as_deref())
        .bind(c.geography.as_deref())
        .bind(c.other_details.as_deref())
        .bind(raw_messages)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert search session: {}", e)))?;

        Ok(())
    }
}
