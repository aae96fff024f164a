//! Logged search session.

use crate::domain::foundation::{SearchSessionId, Timestamp};

use super::criteria::SearchCriteria;
use super::transcript::Transcript;

/// Immutable analytics row written once per results request. Anonymous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSessionRecord {
    pub id: SearchSessionId,
    pub created_at: Timestamp,
    pub criteria: SearchCriteria,
    pub raw_messages: Option<Transcript>,
}

impl SearchSessionRecord {
    /// Creates a record with a fresh identifier and the current time.
    pub fn new(criteria: SearchCriteria, raw_messages: Option<Transcript>) -> Self {
        Self {
            id: SearchSessionId::new(),
            created_at: Timestamp::now(),
            criteria,
            raw_messages,
        }
    }
}
