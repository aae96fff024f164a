//! Guided search configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Guided search configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    /// Bound on a single session log write, in seconds
    #[serde(default = "default_session_log_timeout")]
    pub session_log_timeout_secs: u64,
}

impl SearchConfig {
    pub fn session_log_timeout(&self) -> Duration {
        Duration::from_secs(self.session_log_timeout_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.session_log_timeout_secs == 0 || self.session_log_timeout_secs > 60 {
            return Err(ValidationError::InvalidSessionLogTimeout);
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            session_log_timeout_secs: default_session_log_timeout(),
        }
    }
}

fn default_session_log_timeout() -> u64 {
    5
}
