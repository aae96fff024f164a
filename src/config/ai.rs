//! Completion service configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::ai::MAX_OPENAI_RETRIES;

/// Unprefixed variable consulted when `ai.openai_api_key` is not set.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Completion service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// OpenAI API key; absent means searches fail with a configuration error
    pub openai_api_key: Option<Secret<String>>,

    /// Chat model
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-call timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Retries on transient failures
    #[serde(default)]
    pub max_retries: u32,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// The API key, if one is set and non-blank
    pub fn api_key(&self) -> Option<&str> {
        self.openai_api_key
            .as_ref()
            .map(|k| k.expose_secret().as_str())
            .filter(|k| !k.trim().is_empty())
    }

    /// Longest a single retried completion may take, backoff included
    pub fn worst_case_call_secs(&self) -> u64 {
        let retries = self.max_retries.min(MAX_OPENAI_RETRIES);
        let backoff = (1u64 << retries) - 1;
        self.timeout_secs * (u64::from(retries) + 1) + backoff
    }

    /// Check if the completion service is configured
    pub fn has_openai(&self) -> bool {
        self.api_key().is_some()
    }

    /// Fills the key from `fallback` when none was configured
    pub fn with_key_fallback(mut self, fallback: Option<String>) -> Self {
        if !self.has_openai() {
            self.openai_api_key = fallback.filter(|k| !k.trim().is_empty()).map(Secret::new);
        }
        self
    }

    /// Validate completion service configuration
    ///
    /// A missing key is not an error here.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidAiTimeout);
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidAiBaseUrl);
        }
        if self.max_retries > MAX_OPENAI_RETRIES {
            return Err(ValidationError::TooManyAiRetries(MAX_OPENAI_RETRIES));
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_retries: 0,
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_timeout() -> u64 {
    30
}
