//! Application configuration module
//!
//! Type-safe configuration loaded from environment variables with the
//! `config` and `dotenvy` crates. Variables carry the `VENDOR_MATCH` prefix
//! and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use vendor_match::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod database;
mod error;
mod search;
mod server;

pub use ai::{AiConfig, OPENAI_API_KEY_VAR};
pub use database::DatabaseConfig;
pub use error::{ConfigError, ValidationError};
pub use search::SearchConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment, logging)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (vendor catalog and session log)
    pub database: DatabaseConfig,

    /// Completion service configuration
    #[serde(default)]
    pub ai: AiConfig,

    /// Guided search tuning
    #[serde(default)]
    pub search: SearchConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with the `VENDOR_MATCH` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Falls back to `OPENAI_API_KEY` for the completion service key
    ///
    /// # Environment Variable Format
    ///
    /// - `VENDOR_MATCH__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `VENDOR_MATCH__DATABASE__URL=...` -> `database.url = ...`
    /// - `VENDOR_MATCH__AI__OPENAI_API_KEY=...` -> `ai.openai_api_key = ...`
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config: AppConfig = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("VENDOR_MATCH")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        config.ai = config
            .ai
            .with_key_fallback(std::env::var(OPENAI_API_KEY_VAR).ok());

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// The completion service key is not required; see [`AiConfig::validate`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.ai.validate()?;
        self.search.validate()?;
        self.validate_request_budget()
    }

    /// A results request makes three completion calls in sequence and
    /// writes the session log; all of it must fit in the request timeout.
    fn validate_request_budget(&self) -> Result<(), ValidationError> {
        let required_secs =
            3 * self.ai.worst_case_call_secs() + self.search.session_log_timeout_secs;
        if self.server.request_timeout_secs <= required_secs {
            return Err(ValidationError::RequestTimeoutTooShort {
                request_secs: self.server.request_timeout_secs,
                required_secs,
            });
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
