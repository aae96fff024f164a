//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid bind address: {0}")]
    InvalidBindAddress(String),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid database URL format")]
    InvalidDatabaseUrl,

    #[error("Pool min_connections exceeds max_connections")]
    InvalidPoolSize,

    #[error("Pool size exceeds maximum allowed (100)")]
    PoolSizeTooLarge,

    #[error("Invalid completion service timeout")]
    InvalidAiTimeout,

    #[error("Completion service base URL must be http(s)")]
    InvalidAiBaseUrl,

    #[error("Completion service retries exceed maximum allowed ({0})")]
    TooManyAiRetries(u32),

    #[error("Request timeout {request_secs}s is shorter than a results request ({required_secs}s)")]
    RequestTimeoutTooShort { request_secs: u64, required_secs: u64 },

    #[error("Invalid session log timeout")]
    InvalidSessionLogTimeout,
}
