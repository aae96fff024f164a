//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - completion service (OpenAI, mock)
//! - `postgres` - vendor catalog and session log
//! - `storage` - in-memory catalog and session log
//! - `http` - axum routes

pub mod ai;
pub mod http;
pub mod postgres;
pub mod storage;
