//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, state machine)
//! - `search` - Guided vendor search: criteria, dialogue parsing, matching rules

pub mod foundation;
pub mod search;
