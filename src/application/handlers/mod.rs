//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod search;

pub use search::{
    ContinueDialogueCommand, ContinueDialogueHandler, FindMatchesCommand, FindMatchesHandler,
    FindMatchesResult, SessionRecorder,
};
