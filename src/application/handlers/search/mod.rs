//! Guided search command handlers.

mod continue_dialogue;
mod find_matches;
mod record_session;

pub use continue_dialogue::{
    ContinueDialogueCommand, ContinueDialogueHandler, DIALOGUE_MAX_TOKENS, DIALOGUE_TEMPERATURE,
};
pub use find_matches::{FindMatchesCommand, FindMatchesHandler, FindMatchesResult};
pub use record_session::{SessionRecorder, DEFAULT_SESSION_LOG_TIMEOUT};
