//! Transcript of a guided search conversation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Fixed opening line of every guided search.
pub const GREETING: &str = "What are you searching for?";

/// Who produced a turn. Clients may only send these two roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

/// One entry of the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
}

impl Turn {
    /// Creates a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    /// Creates an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered, append-only list of turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript(Vec<Turn>);

impl Transcript {
    /// Starts a transcript with the fixed greeting.
    pub fn opened() -> Self {
        Self(vec![Turn::assistant(GREETING)])
    }

    /// Wraps turns received from a client, rejecting an empty list.
    pub fn from_turns(turns: Vec<Turn>) -> Result<Self, ValidationError> {
        if turns.is_empty() {
            return Err(ValidationError::empty_field("messages"));
        }
        Ok(Self(turns))
    }

    /// Appends a turn.
    pub fn push(&mut self, turn: Turn) {
        self.0.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of turns the user has sent so far.
    pub fn user_turn_count(&self) -> usize {
        self.0.iter().filter(|t| t.role == TurnRole::User).count()
    }
}
