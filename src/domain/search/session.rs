//! Client-side guided search session.
//!
//! The server is stateless per turn; this is the state a client keeps between
//! turns: transcript, criteria and the phase of the dialogue.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{StateMachine, ValidationError};

use super::criteria::SearchCriteria;
use super::readiness::can_offer_results;
use super::transcript::{Transcript, Turn};

/// Phase of a guided search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchPhase {
    AskingQuestions,
    ReadyForResults,
    ShowingResults,
}

impl StateMachine for SearchPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SearchPhase::*;
        matches!(
            (self, target),
            (AskingQuestions, ReadyForResults)
                | (ReadyForResults, ShowingResults)
                | (ShowingResults, ShowingResults)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SearchPhase::*;
        match self {
            AskingQuestions => vec![ReadyForResults],
            ReadyForResults => vec![ShowingResults],
            ShowingResults => vec![ShowingResults],
        }
    }
}

/// What the dialogue service returned for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogueTurn {
    pub criteria: SearchCriteria,
    pub assistant_message: String,
    pub show_results_button: bool,
}

/// One user's guided search, as held by the client.
#[derive(Debug, Clone)]
pub struct GuidedSearch {
    transcript: Transcript,
    criteria: SearchCriteria,
    phase: SearchPhase,
    last_turn_signalled: bool,
    awaiting_reply: bool,
}

impl Default for GuidedSearch {
    fn default() -> Self {
        Self::new()
    }
}

impl GuidedSearch {
    /// Opens a search with the greeting and empty criteria.
    pub fn new() -> Self {
        Self {
            transcript: Transcript::opened(),
            criteria: SearchCriteria::new(),
            phase: SearchPhase::AskingQuestions,
            last_turn_signalled: false,
            awaiting_reply: false,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn criteria(&self) -> &SearchCriteria {
        &self.criteria
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    /// Appends a user message. Turns are not pipelined: the previous reply
    /// must have arrived first.
    pub fn send(&mut self, text: &str) -> Result<&Transcript, ValidationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ValidationError::empty_field("message"));
        }
        if self.awaiting_reply {
            return Err(ValidationError::invalid_format(
                "message",
                "previous turn has not been answered yet",
            ));
        }
        self.transcript.push(Turn::user(text));
        self.awaiting_reply = true;
        Ok(&self.transcript)
    }

    /// Drops the pending user turn after a failed request so it can be resent.
    pub fn abandon_pending(&mut self) -> Option<String> {
        if !self.awaiting_reply {
            return None;
        }
        self.awaiting_reply = false;
        let mut turns = self.transcript.turns().to_vec();
        let pending = turns.pop().map(|t| t.content);
        self.transcript = Transcript::from_turns(turns).unwrap_or_else(|_| Transcript::opened());
        pending
    }

    /// Records the service's reply and advances the phase when results can be offered.
    pub fn receive(&mut self, turn: DialogueTurn) {
        self.criteria = turn.criteria;
        self.last_turn_signalled = turn.show_results_button;
        self.transcript.push(Turn::assistant(turn.assistant_message));
        self.awaiting_reply = false;

        if self.can_show_results() && self.phase == SearchPhase::AskingQuestions {
            self.phase = SearchPhase::ReadyForResults;
        }
    }

    /// Readiness as the client evaluates it.
    pub fn can_show_results(&self) -> bool {
        can_offer_results(self.last_turn_signalled, self.transcript.user_turn_count())
    }

    /// Moves to the results phase; repeatable so results can be re-requested.
    pub fn show_results(&mut self) -> Result<(), ValidationError> {
        self.phase = self.phase.transition_to(SearchPhase::ShowingResults)?;
        Ok(())
    }
}
