//! ContinueDialogueHandler - Produces the next assistant turn of a guided search.

use std::sync::Arc;

use crate::domain::search::{
    dialogue_system_prompt, parse_reply, CriteriaField, DialogueTurn, SearchCriteria,
    SearchError, Transcript, Turn, TurnRole, GREETING,
};
use crate::ports::{AIProvider, CompletionPurpose, CompletionRequest, Message};

/// Sampling temperature for dialogue turns.
pub const DIALOGUE_TEMPERATURE: f32 = 0.3;

/// Output bound for dialogue turns.
pub const DIALOGUE_MAX_TOKENS: u32 = 600;

/// Command carrying one round of conversation.
#[derive(Debug, Clone)]
pub struct ContinueDialogueCommand {
    /// Full transcript, newest user turn last.
    pub messages: Vec<Turn>,
    /// Criteria known before this turn.
    pub criteria: SearchCriteria,
}

/// Handler for dialogue turns.
pub struct ContinueDialogueHandler {
    ai_provider: Option<Arc<dyn AIProvider>>,
}

impl ContinueDialogueHandler {
    /// `None` means no completion service is configured; every turn then
    /// fails with a configuration error.
    pub fn new(ai_provider: Option<Arc<dyn AIProvider>>) -> Self {
        Self { ai_provider }
    }

    pub async fn handle(&self, cmd: ContinueDialogueCommand) -> Result<DialogueTurn, SearchError> {
        let transcript = Transcript::from_turns(cmd.messages)
            .map_err(|_| SearchError::invalid_request("messages array required"))?;

        let ai_provider = self
            .ai_provider
            .as_ref()
            .ok_or(SearchError::NotConfigured("OPENAI_API_KEY"))?;

        let request = CompletionRequest::new(CompletionPurpose::Dialogue)
            .with_system_prompt(dialogue_system_prompt(&cmd.criteria))
            .with_messages(transcript.turns().iter().map(to_message).collect())
            .with_temperature(DIALOGUE_TEMPERATURE)
            .with_max_tokens(DIALOGUE_MAX_TOKENS);

        let response = ai_provider.complete(request).await.map_err(|e| {
            tracing::error!(error = %e, turns = transcript.len(), "Dialogue completion failed");
            SearchError::ChatFailed(e.to_string())
        })?;

        let content = if response.content.trim().is_empty() {
            GREETING
        } else {
            response.content.as_str()
        };

        let parsed = parse_reply(content);
        if parsed.is_fallback() {
            tracing::warn!("Dialogue reply had no usable criteria block; using raw text");
        }

        let criteria = match parsed.delta() {
            Some(delta) => cmd.criteria.merge(delta),
            None => cmd.criteria,
        };
        let show_results_button = criteria.known(CriteriaField::SubjectPopulation).is_some();

        Ok(DialogueTurn {
            assistant_message: parsed.reply_text().to_string(),
            criteria,
            show_results_button,
        })
    }
}

fn to_message(turn: &Turn) -> Message {
    match turn.role {
        TurnRole::User => Message::user(turn.content.clone()),
        TurnRole::Assistant => Message::assistant(turn.content.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::ports::MessageRole;

    fn opening(user_text: &str) -> Vec<Turn> {
        vec![Turn::assistant(GREETING), Turn::user(user_text)]
    }

    fn handler(provider: &MockAIProvider) -> ContinueDialogueHandler {
        ContinueDialogueHandler::new(Some(Arc::new(provider.clone())))
    }

    #[tokio::test]
    async fn merges_extracted_criteria_and_signals_readiness() {
        let provider = MockAIProvider::new().with_response(
            "Which years do you need?\n---JSON---\n\
             {\"criteria\":{\"topic\":\"healthcare claims\",\"subject_population\":\"US hospitals\",\
             \"geography\":\"US\",\"years_dates\":null},\"nextMessage\":\"Which years do you need?\"}",
        );

        let turn = handler(&provider)
            .handle(ContinueDialogueCommand {
                messages: opening("Healthcare claims data for US hospitals, any years"),
                criteria: SearchCriteria::new(),
            })
            .await
            .unwrap();

        assert_eq!(turn.assistant_message, "Which years do you need?");
        assert_eq!(turn.criteria.topic.as_deref(), Some("healthcare claims"));
        assert_eq!(turn.criteria.geography.as_deref(), Some("US"));
        assert!(turn.show_results_button);
    }

    #[tokio::test]
    async fn sends_system_prompt_and_role_tagged_transcript() {
        let provider = MockAIProvider::new().with_response("Who is the data about?");
        handler(&provider)
            .handle(ContinueDialogueCommand {
                messages: opening("claims"),
                criteria: SearchCriteria::new().with(CriteriaField::Topic, "claims"),
            })
            .await
            .unwrap();

        let call = &provider.get_calls()[0];
        assert_eq!(call.purpose, CompletionPurpose::Dialogue);
        assert_eq!(call.temperature, Some(DIALOGUE_TEMPERATURE));
        assert_eq!(call.max_tokens, Some(DIALOGUE_MAX_TOKENS));
        assert!(call
            .system_prompt
            .as_deref()
            .unwrap()
            .contains("\"topic\": \"claims\""));
        assert_eq!(call.messages[0].role, MessageRole::Assistant);
        assert_eq!(call.messages[1], Message::user("claims"));
    }

    #[tokio::test]
    async fn fallback_keeps_criteria_and_uses_raw_text() {
        let provider = MockAIProvider::new().with_response("  Tell me more about {the data}.  ");
        let criteria = SearchCriteria::new().with(CriteriaField::Topic, "claims");

        let turn = handler(&provider)
            .handle(ContinueDialogueCommand {
                messages: opening("hmm"),
                criteria: criteria.clone(),
            })
            .await
            .unwrap();

        assert_eq!(turn.assistant_message, "Tell me more about {the data}.");
        assert_eq!(turn.criteria, criteria);
        assert!(!turn.show_results_button);
    }

    #[tokio::test]
    async fn blank_delta_values_do_not_erase_known_criteria() {
        let provider = MockAIProvider::new().with_response(
            "Next?\n---JSON---\n{\"criteria\":{\"subject_population\":\"  \",\"topic\":\"\"}}",
        );
        let criteria = SearchCriteria::new()
            .with(CriteriaField::Topic, "claims")
            .with(CriteriaField::SubjectPopulation, "hospitals");

        let turn = handler(&provider)
            .handle(ContinueDialogueCommand {
                messages: opening("not sure"),
                criteria: criteria.clone(),
            })
            .await
            .unwrap();

        assert_eq!(turn.criteria, criteria);
        assert_eq!(turn.assistant_message, "Next?");
        assert!(turn.show_results_button);
    }

    #[tokio::test]
    async fn empty_completion_repeats_greeting() {
        let provider = MockAIProvider::new().with_response("   ");
        let turn = handler(&provider)
            .handle(ContinueDialogueCommand {
                messages: opening("hi"),
                criteria: SearchCriteria::new(),
            })
            .await
            .unwrap();
        assert_eq!(turn.assistant_message, GREETING);
    }

    #[tokio::test]
    async fn rejects_empty_transcript_before_calling_service() {
        let provider = MockAIProvider::new();
        let err = handler(&provider)
            .handle(ContinueDialogueCommand {
                messages: vec![],
                criteria: SearchCriteria::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SearchError::InvalidRequest(_)));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn unconfigured_service_is_a_configuration_error() {
        let err = ContinueDialogueHandler::new(None)
            .handle(ContinueDialogueCommand {
                messages: opening("claims"),
                criteria: SearchCriteria::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SearchError::NotConfigured(_)));
        assert_eq!(err.to_string(), "OPENAI_API_KEY not configured");
    }

    #[tokio::test]
    async fn service_failure_is_surfaced_without_retry() {
        let provider = MockAIProvider::new().with_error(MockError::Unavailable {
            message: "overloaded".to_string(),
        });

        let err = handler(&provider)
            .handle(ContinueDialogueCommand {
                messages: opening("claims"),
                criteria: SearchCriteria::new(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, SearchError::ChatFailed(_)));
        assert_eq!(provider.call_count(), 1);
    }
}
