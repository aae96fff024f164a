//! FindMatchesHandler - Turns search criteria into ranked vendor matches.
//!
//! Steps run in order: record the session (concurrently with the summary),
//! summarize, load the catalog, derive topics, filter candidates, rank.
//! Only a missing completion service fails the request. An unreadable
//! catalog reads as an empty one and every model-facing step has a
//! deterministic fallback.

use std::sync::Arc;

use crate::domain::search::{
    apply_ranking, clean_summary, filter_candidates, parse_ranking, parse_topics, rank_prompt,
    summary_prompt, topics_prompt, CandidateVendor, MatchResult, RankingParse, SearchCriteria,
    SearchError, SearchSessionRecord, Transcript, FALLBACK_SUMMARY, NO_MATCH_FALLBACK_LIMIT,
    NO_MATCH_REASON,
};
use crate::ports::{AIProvider, CompletionPurpose, CompletionRequest, MessageRole, VendorCatalog};

use super::record_session::SessionRecorder;

pub const SUMMARY_TEMPERATURE: f32 = 0.2;
pub const SUMMARY_MAX_TOKENS: u32 = 80;
pub const TOPICS_TEMPERATURE: f32 = 0.3;
pub const TOPICS_MAX_TOKENS: u32 = 200;
pub const RANKING_TEMPERATURE: f32 = 0.2;
pub const RANKING_MAX_TOKENS: u32 = 1500;

/// Command to find vendors matching a finished dialogue.
#[derive(Debug, Clone)]
pub struct FindMatchesCommand {
    pub criteria: SearchCriteria,
    /// Transcript to store alongside the criteria, if the client sent one.
    pub raw_messages: Option<Transcript>,
}

/// Result of a matching run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindMatchesResult {
    pub assistant_summary: String,
    pub results: Vec<MatchResult>,
}

/// Handler for the matching pipeline.
pub struct FindMatchesHandler {
    ai_provider: Option<Arc<dyn AIProvider>>,
    catalog: Arc<dyn VendorCatalog>,
    recorder: SessionRecorder,
}

impl FindMatchesHandler {
    pub fn new(
        ai_provider: Option<Arc<dyn AIProvider>>,
        catalog: Arc<dyn VendorCatalog>,
        recorder: SessionRecorder,
    ) -> Self {
        Self {
            ai_provider,
            catalog,
            recorder,
        }
    }

    pub async fn handle(&self, cmd: FindMatchesCommand) -> Result<FindMatchesResult, SearchError> {
        let ai_provider = self
            .ai_provider
            .as_deref()
            .ok_or(SearchError::NotConfigured("OPENAI_API_KEY"))?;

        let criteria_text = cmd.criteria.render_summary();
        let record = SearchSessionRecord::new(cmd.criteria, cmd.raw_messages);

        // 1-2. Record and summarize; neither depends on the other
        let (_, generated_summary) = futures::join!(
            self.recorder.record(&record),
            summarize(ai_provider, &criteria_text)
        );
        let assistant_summary = generated_summary
            .clone()
            .unwrap_or_else(|| FALLBACK_SUMMARY.to_string());

        // 3. Load catalog
        let vendors = match self.catalog.list_vendors().await {
            Ok(vendors) => vendors,
            Err(e) => {
                tracing::warn!(session_id = %record.id, error = %e, "Failed to load vendor catalog");
                Vec::new()
            }
        };

        if vendors.is_empty() {
            tracing::info!(session_id = %record.id, "Vendor catalog is empty");
            return Ok(FindMatchesResult {
                assistant_summary,
                results: Vec::new(),
            });
        }

        // 4-5. Topics and candidate filter
        let topics = extract_topics(ai_provider, &criteria_text, generated_summary.as_deref()).await;
        let candidates = filter_candidates(&vendors, &topics);

        // 6. Nothing matched: show the head of the catalog
        if candidates.is_empty() {
            tracing::warn!(
                session_id = %record.id,
                topics = topics.len(),
                "No topic matches; returning first vendors"
            );
            return Ok(FindMatchesResult {
                assistant_summary,
                results: vendors
                    .into_iter()
                    .take(NO_MATCH_FALLBACK_LIMIT)
                    .map(|v| MatchResult::new(v, NO_MATCH_REASON))
                    .collect(),
            });
        }

        // 7. Rank
        let results = rank(ai_provider, &criteria_text, &candidates).await;

        tracing::info!(
            session_id = %record.id,
            catalog = vendors.len(),
            candidates = candidates.len(),
            results = results.len(),
            "Search matched"
        );

        Ok(FindMatchesResult {
            assistant_summary,
            results,
        })
    }
}

fn single_prompt(purpose: CompletionPurpose, prompt: String) -> CompletionRequest {
    CompletionRequest::new(purpose).with_message(MessageRole::User, prompt)
}

/// The model's summary, or `None` when the call failed or came back empty.
async fn summarize(ai_provider: &dyn AIProvider, criteria_text: &str) -> Option<String> {
    let request = single_prompt(CompletionPurpose::Summary, summary_prompt(criteria_text))
        .with_temperature(SUMMARY_TEMPERATURE)
        .with_max_tokens(SUMMARY_MAX_TOKENS);

    match ai_provider.complete(request).await {
        Ok(response) => {
            let summary = clean_summary(&response.content);
            if summary.is_none() {
                tracing::warn!("Summary completion was empty; using fallback summary");
            }
            summary
        }
        Err(e) => {
            tracing::warn!(error = %e, "Summary completion failed; using fallback summary");
            None
        }
    }
}

/// Topic phrases, or none when the call failed.
async fn extract_topics(
    ai_provider: &dyn AIProvider,
    criteria_text: &str,
    summary: Option<&str>,
) -> Vec<String> {
    let request = single_prompt(CompletionPurpose::Topics, topics_prompt(criteria_text, summary))
        .with_temperature(TOPICS_TEMPERATURE)
        .with_max_tokens(TOPICS_MAX_TOKENS);

    match ai_provider.complete(request).await {
        Ok(response) => parse_topics(&response.content),
        Err(e) => {
            tracing::warn!(error = %e, "Topic completion failed; no topics");
            Vec::new()
        }
    }
}

async fn rank(
    ai_provider: &dyn AIProvider,
    criteria_text: &str,
    candidates: &[CandidateVendor],
) -> Vec<MatchResult> {
    let request = single_prompt(CompletionPurpose::Ranking, rank_prompt(criteria_text, candidates))
        .with_temperature(RANKING_TEMPERATURE)
        .with_max_tokens(RANKING_MAX_TOKENS);

    let parse = match ai_provider.complete(request).await {
        Ok(response) => parse_ranking(&response.content),
        Err(e) => {
            tracing::warn!(error = %e, "Ranking completion failed; keeping candidate order");
            RankingParse::Unparseable
        }
    };

    if parse == RankingParse::Unparseable {
        tracing::warn!(
            candidates = candidates.len(),
            "Ranking unusable; returning all candidates"
        );
    }

    apply_ranking(parse, candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::adapters::storage::{InMemorySearchSessionLog, InMemoryVendorCatalog};
    use crate::domain::foundation::VendorId;
    use crate::domain::search::{CriteriaField, GENERIC_MATCH_REASON};

    fn vendor(name: &str, description: &str, category: &str) -> CandidateVendor {
        CandidateVendor {
            id: VendorId::new(),
            name: name.to_string(),
            slug: name.to_lowercase(),
            description: Some(description.to_string()),
            category: Some(category.to_string()),
            subcategory: None,
        }
    }

    fn catalog() -> InMemoryVendorCatalog {
        InMemoryVendorCatalog::with_vendors(vec![
            vendor("Acme Claims", "Hospital claims feeds", "Healthcare"),
            vendor("Orbit", "Satellite imagery", "Geospatial"),
            vendor("Medix", "Pharmacy and hospital records", "Healthcare"),
        ])
    }

    fn criteria() -> SearchCriteria {
        SearchCriteria::new()
            .with(CriteriaField::Topic, "claims")
            .with(CriteriaField::SubjectPopulation, "US hospitals")
    }

    struct Fixture {
        provider: MockAIProvider,
        log: InMemorySearchSessionLog,
        handler: FindMatchesHandler,
    }

    fn fixture(
        provider: MockAIProvider,
        catalog: InMemoryVendorCatalog,
        log: InMemorySearchSessionLog,
    ) -> Fixture {
        let handler = FindMatchesHandler::new(
            Some(Arc::new(provider.clone())),
            Arc::new(catalog),
            SessionRecorder::new(Arc::new(log.clone())),
        );
        Fixture {
            provider,
            log,
            handler,
        }
    }

    fn command() -> FindMatchesCommand {
        FindMatchesCommand {
            criteria: criteria(),
            raw_messages: None,
        }
    }

    #[tokio::test]
    async fn ranks_filtered_candidates() {
        let f = fixture(
            MockAIProvider::new()
                .with_response("\"US hospital claims data.\"")
                .with_response("1. hospital claims\n2. healthcare")
                .with_response(
                    "```json\n[{\"index\":1,\"reason\":\"Pharmacy records\"},{\"index\":0,\"reason\":\"Claims feeds\"}]\n```",
                ),
            catalog(),
            InMemorySearchSessionLog::new(),
        );

        let result = f.handler.handle(command()).await.unwrap();

        assert_eq!(result.assistant_summary, "US hospital claims data.");
        let names: Vec<_> = result.results.iter().map(|r| r.vendor.name.as_str()).collect();
        assert_eq!(names, vec!["Medix", "Acme Claims"]);
        assert_eq!(result.results[1].match_reason, "Claims feeds");
        assert_eq!(
            f.provider.call_purposes(),
            vec![
                CompletionPurpose::Summary,
                CompletionPurpose::Topics,
                CompletionPurpose::Ranking
            ]
        );
    }

    #[tokio::test]
    async fn topic_prompt_carries_criteria_and_summary() {
        let f = fixture(
            MockAIProvider::new()
                .with_response("US hospital claims data.")
                .with_response("claims")
                .with_response("[]"),
            catalog(),
            InMemorySearchSessionLog::new(),
        );

        f.handler.handle(command()).await.unwrap();

        let calls = f.provider.get_calls();
        let topics_prompt = &calls[1].messages[0].content;
        assert!(topics_prompt.contains("Topic: claims\nSubject/population: US hospitals"));
        assert!(topics_prompt.ends_with("US hospital claims data."));
    }

    #[tokio::test]
    async fn records_session_with_transcript() {
        let f = fixture(
            MockAIProvider::new(),
            InMemoryVendorCatalog::new(),
            InMemorySearchSessionLog::new(),
        );

        f.handler
            .handle(FindMatchesCommand {
                criteria: criteria(),
                raw_messages: Some(Transcript::opened()),
            })
            .await
            .unwrap();

        let records = f.log.records().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].criteria, criteria());
        assert_eq!(records[0].raw_messages, Some(Transcript::opened()));
    }

    #[tokio::test]
    async fn empty_catalog_skips_topics_and_ranking() {
        let f = fixture(
            MockAIProvider::new().with_response("Claims data."),
            InMemoryVendorCatalog::new(),
            InMemorySearchSessionLog::new(),
        );

        let result = f.handler.handle(command()).await.unwrap();

        assert_eq!(result.assistant_summary, "Claims data.");
        assert!(result.results.is_empty());
        assert_eq!(f.provider.call_purposes(), vec![CompletionPurpose::Summary]);
    }

    #[tokio::test]
    async fn summary_failure_uses_fallback_sentence() {
        let f = fixture(
            MockAIProvider::new().with_error(MockError::Timeout { timeout_secs: 30 }),
            InMemoryVendorCatalog::new(),
            InMemorySearchSessionLog::new(),
        );

        let result = f.handler.handle(command()).await.unwrap();
        assert_eq!(result.assistant_summary, FALLBACK_SUMMARY);
    }

    #[tokio::test]
    async fn fallback_summary_is_not_fed_to_topics() {
        let f = fixture(
            MockAIProvider::new()
                .with_response("  ")
                .with_response("claims")
                .with_response("[]"),
            catalog(),
            InMemorySearchSessionLog::new(),
        );

        let result = f.handler.handle(command()).await.unwrap();

        assert_eq!(result.assistant_summary, FALLBACK_SUMMARY);
        let topics_prompt = &f.provider.get_calls()[1].messages[0].content;
        assert!(!topics_prompt.contains(FALLBACK_SUMMARY));
    }

    #[tokio::test]
    async fn no_topic_match_returns_first_vendors() {
        let vendors: Vec<_> = (0..12)
            .map(|i| vendor(&format!("Vendor {:02}", i), "Consumer panels", "Survey"))
            .collect();
        let f = fixture(
            MockAIProvider::new()
                .with_response("Weather data.")
                .with_response("meteorology"),
            InMemoryVendorCatalog::with_vendors(vendors),
            InMemorySearchSessionLog::new(),
        );

        let result = f.handler.handle(command()).await.unwrap();

        assert_eq!(result.results.len(), NO_MATCH_FALLBACK_LIMIT);
        assert_eq!(result.results[0].vendor.name, "Vendor 00");
        assert!(result.results.iter().all(|r| r.match_reason == NO_MATCH_REASON));
        assert_eq!(f.provider.call_count(), 2);
    }

    #[tokio::test]
    async fn topic_failure_falls_back_to_first_vendors() {
        let f = fixture(
            MockAIProvider::new()
                .with_response("Claims data.")
                .with_error(MockError::Network {
                    message: "reset".to_string(),
                }),
            catalog(),
            InMemorySearchSessionLog::new(),
        );

        let result = f.handler.handle(command()).await.unwrap();

        assert_eq!(result.results.len(), 3);
        assert_eq!(result.results[0].vendor.name, "Acme Claims");
        assert_eq!(result.results[0].match_reason, NO_MATCH_REASON);
    }

    #[tokio::test]
    async fn unparseable_ranking_keeps_all_candidates() {
        let f = fixture(
            MockAIProvider::new()
                .with_response("Claims data.")
                .with_response("hospital")
                .with_response("I think Acme is best."),
            catalog(),
            InMemorySearchSessionLog::new(),
        );

        let result = f.handler.handle(command()).await.unwrap();

        let names: Vec<_> = result.results.iter().map(|r| r.vendor.name.as_str()).collect();
        assert_eq!(names, vec!["Acme Claims", "Medix"]);
        assert!(result
            .results
            .iter()
            .all(|r| r.match_reason == GENERIC_MATCH_REASON));
    }

    #[tokio::test]
    async fn ranking_failure_keeps_all_candidates() {
        let f = fixture(
            MockAIProvider::new()
                .with_response("Claims data.")
                .with_response("hospital")
                .with_error(MockError::RateLimited {
                    retry_after_secs: 10,
                }),
            catalog(),
            InMemorySearchSessionLog::new(),
        );

        let result = f.handler.handle(command()).await.unwrap();
        assert_eq!(result.results.len(), 2);
    }

    #[tokio::test]
    async fn out_of_range_rank_index_is_dropped() {
        let f = fixture(
            MockAIProvider::new()
                .with_response("Claims data.")
                .with_response("hospital")
                .with_response("[{\"index\":99,\"reason\":\"ghost\"},{\"index\":0,\"reason\":\"fits\"}]"),
            catalog(),
            InMemorySearchSessionLog::new(),
        );

        let result = f.handler.handle(command()).await.unwrap();

        assert_eq!(result.results.len(), 1);
        assert_eq!(result.results[0].vendor.name, "Acme Claims");
    }

    #[tokio::test]
    async fn failing_session_log_does_not_fail_request() {
        let f = fixture(
            MockAIProvider::new().with_response("Claims data."),
            InMemoryVendorCatalog::new(),
            InMemorySearchSessionLog::failing(),
        );

        let result = f.handler.handle(command()).await.unwrap();
        assert_eq!(result.assistant_summary, "Claims data.");
    }

    #[tokio::test]
    async fn unavailable_catalog_returns_summary_only() {
        let f = fixture(
            MockAIProvider::new().with_response("Claims data."),
            InMemoryVendorCatalog::unavailable(),
            InMemorySearchSessionLog::new(),
        );

        let result = f.handler.handle(command()).await.unwrap();
        assert_eq!(result.assistant_summary, "Claims data.");
        assert!(result.results.is_empty());
        assert_eq!(f.provider.call_count(), 1);
        assert_eq!(f.log.record_count().await, 1);
    }

    #[tokio::test]
    async fn unconfigured_service_records_nothing() {
        let log = InMemorySearchSessionLog::new();
        let handler = FindMatchesHandler::new(
            None,
            Arc::new(catalog()),
            SessionRecorder::new(Arc::new(log.clone())),
        );

        let err = handler.handle(command()).await.unwrap_err();

        assert!(matches!(err, SearchError::NotConfigured(_)));
        assert_eq!(log.record_count().await, 0);
    }
}
