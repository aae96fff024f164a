//! Prompt construction for the four completion calls of a guided search.
//!
//! Each builder is a pure function of domain data so prompts can be asserted
//! on in tests without a provider.

use super::criteria::{CriteriaField, SearchCriteria};
use super::reply::REPLY_SENTINEL;
use super::transcript::GREETING;
use super::vendor::CandidateVendor;

/// Sentence shown when the summary call fails or returns nothing.
pub const FALLBACK_SUMMARY: &str =
    "Based on your answers, here are the vendors most likely to match your search.";

/// Maximum words requested for the search summary.
pub const SUMMARY_MAX_WORDS: usize = 22;

/// System prompt for one dialogue turn.
///
/// The question order is advisory: the prompt names the next unanswered
/// criterion but the model may phrase or combine questions freely.
pub fn dialogue_system_prompt(current: &SearchCriteria) -> String {
    let criteria_json =
        serde_json::to_string_pretty(current).unwrap_or_else(|_| "{}".to_string());

    let mut lines = vec![
        "You are a helpful assistant that helps users describe what data vendor they need. \
         You ask short, clear questions one at a time and extract structured criteria from \
         their answers."
            .to_string(),
        String::new(),
        "Current criteria (extract and update from the conversation; use null for missing):"
            .to_string(),
        criteria_json,
    ];

    if current.is_empty() {
        lines.push("Nothing is known yet.".to_string());
    }

    lines.push(String::new());
    lines.push(
        "Question order (ask the FIRST question whose criterion is still null or empty):"
            .to_string(),
    );
    lines.extend(
        CriteriaField::QUESTION_ORDER
            .iter()
            .map(|f| format!("- {}: {}", f.key(), f.description())),
    );

    if let Some(next) = current.next_unanswered() {
        lines.push(format!("The next unanswered criterion is: {}", next.key()));
    }

    let keys = CriteriaField::ALL
        .iter()
        .map(|f| f.key())
        .collect::<Vec<_>>()
        .join(", ");

    lines.extend([
        String::new(),
        "Rules:".to_string(),
        format!(
            "1. After each user message, update the criteria with any new information ({}).",
            keys
        ),
        format!(
            "2. Reply with exactly two parts separated by the string '{}': first your \
             natural-language reply (one short paragraph or question), then a JSON object with \
             keys: criteria (object with {}; use null for missing), nextMessage (your reply text).",
            REPLY_SENTINEL, keys
        ),
        "3. If the user's message fills in multiple criteria, still ask only the next missing one."
            .to_string(),
        format!(
            "4. For the first message from the assistant, ask: '{}'",
            GREETING
        ),
        "5. Once subject_population is filled, the UI will show a 'SHOW ME RESULTS' button; \
         you don't need to mention it."
            .to_string(),
    ]);

    lines.join("\n")
}

/// Prompt asking for a one-sentence description of the search.
pub fn summary_prompt(criteria_text: &str) -> String {
    let criteria_text = if criteria_text.is_empty() {
        "No criteria yet."
    } else {
        criteria_text
    };
    format!(
        "You are helping a user find data vendors. Based on the criteria below, write one brief \
         sentence (max {} words) describing what the user is searching for. Be specific and \
         avoid filler.\n\nCriteria:\n{}",
        SUMMARY_MAX_WORDS, criteria_text
    )
}

/// Cleans a summary completion; `None` when nothing usable is left.
pub fn clean_summary(text: &str) -> Option<String> {
    let cleaned = text
        .trim()
        .trim_start_matches(['"', '\''])
        .trim_end_matches(['"', '\''])
        .trim();
    (!cleaned.is_empty()).then(|| cleaned.to_string())
}

/// Prompt asking for 3-8 topic phrases, one per line.
pub fn topics_prompt(criteria_text: &str, summary: Option<&str>) -> String {
    let mut search = criteria_text.to_string();
    if let Some(summary) = summary {
        if !search.is_empty() {
            search.push('\n');
        }
        search.push_str(summary);
    }
    format!(
        "Given this data vendor search description, list 3-8 specific topics or keywords that \
         could match vendor categories (e.g. consumer data, B2B, healthcare, geospatial, \
         financial). One per line, short phrases only.\n\nSearch:\n{}",
        search
    )
}

/// Indexed vendor listing used by the ranking prompt.
pub fn vendor_listing(candidates: &[CandidateVendor]) -> String {
    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| {
            format!(
                "[{}] {}\nCategory: {} / {}\n{}",
                i,
                c.name,
                c.category.as_deref().unwrap_or(""),
                c.subcategory.as_deref().unwrap_or(""),
                c.description.as_deref().unwrap_or("")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Prompt asking for a best-first JSON array of `{index, reason}`.
pub fn rank_prompt(criteria_text: &str, candidates: &[CandidateVendor]) -> String {
    format!(
        "You are matching data vendors to a user's search. Given the search criteria and the \
         list of vendors, return a JSON array of objects with \"index\" (the [0], [1], ... index \
         from the list) and \"reason\" (one short sentence why this vendor matches). Sort by \
         best match first. Include only vendors that are at least somewhat relevant; you can \
         omit poor matches. Return only the JSON array, no other text.\n\nSearch criteria:\n{}\n\n\
         Vendors:\n{}",
        criteria_text,
        vendor_listing(candidates)
    )
}
