//! Topic keywords and the permissive candidate filter.
//!
//! The filter favors recall: the ranking stage does the precision pass.

use super::vendor::CandidateVendor;

/// Number of catalog entries returned when no candidate matches.
pub const NO_MATCH_FALLBACK_LIMIT: usize = 10;

/// Match reason attached to the no-candidate fallback list.
pub const NO_MATCH_REASON: &str = "No strong topic match; showing first 10 vendors.";

/// Parses a one-topic-per-line completion, dropping list markers and blanks.
pub fn parse_topics(text: &str) -> Vec<String> {
    text.lines()
        .map(strip_list_marker)
        .filter(|topic| !topic.is_empty())
        .map(str::to_string)
        .collect()
}

fn strip_list_marker(line: &str) -> &str {
    line.trim()
        .trim_start_matches(|c: char| {
            c.is_ascii_digit() || matches!(c, '-' | '*' | '•' | '.' | ')' | '#')
        })
        .trim()
}

/// Keeps vendors whose text contains a topic phrase or any word of one.
///
/// Catalog order is preserved.
pub fn filter_candidates(vendors: &[CandidateVendor], topics: &[String]) -> Vec<CandidateVendor> {
    let needles: Vec<String> = topics.iter().map(|t| t.to_lowercase()).collect();
    if needles.is_empty() {
        return Vec::new();
    }

    vendors
        .iter()
        .filter(|vendor| {
            let text = vendor.searchable_text();
            needles.iter().any(|topic| {
                text.contains(topic.as_str())
                    || topic.split_whitespace().any(|word| text.contains(word))
            })
        })
        .cloned()
        .collect()
}
