//! Decoding of the ranking completion.

use serde_json::Value;

use super::reply::strip_code_fences;
use super::vendor::{CandidateVendor, MatchResult};

/// Reason used when the ranking could not be decoded.
pub const GENERIC_MATCH_REASON: &str = "Relevant vendor";

/// One `{index, reason}` entry as returned by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankEntry {
    pub index: usize,
    pub reason: String,
}

/// Outcome of decoding a ranking completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RankingParse {
    /// A JSON array; entries are in best-first order.
    Ranked(Vec<RankEntry>),
    /// Not JSON, or not an array.
    Unparseable,
}

/// Decodes the model's ranking, tolerating code fences and loose entries.
///
/// Entries without a non-negative integer `index` are skipped; a missing
/// or blank `reason` gets the generic one.
pub fn parse_ranking(text: &str) -> RankingParse {
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(&strip_code_fences(text)) else {
        return RankingParse::Unparseable;
    };

    let entries = items
        .iter()
        .filter_map(|item| {
            let index = item.get("index").and_then(Value::as_u64)?;
            let reason = item
                .get("reason")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|r| !r.is_empty())
                .unwrap_or(GENERIC_MATCH_REASON);
            Some(RankEntry {
                index: usize::try_from(index).ok()?,
                reason: reason.to_string(),
            })
        })
        .collect();

    RankingParse::Ranked(entries)
}

/// Maps a decoded ranking back onto the candidate list.
///
/// Indices outside the list are dropped, as are repeats of an index already
/// placed. An unparseable ranking keeps every candidate in its original order.
pub fn apply_ranking(parse: RankingParse, candidates: &[CandidateVendor]) -> Vec<MatchResult> {
    match parse {
        RankingParse::Unparseable => candidates
            .iter()
            .map(|c| MatchResult::new(c.clone(), GENERIC_MATCH_REASON))
            .collect(),
        RankingParse::Ranked(entries) => {
            let mut placed = vec![false; candidates.len()];
            entries
                .into_iter()
                .filter_map(|entry| {
                    let vendor = candidates.get(entry.index)?;
                    if std::mem::replace(&mut placed[entry.index], true) {
                        return None;
                    }
                    Some(MatchResult::new(vendor.clone(), entry.reason))
                })
                .collect()
        }
    }
}
