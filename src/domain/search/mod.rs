//! Guided vendor search domain.
//!
//! - `criteria` - structured criteria and merge rules
//! - `transcript` - conversation turns
//! - `reply` - sentinel/JSON dialogue reply parsing
//! - `prompts` - completion prompt builders
//! - `topics` - topic keywords and candidate filtering
//! - `ranking` - ranking decode and index mapping
//! - `readiness` / `session` - when results may be offered, client-side state

mod criteria;
mod errors;
mod prompts;
mod ranking;
mod readiness;
mod record;
mod reply;
mod session;
mod topics;
mod transcript;
mod vendor;

pub use criteria::{CriteriaField, SearchCriteria};
pub use errors::SearchError;
pub use prompts::{
    clean_summary, dialogue_system_prompt, rank_prompt, summary_prompt, topics_prompt,
    vendor_listing, FALLBACK_SUMMARY, SUMMARY_MAX_WORDS,
};
pub use ranking::{apply_ranking, parse_ranking, RankEntry, RankingParse, GENERIC_MATCH_REASON};
pub use readiness::{can_offer_results, MIN_USER_TURNS_FOR_RESULTS};
pub use record::SearchSessionRecord;
pub use reply::{parse_reply, ParsedReply, REPLY_SENTINEL};
pub use session::{DialogueTurn, GuidedSearch, SearchPhase};
pub use topics::{filter_candidates, parse_topics, NO_MATCH_FALLBACK_LIMIT, NO_MATCH_REASON};
pub use transcript::{Transcript, Turn, TurnRole, GREETING};
pub use vendor::{CandidateVendor, MatchResult};
