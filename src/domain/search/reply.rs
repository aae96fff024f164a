//! Parsing of the two-part dialogue reply.
//!
//! The model is asked to answer with a visible reply, the sentinel, and a JSON
//! block. None of that is trusted: every parse either yields a structured
//! reply or falls back to the raw text.

use serde_json::Value;

use super::criteria::{CriteriaField, SearchCriteria};

/// Marker separating the visible reply from the machine-readable block.
pub const REPLY_SENTINEL: &str = "---JSON---";

/// Outcome of parsing one dialogue completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedReply {
    /// Sentinel found and the block after it was a JSON object.
    Structured {
        /// Trimmed text before the sentinel.
        visible: String,
        /// Criteria extracted this turn, if the block carried a `criteria` object.
        delta: Option<SearchCriteria>,
        /// The model's own report of its reply, if non-blank.
        next_message: Option<String>,
    },
    /// Sentinel missing or block unusable; the whole response is the reply.
    Fallback { raw: String },
}

impl ParsedReply {
    /// Text to show the user. `nextMessage` wins over the pre-sentinel text.
    pub fn reply_text(&self) -> &str {
        match self {
            ParsedReply::Structured {
                visible,
                next_message,
                ..
            } => next_message.as_deref().unwrap_or(visible.as_str()),
            ParsedReply::Fallback { raw } => raw.as_str(),
        }
    }

    /// Criteria delta to merge, if any.
    pub fn delta(&self) -> Option<&SearchCriteria> {
        match self {
            ParsedReply::Structured { delta, .. } => delta.as_ref(),
            ParsedReply::Fallback { .. } => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, ParsedReply::Fallback { .. })
    }
}

/// Splits a completion on the sentinel and decodes the JSON block.
pub fn parse_reply(content: &str) -> ParsedReply {
    let fallback = || ParsedReply::Fallback {
        raw: content.trim().to_string(),
    };

    let Some((visible, block)) = content.split_once(REPLY_SENTINEL) else {
        return fallback();
    };

    let Ok(Value::Object(block)) = serde_json::from_str::<Value>(&strip_code_fences(block))
    else {
        return fallback();
    };

    let delta = match block.get("criteria") {
        Some(Value::Object(raw)) => Some(criteria_from_json(raw)),
        _ => None,
    };

    let next_message = block
        .get("nextMessage")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string);

    ParsedReply::Structured {
        visible: visible.trim().to_string(),
        delta,
        next_message,
    }
}

/// Reads string-valued criteria keys; anything else counts as unknown.
fn criteria_from_json(raw: &serde_json::Map<String, Value>) -> SearchCriteria {
    CriteriaField::ALL
        .iter()
        .fold(SearchCriteria::new(), |criteria, field| {
            match raw.get(field.key()).and_then(Value::as_str) {
                Some(value) => criteria.with(*field, value),
                None => criteria,
            }
        })
}

/// Removes a surrounding markdown code fence, if present.
pub(crate) fn strip_code_fences(raw: &str) -> String {
    let trimmed = raw.trim();
    if !trimmed.starts_with("```") {
        return trimmed.to_string();
    }

    let mut lines = trimmed.lines();
    lines.next();
    let mut body: Vec<&str> = lines.collect();
    while let Some(last) = body.last() {
        if last.trim().starts_with("```") {
            body.pop();
        } else {
            break;
        }
    }

    body.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_reply_extracts_criteria_and_message() {
        let content = r#"Who is the data about?
---JSON---
{"criteria":{"topic":"claims data","subject_population":null},"nextMessage":"Who is the data about, exactly?"}"#;

        let parsed = parse_reply(content);
        assert!(!parsed.is_fallback());
        assert_eq!(parsed.reply_text(), "Who is the data about, exactly?");
        let delta = parsed.delta().unwrap();
        assert_eq!(delta.get(CriteriaField::Topic), Some("claims data"));
        assert_eq!(delta.get(CriteriaField::SubjectPopulation), None);
    }

    #[test]
    fn visible_text_is_used_when_next_message_is_blank() {
        let content = "  Which years?  ---JSON--- {\"criteria\":{},\"nextMessage\":\"  \"}";
        let parsed = parse_reply(content);
        assert_eq!(parsed.reply_text(), "Which years?");
    }

    #[test]
    fn fenced_json_block_is_accepted() {
        let content = "Where?\n---JSON---\n```json\n{\"criteria\":{\"geography\":\"US\"}}\n```";
        let parsed = parse_reply(content);
        assert_eq!(
            parsed.delta().and_then(|d| d.get(CriteriaField::Geography)),
            Some("US")
        );
    }

    #[test]
    fn non_string_criteria_values_are_ignored() {
        let content = r#"Ok ---JSON--- {"criteria":{"topic":42,"ownership":"public"}}"#;
        let delta = parse_reply(content).delta().cloned().unwrap();
        assert_eq!(delta.get(CriteriaField::Topic), None);
        assert_eq!(delta.get(CriteriaField::Ownership), Some("public"));
    }

    #[test]
    fn missing_sentinel_falls_back_to_raw_text() {
        for content in ["", "   ", "Tell me more {about} it", "{\"criteria\":{}}", "  hi  "] {
            let parsed = parse_reply(content);
            assert_eq!(
                parsed,
                ParsedReply::Fallback {
                    raw: content.trim().to_string()
                }
            );
            assert_eq!(parsed.delta(), None);
        }
    }

    #[test]
    fn malformed_block_falls_back_to_raw_text() {
        let content = "Which years? ---JSON--- {\"criteria\": {\"topic\": ";
        let parsed = parse_reply(content);
        assert!(parsed.is_fallback());
        assert_eq!(parsed.reply_text(), content.trim());
    }

    #[test]
    fn non_object_block_falls_back() {
        let parsed = parse_reply("Hi ---JSON--- [1, 2]");
        assert!(parsed.is_fallback());
    }

    #[test]
    fn strip_code_fences_handles_plain_and_fenced_input() {
        assert_eq!(strip_code_fences("  [1]  "), "[1]");
        assert_eq!(strip_code_fences("```json\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fences("```\n[1]\n```\n"), "[1]");
    }
}
