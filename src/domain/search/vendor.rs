//! Catalog projections used by matching.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::VendorId;

/// Read-only projection of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateVendor {
    pub id: VendorId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
}

impl CandidateVendor {
    /// Lower-cased name, description, category and subcategory joined by spaces.
    pub fn searchable_text(&self) -> String {
        [
            Some(self.name.as_str()),
            self.description.as_deref(),
            self.category.as_deref(),
            self.subcategory.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
    }
}

/// A vendor paired with the reason it matched. Rank is the position in the result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub vendor: CandidateVendor,
    pub match_reason: String,
}

impl MatchResult {
    pub fn new(vendor: CandidateVendor, match_reason: impl Into<String>) -> Self {
        Self {
            vendor,
            match_reason: match_reason.into(),
        }
    }
}
