//! Search criteria - the structured description of what a user is looking for.
//!
//! Every field is optional free text. `None` means "not yet known" and a
//! merge never lets an unknown value erase a known one.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the eight criteria a guided search collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriteriaField {
    Topic,
    SubjectPopulation,
    YearsDates,
    Ownership,
    DataType,
    DataUse,
    Geography,
    OtherDetails,
}

impl CriteriaField {
    /// All fields in declaration (storage and summary) order.
    pub const ALL: [CriteriaField; 8] = [
        CriteriaField::Topic,
        CriteriaField::SubjectPopulation,
        CriteriaField::YearsDates,
        CriteriaField::Ownership,
        CriteriaField::DataType,
        CriteriaField::DataUse,
        CriteriaField::Geography,
        CriteriaField::OtherDetails,
    ];

    /// Order in which the assistant asks about the fields. The first unknown wins.
    pub const QUESTION_ORDER: [CriteriaField; 8] = [
        CriteriaField::Topic,
        CriteriaField::SubjectPopulation,
        CriteriaField::DataUse,
        CriteriaField::YearsDates,
        CriteriaField::Ownership,
        CriteriaField::Geography,
        CriteriaField::DataType,
        CriteriaField::OtherDetails,
    ];

    /// Wire key of the field.
    pub fn key(&self) -> &'static str {
        match self {
            CriteriaField::Topic => "topic",
            CriteriaField::SubjectPopulation => "subject_population",
            CriteriaField::YearsDates => "years_dates",
            CriteriaField::Ownership => "ownership",
            CriteriaField::DataType => "data_type",
            CriteriaField::DataUse => "data_use",
            CriteriaField::Geography => "geography",
            CriteriaField::OtherDetails => "other_details",
        }
    }

    /// Human-readable description used in the dialogue checklist.
    pub fn description(&self) -> &'static str {
        match self {
            CriteriaField::Topic => "topic / what they're searching for",
            CriteriaField::SubjectPopulation => {
                "who or what the data is about (e.g. businesses, people, hospitals, land)"
            }
            CriteriaField::YearsDates => "years or date ranges needed (or 'Any')",
            CriteriaField::Ownership => "ownership (public, proprietary, open-source, etc.)",
            CriteriaField::DataType => "kind of data (sensor, survey, sentiment analysis, etc.)",
            CriteriaField::DataUse => {
                "where the data will go (sublicensed, AI training, business intelligence, etc.)"
            }
            CriteriaField::Geography => "geography or geography levels",
            CriteriaField::OtherDetails => "any other requirements (columns, details)",
        }
    }

    /// Short label used when rendering known criteria as text.
    pub fn summary_label(&self) -> &'static str {
        match self {
            CriteriaField::Topic => "Topic",
            CriteriaField::SubjectPopulation => "Subject/population",
            CriteriaField::YearsDates => "Years/dates",
            CriteriaField::Ownership => "Ownership",
            CriteriaField::DataType => "Data type",
            CriteriaField::DataUse => "Data use",
            CriteriaField::Geography => "Geography",
            CriteriaField::OtherDetails => "Other",
        }
    }
}

impl fmt::Display for CriteriaField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Structured search criteria, one instance per guided search.
///
/// Also used as the partial delta extracted from a single dialogue turn:
/// fields the model did not mention are simply `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub subject_population: Option<String>,
    #[serde(default)]
    pub years_dates: Option<String>,
    #[serde(default)]
    pub ownership: Option<String>,
    #[serde(default)]
    pub data_type: Option<String>,
    #[serde(default)]
    pub data_use: Option<String>,
    #[serde(default)]
    pub geography: Option<String>,
    #[serde(default)]
    pub other_details: Option<String>,
}

impl SearchCriteria {
    /// Creates empty criteria (nothing known yet).
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the raw value of a field.
    pub fn get(&self, field: CriteriaField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    /// Sets a field, returning self for chaining.
    pub fn with(mut self, field: CriteriaField, value: impl Into<String>) -> Self {
        *self.slot_mut(field) = Some(value.into());
        self
    }

    /// Returns the field's value only if it carries non-blank text.
    pub fn known(&self, field: CriteriaField) -> Option<&str> {
        self.get(field).filter(|v| !v.trim().is_empty())
    }

    /// True when every field is absent.
    pub fn is_empty(&self) -> bool {
        CriteriaField::ALL.iter().all(|f| self.get(*f).is_none())
    }

    /// Merges a newer extraction into these criteria.
    ///
    /// A delta value replaces the current one only when it is non-blank;
    /// absent or blank delta values leave the current value untouched.
    pub fn merge(&self, delta: &SearchCriteria) -> SearchCriteria {
        let mut merged = self.clone();
        for field in CriteriaField::ALL {
            if let Some(value) = delta.known(field) {
                *merged.slot_mut(field) = Some(value.to_string());
            }
        }
        merged
    }

    /// The first field in question order that is still unknown.
    pub fn next_unanswered(&self) -> Option<CriteriaField> {
        CriteriaField::QUESTION_ORDER
            .into_iter()
            .find(|f| self.known(*f).is_none())
    }

    /// Known fields rendered as `Label: value` lines, in declaration order.
    pub fn summary_lines(&self) -> Vec<String> {
        CriteriaField::ALL
            .iter()
            .filter_map(|f| {
                self.known(*f)
                    .map(|v| format!("{}: {}", f.summary_label(), v))
            })
            .collect()
    }

    /// Known fields joined by newlines; empty when nothing is known.
    pub fn render_summary(&self) -> String {
        self.summary_lines().join("\n")
    }

    fn slot(&self, field: CriteriaField) -> &Option<String> {
        match field {
            CriteriaField::Topic => &self.topic,
            CriteriaField::SubjectPopulation => &self.subject_population,
            CriteriaField::YearsDates => &self.years_dates,
            CriteriaField::Ownership => &self.ownership,
            CriteriaField::DataType => &self.data_type,
            CriteriaField::DataUse => &self.data_use,
            CriteriaField::Geography => &self.geography,
            CriteriaField::OtherDetails => &self.other_details,
        }
    }

    fn slot_mut(&mut self, field: CriteriaField) -> &mut Option<String> {
        match field {
            CriteriaField::Topic => &mut self.topic,
            CriteriaField::SubjectPopulation => &mut self.subject_population,
            CriteriaField::YearsDates => &mut self.years_dates,
            CriteriaField::Ownership => &mut self.ownership,
            CriteriaField::DataType => &mut self.data_type,
            CriteriaField::DataUse => &mut self.data_use,
            CriteriaField::Geography => &mut self.geography,
            CriteriaField::OtherDetails => &mut self.other_details,
        }
    }
}
