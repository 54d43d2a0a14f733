//! Self-introduction fields extracted from board posts

use serde::Serialize;
use std::collections::BTreeMap;

/// Structured field recognized in an introduction post
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IntroField {
    RealName,
    Age,
    Gender,
    Location,
    Workplace,
    StudyArea,
    StudyContent,
    StudyDays,
}

/// Extracted field values keyed by field
pub type IntroFields = BTreeMap<IntroField, String>;

/// Introduction bound to one author
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ParsedIntro {
    pub fields: IntroFields,
    /// First 500 characters of title + body
    pub excerpt: String,
    /// `YYYY-MM-DD` of the post, empty when unknown
    pub posted_on: String,
}

impl ParsedIntro {
    /// Field value or empty string
    pub fn field(&self, field: IntroField) -> &str {
        self.fields.get(&field).map_or("", String::as_str)
    }
}
