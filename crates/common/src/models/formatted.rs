//! Formatted answer output types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Structural type of a content section
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Paragraph,
    List,
    Code,
    Table,
    Quote,
}

impl SectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionType::Paragraph => "paragraph",
            SectionType::List => "list",
            SectionType::Code => "code",
            SectionType::Table => "table",
            SectionType::Quote => "quote",
        }
    }

    /// Structurally distinguished content (anything but plain prose)
    pub fn is_structured(&self) -> bool {
        !matches!(self, SectionType::Paragraph)
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse salience of a section, ordered `Low < Medium < High`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    Medium,
    High,
}

impl Importance {
    /// One level up, saturating at `High`
    pub fn boosted(self) -> Self {
        match self {
            Importance::Low => Importance::Medium,
            Importance::Medium | Importance::High => Importance::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Importance::Low => "low",
            Importance::Medium => "medium",
            Importance::High => "high",
        }
    }
}

impl fmt::Display for Importance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified and rendered block of the answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSection {
    /// Order of appearance (0-based)
    pub index: usize,

    #[serde(rename = "type")]
    pub section_type: SectionType,

    /// Source text of the block, exactly as it appeared
    pub raw_text: String,

    pub rendered_html: String,

    pub importance: Importance,

    /// Ids of the resolved citations referenced in this block
    pub citation_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructuredData {
    pub sections: Vec<ContentSection>,
    pub key_points: Vec<String>,
    pub related_topics: Vec<String>,
    pub summary: String,
}

/// Render-ready representation of a generated answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattedContent {
    pub html: String,

    /// Citation-free, markup-free text
    pub plain_text: String,

    pub structured_data: StructuredData,

    /// Minutes, computed from `plain_text`
    pub reading_time: u32,

    /// Whitespace-delimited tokens in `plain_text`
    pub word_count: usize,
}
