//! Generated answer input types
//!
//! Produced upstream by the answer-generation service and only read here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Raw answer produced by the answer-generation service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratedAnswer {
    pub id: String,

    /// The question this answer responds to
    pub query: String,

    /// Raw answer text with inline `[n]` citation markers
    #[serde(deserialize_with = "null_as_empty")]
    pub content: String,

    /// Citations referenced by 1-based position from `content`
    pub citations: Vec<Citation>,

    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,

    pub confidence_explanation: String,

    pub generated_at: DateTime<Utc>,

    /// Generation time in milliseconds
    pub processing_time: u64,

    pub sources: Vec<String>,

    pub related_questions: Vec<String>,
}

impl GeneratedAnswer {
    /// Answer with only content and citations populated
    pub fn new(content: impl Into<String>, citations: Vec<Citation>) -> Self {
        Self {
            content: content.into(),
            citations,
            ..Default::default()
        }
    }

    /// Parse an answer document as produced by the generation service
    pub fn from_json(raw: &str) -> crate::errors::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Source reference attached to an answer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Citation {
    pub id: String,

    pub document_id: String,

    pub document_title: String,

    /// Character span of the excerpt in the source document
    pub start_offset: usize,
    pub end_offset: usize,

    pub excerpt: String,

    /// Confidence score (0.0 - 1.0)
    pub confidence: f32,

    pub url: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
