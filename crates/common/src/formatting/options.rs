//! Formatting options and partial updates

use serde::{Deserialize, Serialize};

/// Options controlling how an answer is rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnswerFormatOptions {
    /// Render citation links; when false every `[n]` marker is removed
    #[serde(alias = "include_citations")]
    pub include_citations: bool,

    /// Rich per-type templates (code, table, quote) and inline markup
    #[serde(alias = "enable_markdown")]
    pub enable_markdown: bool,

    /// Render tables as tables (also requires `enable_markdown`)
    #[serde(alias = "enable_tables")]
    pub enable_tables: bool,

    /// Render lists as lists
    #[serde(alias = "enable_lists")]
    pub enable_lists: bool,

    /// Wrap plain-text lines at this width; 0 disables wrapping
    #[serde(alias = "max_line_length")]
    pub max_line_length: usize,

    /// Prefer list items as key points
    #[serde(alias = "prefer_bullet_points")]
    pub prefer_bullet_points: bool,

    /// Wrap key terms in emphasis markup
    #[serde(alias = "highlight_key_terms")]
    pub highlight_key_terms: bool,

    /// Emit leaner markup
    #[serde(alias = "mobile_optimized")]
    pub mobile_optimized: bool,
}

impl Default for AnswerFormatOptions {
    fn default() -> Self {
        Self {
            include_citations: true,
            enable_markdown: true,
            enable_tables: true,
            enable_lists: true,
            max_line_length: 0,
            prefer_bullet_points: false,
            highlight_key_terms: false,
            mobile_optimized: false,
        }
    }
}

/// Partial update; `None` fields keep their current value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnswerFormatOptionsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_citations: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_markdown: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_tables: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_lists: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_line_length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefer_bullet_points: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_key_terms: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile_optimized: Option<bool>,
}

impl AnswerFormatOptions {
    /// Produce a new options value with `update` applied on top of `self`
    pub fn merged(&self, update: &AnswerFormatOptionsUpdate) -> Self {
        Self {
            include_citations: update.include_citations.unwrap_or(self.include_citations),
            enable_markdown: update.enable_markdown.unwrap_or(self.enable_markdown),
            enable_tables: update.enable_tables.unwrap_or(self.enable_tables),
            enable_lists: update.enable_lists.unwrap_or(self.enable_lists),
            max_line_length: update.max_line_length.unwrap_or(self.max_line_length),
            prefer_bullet_points: update
                .prefer_bullet_points
                .unwrap_or(self.prefer_bullet_points),
            highlight_key_terms: update
                .highlight_key_terms
                .unwrap_or(self.highlight_key_terms),
            mobile_optimized: update.mobile_optimized.unwrap_or(self.mobile_optimized),
        }
    }

    /// Tables are only rendered structurally when markdown is on too
    pub(crate) fn renders_tables(&self) -> bool {
        self.enable_markdown && self.enable_tables
    }
}

impl AnswerFormatOptionsUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = AnswerFormatOptions::default();
        assert!(options.include_citations);
        assert!(options.enable_markdown);
        assert!(options.enable_tables);
        assert!(options.enable_lists);
        assert!(!options.highlight_key_terms);
        assert!(!options.mobile_optimized);
    }

    #[test]
    fn test_merge_preserves_unspecified_fields() {
        let base = AnswerFormatOptions {
            highlight_key_terms: true,
            max_line_length: 72,
            ..Default::default()
        };
        let update = AnswerFormatOptionsUpdate {
            include_citations: Some(false),
            ..Default::default()
        };

        let merged = base.merged(&update);
        assert!(!merged.include_citations);
        assert!(merged.highlight_key_terms);
        assert_eq!(merged.max_line_length, 72);
        // base is untouched
        assert!(base.include_citations);
    }

    #[test]
    fn test_update_ignores_unknown_keys() {
        let update: AnswerFormatOptionsUpdate =
            serde_json::from_str(r#"{"enableTables": false, "colorScheme": "dark"}"#).unwrap();
        assert_eq!(update.enable_tables, Some(false));
        assert_eq!(update.include_citations, None);
        assert!(!update.is_empty());
    }
}
