//! Formatter Facade - Orchestrates the formatting pipeline
//!
//! segment -> classify -> (render | extract | measure) -> FormattedContent
//!
//! The only state kept between calls is the current options. Updates replace
//! the options with a freshly merged value; callers sharing one formatter
//! across threads serialize `update_options` themselves.

use super::citations::{CitationIndex, CitationUsage};
use super::classifier::{classify, ClassifiedBlock};
use super::extractor::{Extractor, ExtractorConfig};
use super::options::{AnswerFormatOptions, AnswerFormatOptionsUpdate};
use super::reading::reading_stats;
use super::renderer::{render_plain_text, Renderer};
use super::segmenter::{segment, Block, BlockBody};
use crate::errors::{AppError, Result};
use crate::metrics::{self, FormatTimer};
use crate::models::{
    ContentSection, FormattedContent, GeneratedAnswer, Importance, SectionType, StructuredData,
};
use tracing::debug;

/// Turns generated answers into render-ready content
#[derive(Debug, Clone, Default)]
pub struct AnswerFormatter {
    options: AnswerFormatOptions,
    extractor: Extractor,
}

impl AnswerFormatter {
    pub fn new(options: AnswerFormatOptions) -> Self {
        Self::with_config(options, ExtractorConfig::default())
    }

    pub fn with_config(options: AnswerFormatOptions, extractor: ExtractorConfig) -> Self {
        Self {
            options,
            extractor: Extractor::new(extractor),
        }
    }

    /// Snapshot of the current options
    pub fn options(&self) -> AnswerFormatOptions {
        self.options.clone()
    }

    /// Merge `update` into the current options
    pub fn update_options(&mut self, update: AnswerFormatOptionsUpdate) {
        self.options = self.options.merged(&update);
        debug!(options = ?self.options, "Format options updated");
    }

    /// Merge a JSON object of camelCase options; unknown keys are ignored.
    ///
    /// A value of the wrong type rejects the whole update and leaves the
    /// current options unchanged.
    pub fn update_options_json(&mut self, update: serde_json::Value) -> Result<()> {
        if !update.is_object() {
            return Err(AppError::InvalidFormat {
                message: "option updates must be a JSON object".to_string(),
            });
        }

        let update: AnswerFormatOptionsUpdate =
            serde_json::from_value(update).map_err(|e| AppError::Validation {
                message: e.to_string(),
                field: None,
            })?;
        self.update_options(update);
        Ok(())
    }

    /// Format `answer` with the current options. Never fails.
    pub fn format_answer(&self, answer: &GeneratedAnswer) -> FormattedContent {
        let timer = FormatTimer::start();

        let citations = CitationIndex::new(&answer.citations);
        let blocks = classify(segment(&answer.content), &citations);

        if blocks.is_empty() {
            timer.finish();
            return empty_content(&self.options);
        }

        // Extraction reads unwrapped text; line breaks end sentences
        let unwrapped = render_plain_text(&blocks, 0);
        let related_topics = self.extractor.related_topics(&unwrapped);
        let key_points =
            self.extractor
                .key_points(&blocks, &unwrapped, self.options.prefer_bullet_points);
        let summary = self.extractor.summary(&unwrapped);
        let plain_text = if self.options.max_line_length > 0 {
            render_plain_text(&blocks, self.options.max_line_length)
        } else {
            unwrapped
        };

        let renderer = Renderer::new(&self.options, &citations, &related_topics);
        let mut usage = CitationUsage::default();

        let sections: Vec<ContentSection> = blocks
            .into_iter()
            .enumerate()
            .map(|(index, classified)| ContentSection {
                index,
                section_type: classified.block.section_type(),
                rendered_html: renderer.render_block(index, &classified, &mut usage),
                importance: classified.importance,
                citation_ids: classified.citation_ids,
                raw_text: classified.block.raw_text,
            })
            .collect();

        let rendered: Vec<String> = sections.iter().map(|s| s.rendered_html.clone()).collect();
        let html = renderer.render_document(&rendered);
        let stats = reading_stats(&plain_text);

        metrics::record_sections(sections.iter().map(|s| &s.section_type));
        metrics::record_citations(usage.total_linked(), usage.missing);
        timer.finish();

        debug!(
            answer_id = %answer.id,
            sections = sections.len(),
            citations = citations.len(),
            linked = usage.total_linked(),
            missing = usage.missing,
            usage = ?usage.linked,
            words = stats.word_count,
            "Answer formatted"
        );

        FormattedContent {
            html,
            plain_text,
            structured_data: StructuredData {
                sections,
                key_points,
                related_topics,
                summary,
            },
            reading_time: stats.reading_time,
            word_count: stats.word_count,
        }
    }
}

/// Minimal output for blank content: one empty high-importance paragraph
fn empty_content(options: &AnswerFormatOptions) -> FormattedContent {
    let index = CitationIndex::new(&[]);
    let renderer = Renderer::new(options, &index, &[]);
    let placeholder = ClassifiedBlock {
        block: Block {
            body: BlockBody::Paragraph { lines: Vec::new() },
            raw_text: String::new(),
        },
        importance: Importance::High,
        citation_ids: Vec::new(),
    };

    let section = ContentSection {
        index: 0,
        section_type: SectionType::Paragraph,
        raw_text: String::new(),
        rendered_html: renderer.render_block(0, &placeholder, &mut CitationUsage::default()),
        importance: Importance::High,
        citation_ids: Vec::new(),
    };
    let html = renderer.render_document(std::slice::from_ref(&section.rendered_html));

    FormattedContent {
        html,
        plain_text: String::new(),
        structured_data: StructuredData {
            sections: vec![section],
            key_points: Vec::new(),
            related_topics: Vec::new(),
            summary: String::new(),
        },
        reading_time: 0,
        word_count: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_then_get_options() {
        let mut formatter = AnswerFormatter::new(AnswerFormatOptions {
            highlight_key_terms: true,
            ..Default::default()
        });

        formatter.update_options(AnswerFormatOptionsUpdate {
            include_citations: Some(false),
            ..Default::default()
        });

        let options = formatter.options();
        assert!(!options.include_citations);
        assert!(options.highlight_key_terms);
        assert!(options.enable_markdown);
        assert!(options.enable_tables);
        assert!(options.enable_lists);
    }

    #[test]
    fn test_update_options_json() {
        let mut formatter = AnswerFormatter::default();

        formatter
            .update_options_json(json!({"enableTables": false, "unknownKey": 42}))
            .unwrap();
        assert!(!formatter.options().enable_tables);

        let err = formatter
            .update_options_json(json!({"enableLists": "no", "enableMarkdown": false}))
            .unwrap_err();
        assert!(err.is_client_error());
        // rejected update changes nothing
        assert!(formatter.options().enable_lists);
        assert!(formatter.options().enable_markdown);

        assert!(formatter.update_options_json(json!([true])).is_err());
    }

    #[test]
    fn test_blank_content_yields_minimal_output() {
        let formatter = AnswerFormatter::default();

        for content in ["", "   \n\n\t"] {
            let formatted = formatter.format_answer(&GeneratedAnswer::new(content, vec![]));
            let sections = &formatted.structured_data.sections;

            assert_eq!(sections.len(), 1);
            assert_eq!(sections[0].section_type, SectionType::Paragraph);
            assert_eq!(sections[0].importance, Importance::High);
            assert_eq!(formatted.word_count, 0);
            assert_eq!(formatted.reading_time, 0);
            assert_eq!(formatted.plain_text, "");
            assert!(formatted.html.contains("<p "));
        }
    }

    #[test]
    fn test_sections_are_indexed_in_order() {
        let formatter = AnswerFormatter::default();
        let formatted = formatter.format_answer(&GeneratedAnswer::new(
            "Intro.\n\n- a point here\n\n> a quote",
            vec![],
        ));

        let sections = &formatted.structured_data.sections;
        let indexes: Vec<usize> = sections.iter().map(|s| s.index).collect();
        assert_eq!(indexes, vec![0, 1, 2]);
        assert_eq!(sections[1].section_type, SectionType::List);
        assert_eq!(sections[2].section_type, SectionType::Quote);
        assert!(formatted.html.contains(&sections[1].rendered_html));
    }

    #[test]
    fn test_wrapping_leaves_summary_and_key_points_whole() {
        let content = "Retrieval augmented generation grounds every answer in sources. \
                       The retriever ranks passages by relevance. \
                       The generator then writes a fluent reply. \
                       Finally the formatter renders the answer for display.";
        let answer = GeneratedAnswer::new(content, vec![]);

        let unwrapped = AnswerFormatter::default().format_answer(&answer);
        let wrapped = AnswerFormatter::new(AnswerFormatOptions {
            max_line_length: 30,
            ..Default::default()
        })
        .format_answer(&answer);

        assert_eq!(
            wrapped.structured_data.summary,
            "Retrieval augmented generation grounds every answer in sources. \
             Finally the formatter renders the answer for display."
        );
        assert_eq!(wrapped.structured_data.summary, unwrapped.structured_data.summary);
        assert_eq!(wrapped.structured_data.key_points, unwrapped.structured_data.key_points);
        assert_eq!(wrapped.word_count, unwrapped.word_count);

        assert!(wrapped.plain_text.lines().all(|line| line.chars().count() <= 30));
        assert!(wrapped.plain_text.lines().count() > 1);
    }

    #[test]
    fn test_custom_extractor_limits() {
        let formatter = AnswerFormatter::with_config(
            AnswerFormatOptions::default(),
            ExtractorConfig {
                max_key_points: 1,
                ..Default::default()
            },
        );
        let formatted = formatter.format_answer(&GeneratedAnswer::new(
            "- first useful point\n- second useful point",
            vec![],
        ));
        assert_eq!(formatted.structured_data.key_points, vec!["first useful point."]);
    }
}
