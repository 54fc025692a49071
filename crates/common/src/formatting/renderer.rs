//! Renderer - Turns classified blocks into HTML and plain text
//!
//! Each block maps to a template chosen by its type and the active options.
//! Disabled block types degrade to a paragraph container that keeps the
//! block's text. Text inside every template goes through the same pipeline:
//! escape, highlight key terms, inline markup, then citation substitution, so
//! citation markup always nests inside the block's container.

use super::citations::{strip_markers, CitationIndex, CitationLinker, CitationUsage};
use super::classifier::{ClassifiedBlock, EMPHASIS_KEYWORDS};
use super::options::AnswerFormatOptions;
use super::segmenter::BlockBody;
use super::text::{escape_html, inline_markup, strip_inline_markup, wrap_line};
use crate::models::{Importance, SectionType};
use regex_lite::Regex;
use std::sync::OnceLock;
use tracing::warn;

/// HTML renderer for one formatted answer
pub struct Renderer<'a> {
    options: &'a AnswerFormatOptions,
    linker: CitationLinker<'a>,
    highlighter: Option<Regex>,
}

impl<'a> Renderer<'a> {
    /// `topics` are added to the emphasis keywords when highlighting is on
    pub fn new(
        options: &'a AnswerFormatOptions,
        citations: &'a CitationIndex<'a>,
        topics: &[String],
    ) -> Self {
        let highlighter = if options.highlight_key_terms {
            build_highlighter(topics)
        } else {
            None
        };

        Self {
            options,
            linker: CitationLinker::new(citations, options.include_citations),
            highlighter,
        }
    }

    /// Render one block as a self-contained fragment
    pub fn render_block(&self, index: usize, block: &ClassifiedBlock, usage: &mut CitationUsage) -> String {
        let section_type = block.block.section_type();
        let importance = block.importance;

        match &block.block.body {
            BlockBody::Paragraph { lines } => {
                let attrs = self.attrs("answer-paragraph", index, section_type, importance);
                format!("<p {}>{}</p>", attrs, self.render_text(&lines.join(" "), usage))
            }
            BlockBody::List { ordered, items } if self.options.enable_lists => {
                let tag = if *ordered { "ol" } else { "ul" };
                let attrs = self.attrs("answer-list", index, section_type, importance);
                let items: String = items
                    .iter()
                    .map(|item| format!("<li>{}</li>", self.render_text(item, usage)))
                    .collect();
                format!("<{tag} {attrs}>{items}</{tag}>")
            }
            BlockBody::Code { language, code } if self.options.enable_markdown => {
                let attrs = self.attrs("answer-code", index, section_type, importance);
                let class = language
                    .as_ref()
                    .map(|lang| format!(" class=\"language-{}\"", escape_html(lang)))
                    .unwrap_or_default();
                format!(
                    "<pre {}><code{}>{}</code></pre>",
                    attrs,
                    class,
                    self.render_code(code, usage)
                )
            }
            BlockBody::Table { header, rows } if self.options.renders_tables() => {
                let attrs = self.attrs("answer-table", index, section_type, importance);
                let head: String = header
                    .iter()
                    .map(|cell| format!("<th>{}</th>", self.render_text(cell, usage)))
                    .collect();
                let body: String = rows
                    .iter()
                    .map(|row| {
                        let cells: String = row
                            .iter()
                            .map(|cell| format!("<td>{}</td>", self.render_text(cell, usage)))
                            .collect();
                        format!("<tr>{}</tr>", cells)
                    })
                    .collect();
                format!(
                    "<table {}><thead><tr>{}</tr></thead><tbody>{}</tbody></table>",
                    attrs, head, body
                )
            }
            BlockBody::Quote { lines } if self.options.enable_markdown => {
                let attrs = self.attrs("answer-quote", index, section_type, importance);
                format!(
                    "<blockquote {}><p>{}</p></blockquote>",
                    attrs,
                    self.render_text(&lines.join(" "), usage)
                )
            }
            body => self.render_degraded(index, body, section_type, importance, usage),
        }
    }

    /// Wrap rendered sections in the document container
    pub fn render_document(&self, sections: &[String]) -> String {
        if self.options.mobile_optimized {
            format!(
                "<div class=\"formatted-answer formatted-answer--mobile\">{}</div>",
                sections.concat()
            )
        } else {
            format!("<div class=\"formatted-answer\">\n{}\n</div>", sections.join("\n"))
        }
    }

    /// Paragraph container keeping one line per source line of the block
    fn render_degraded(
        &self,
        index: usize,
        body: &BlockBody,
        section_type: SectionType,
        importance: Importance,
        usage: &mut CitationUsage,
    ) -> String {
        let attrs = self.attrs("answer-paragraph", index, section_type, importance);
        let lines = match body {
            BlockBody::Code { code, .. } => code
                .lines()
                .map(|line| self.render_code(line, usage))
                .collect::<Vec<_>>(),
            other => plain_lines(other)
                .iter()
                .map(|line| self.render_text(line, usage))
                .collect(),
        };
        format!("<p {}>{}</p>", attrs, lines.join("<br />"))
    }

    fn attrs(&self, class: &str, index: usize, section_type: SectionType, importance: Importance) -> String {
        let mut attrs = format!(
            "class=\"{} importance-{}\" data-importance=\"{}\"",
            class, importance, importance
        );
        if !self.options.mobile_optimized {
            attrs.push_str(&format!(
                " data-section-index=\"{}\" data-section-type=\"{}\"",
                index, section_type
            ));
        }
        attrs
    }

    fn render_text(&self, raw: &str, usage: &mut CitationUsage) -> String {
        let highlighted = self.highlight(escape_html(raw));
        let marked = if self.options.enable_markdown {
            inline_markup(&highlighted)
        } else {
            highlighted
        };
        self.linker.link_html(&marked, usage)
    }

    fn render_code(&self, raw: &str, usage: &mut CitationUsage) -> String {
        let highlighted = self.highlight(escape_html(raw));
        self.linker.link_html(&highlighted, usage)
    }

    fn highlight(&self, escaped: String) -> String {
        let Some(pattern) = &self.highlighter else {
            return escaped;
        };

        // Entities are opaque; only the text between them is searched
        let mut out = String::with_capacity(escaped.len());
        let mut last = 0;
        for entity in entity_pattern().find_iter(&escaped) {
            mark_terms(pattern, &escaped[last..entity.start()], &mut out);
            out.push_str(entity.as_str());
            last = entity.end();
        }
        mark_terms(pattern, &escaped[last..], &mut out);
        out
    }
}

fn entity_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"&(?:[A-Za-z]+|#[0-9]+);").expect("entity pattern is valid"))
}

/// Wrap whole-word matches in `text`; word edges are Unicode-aware
fn mark_terms(pattern: &Regex, text: &str, out: &mut String) {
    let mut last = 0;
    for found in pattern.find_iter(text) {
        let before = text[..found.start()].chars().next_back();
        let after = text[found.end()..].chars().next();
        if before.is_some_and(char::is_alphanumeric) || after.is_some_and(char::is_alphanumeric) {
            continue;
        }
        out.push_str(&text[last..found.start()]);
        out.push_str("<mark class=\"key-term\">");
        out.push_str(found.as_str());
        out.push_str("</mark>");
        last = found.end();
    }
    out.push_str(&text[last..]);
}

/// Case-insensitive matcher over keywords and topics, longest first
fn build_highlighter(topics: &[String]) -> Option<Regex> {
    let mut terms: Vec<String> = EMPHASIS_KEYWORDS
        .iter()
        .map(|k| k.to_string())
        .chain(topics.iter().cloned())
        .map(|t| t.trim().to_string())
        .filter(|t| t.chars().any(char::is_alphanumeric))
        .map(|t| regex_lite::escape(&t))
        .collect();
    terms.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    terms.dedup();

    let pattern = format!(r"(?i)(?:{})", terms.join("|"));
    match Regex::new(&pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!(error = %e, terms = terms.len(), "Key term pattern rejected, highlighting disabled");
            None
        }
    }
}

/// Text lines of a block as they read without markup
fn plain_lines(body: &BlockBody) -> Vec<String> {
    match body {
        BlockBody::Paragraph { lines } | BlockBody::Quote { lines } => lines.clone(),
        BlockBody::List { ordered, items } => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if *ordered {
                    format!("{}. {}", i + 1, item)
                } else {
                    format!("- {}", item)
                }
            })
            .collect(),
        BlockBody::Code { code, .. } => code.lines().map(str::to_string).collect(),
        BlockBody::Table { header, rows } => std::iter::once(header)
            .chain(rows.iter())
            .map(|cells| cells.join(" | "))
            .collect(),
    }
}

/// Citation-free, markup-free rendering; blocks separated by a blank line
pub fn render_plain_text(blocks: &[ClassifiedBlock], max_line_length: usize) -> String {
    blocks
        .iter()
        .map(|b| plain_block(&b.block.body, max_line_length))
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn plain_block(body: &BlockBody, max_line_length: usize) -> String {
    let is_code = matches!(body, BlockBody::Code { .. });

    plain_lines(body)
        .iter()
        .map(|line| {
            let text = if is_code {
                line.clone()
            } else {
                strip_inline_markup(line)
            };
            let text = strip_markers(&text).replace('<', "‹");
            if is_code {
                text.trim_end().to_string()
            } else {
                wrap_line(text.trim(), max_line_length)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
        .trim_matches('\n')
        .to_string()
}
