//! Citation Linker - Resolves inline `[n]` markers against the citation list
//!
//! Markers are 1-based positions into the answer's citations. Resolution goes
//! through a lookup built once per formatted answer, so a missing citation is
//! an explicit branch instead of an out-of-range index.

use super::text::escape_html;
use crate::models::Citation;
use regex_lite::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

fn marker_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\[(\d+)\]").expect("citation marker pattern is valid"))
}

fn strip_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[ \t]*\[\d+\]").expect("citation strip pattern is valid"))
}

/// 1-based lookup of an answer's citations
#[derive(Debug)]
pub struct CitationIndex<'a> {
    by_number: HashMap<usize, &'a Citation>,
}

impl<'a> CitationIndex<'a> {
    pub fn new(citations: &'a [Citation]) -> Self {
        let by_number = citations
            .iter()
            .enumerate()
            .map(|(i, citation)| (i + 1, citation))
            .collect();
        Self { by_number }
    }

    /// Look up the citation a marker's digits refer to
    pub fn resolve(&self, digits: &str) -> Option<&'a Citation> {
        let number = digits.parse::<usize>().ok()?;
        self.by_number.get(&number).copied()
    }

    /// Ids of resolvable citations referenced in `text`, first mention order
    pub fn referenced_ids(&self, text: &str) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        if self.is_empty() {
            return ids;
        }
        for cap in marker_pattern().captures_iter(text) {
            if let Some(citation) = cap.get(1).and_then(|m| self.resolve(m.as_str())) {
                if !ids.contains(&citation.id) {
                    ids.push(citation.id.clone());
                }
            }
        }
        ids
    }

    pub fn len(&self) -> usize {
        self.by_number.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_number.is_empty()
    }
}

/// Per-call counts of how often each citation was linked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CitationUsage {
    /// Citation number -> times linked
    pub linked: BTreeMap<usize, usize>,

    /// Markers that referenced no citation
    pub missing: usize,
}

impl CitationUsage {
    pub fn total_linked(&self) -> usize {
        self.linked.values().sum()
    }
}

/// Remove every citation marker (and the whitespace before it).
///
/// Repeats until nothing matches so text like `[[1]2]` cannot leave a marker
/// behind.
pub fn strip_markers(text: &str) -> String {
    let mut current = text.to_string();
    while strip_pattern().is_match(&current) {
        current = strip_pattern().replace_all(&current, "").into_owned();
    }
    current
}

/// Substitutes markers in already-escaped HTML text
pub struct CitationLinker<'a> {
    index: &'a CitationIndex<'a>,
    include_citations: bool,
}

impl<'a> CitationLinker<'a> {
    pub fn new(index: &'a CitationIndex<'a>, include_citations: bool) -> Self {
        Self {
            index,
            include_citations,
        }
    }

    /// Replace markers in `escaped` with citation links or missing markers
    pub fn link_html(&self, escaped: &str, usage: &mut CitationUsage) -> String {
        if !self.include_citations {
            return strip_markers(escaped);
        }

        let mut out = String::with_capacity(escaped.len());
        let mut last = 0;

        for cap in marker_pattern().captures_iter(escaped) {
            let (Some(whole), Some(digits)) = (cap.get(0), cap.get(1)) else {
                continue;
            };
            out.push_str(&escaped[last..whole.start()]);

            match self.index.resolve(digits.as_str()) {
                Some(citation) => {
                    if let Ok(number) = digits.as_str().parse::<usize>() {
                        *usage.linked.entry(number).or_insert(0) += 1;
                    }
                    out.push_str(&citation_link(citation, digits.as_str()));
                }
                None => {
                    usage.missing += 1;
                    out.push_str(&missing_marker(digits.as_str()));
                }
            }
            last = whole.end();
        }

        out.push_str(&escaped[last..]);
        out
    }
}

fn citation_link(citation: &Citation, digits: &str) -> String {
    let title = if citation.document_title.trim().is_empty() {
        format!("Source {}", digits)
    } else {
        citation.document_title.clone()
    };

    let href = if citation.url.trim().is_empty() {
        String::new()
    } else {
        format!(" href=\"{}\"", escape_html(citation.url.trim()))
    };

    format!(
        "<a class=\"citation\" data-citation-id=\"{}\" data-citation-index=\"{}\" title=\"{}\"{}>[{}]</a>",
        escape_html(&citation.id),
        digits,
        escape_html(&title),
        href,
        digits
    )
}

fn missing_marker(digits: &str) -> String {
    format!(
        "<span class=\"citation citation-missing\" data-citation-index=\"{}\" title=\"Citation not found\">[{}]</span>",
        digits, digits
    )
}
