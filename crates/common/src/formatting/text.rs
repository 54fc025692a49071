//! Small text helpers shared by the renderer and extractors

use regex_lite::Regex;
use std::sync::OnceLock;

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn tag_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"</?[A-Za-z][^<>]*>").expect("tag pattern is valid"))
}

fn bold_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\*\*([^*\n]+)\*\*").expect("bold pattern is valid"))
}

fn inline_code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"`([^`\n]+)`").expect("inline code pattern is valid"))
}

/// `**bold**` and backtick spans to HTML; input must already be escaped
pub(crate) fn inline_markup(escaped: &str) -> String {
    let with_code = inline_code_pattern().replace_all(escaped, "<code>$1</code>");
    bold_pattern()
        .replace_all(&with_code, "<strong>$1</strong>")
        .into_owned()
}

/// Drop inline markdown markers and HTML tags, keeping their text
pub(crate) fn strip_inline_markup(text: &str) -> String {
    let without_tags = tag_pattern().replace_all(text, "");
    let without_code = inline_code_pattern().replace_all(&without_tags, "$1");
    bold_pattern().replace_all(&without_code, "$1").into_owned()
}

/// Split prose into trimmed sentences, keeping terminal punctuation.
///
/// A sentence ends at `.`, `!` or `?` followed by whitespace or end of text,
/// and at every line break.
pub(crate) fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();

    for line in text.lines() {
        let mut current = String::new();
        let mut chars = line.chars().peekable();

        while let Some(c) = chars.next() {
            current.push(c);
            let at_boundary = chars.peek().map_or(true, |next| next.is_whitespace());
            if matches!(c, '.' | '!' | '?') && at_boundary {
                push_sentence(&mut sentences, &current);
                current.clear();
            }
        }
        push_sentence(&mut sentences, &current);
    }

    sentences
}

fn push_sentence(sentences: &mut Vec<String>, candidate: &str) {
    let trimmed = candidate.trim();
    if trimmed.chars().any(char::is_alphanumeric) {
        sentences.push(trimmed.to_string());
    }
}

/// Lowercased alphanumeric words, for comparisons that ignore punctuation
pub(crate) fn normalize(text: &str) -> String {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Greedy word wrap; words longer than `width` get a line of their own
pub(crate) fn wrap_line(line: &str, width: usize) -> String {
    if width == 0 || line.chars().count() <= width {
        return line.to_string();
    }

    let mut wrapped = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let needed = current.chars().count() + word.chars().count() + usize::from(!current.is_empty());
        if !current.is_empty() && needed > width {
            wrapped.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        wrapped.push(current);
    }

    wrapped.join("\n")
}
