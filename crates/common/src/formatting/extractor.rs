//! Extractor Suite - Key points, related topics and summary
//!
//! Lightweight heuristics over the classified blocks and the plain text:
//! - Key points from list items and sentences of high-importance prose
//! - Related topics from runs of capitalized words
//! - Summary from the first and last sentence of long answers

use super::citations::strip_markers;
use super::classifier::ClassifiedBlock;
use super::segmenter::BlockBody;
use super::text::{normalize, split_sentences, strip_inline_markup};
use crate::models::Importance;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Capitalized words that start sentences rather than name things
const TOPIC_STOPWORDS: &[&str] = &[
    "a", "about", "additionally", "after", "all", "also", "an", "and", "another", "are", "as",
    "at", "based", "be", "because", "before", "both", "but", "by", "each", "every", "finally",
    "first", "for", "from", "furthermore", "he", "her", "here", "his", "how", "however", "i",
    "if", "in", "is", "it", "its", "key", "many", "moreover", "most", "my", "no", "not", "note",
    "of", "on", "one", "or", "our", "overall", "second", "she", "so", "some", "such", "that",
    "the", "their", "then", "there", "therefore", "these", "they", "third", "this", "those",
    "thus", "to", "we", "what", "when", "where", "which", "while", "who", "why", "with", "yes",
    "you", "your",
];

/// Longest phrase kept as a single topic
const MAX_TOPIC_WORDS: usize = 4;

/// Extraction limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractorConfig {
    /// Maximum key points returned
    #[serde(alias = "max_key_points")]
    pub max_key_points: usize,

    /// Maximum related topics returned
    #[serde(alias = "max_related_topics")]
    pub max_related_topics: usize,

    /// Answers at most this many characters...
    #[serde(alias = "summary_max_chars")]
    pub summary_max_chars: usize,

    /// ...and at most this many sentences are their own summary
    #[serde(alias = "summary_max_sentences")]
    pub summary_max_sentences: usize,

    /// Key point length bounds, in words
    #[serde(alias = "key_point_min_words")]
    pub key_point_min_words: usize,
    #[serde(alias = "key_point_max_words")]
    pub key_point_max_words: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            max_key_points: 5,
            max_related_topics: 10,
            summary_max_chars: 300,
            summary_max_sentences: 2,
            key_point_min_words: 3,
            key_point_max_words: 30,
        }
    }
}

/// Derives key points, related topics and a summary
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Salient statements in document order, deduplicated
    pub fn key_points(
        &self,
        blocks: &[ClassifiedBlock],
        plain_text: &str,
        prefer_bullet_points: bool,
    ) -> Vec<String> {
        let has_list_items = blocks
            .iter()
            .any(|b| matches!(&b.block.body, BlockBody::List { items, .. } if !items.is_empty()));
        let lists_only = prefer_bullet_points && has_list_items;

        let mut points = Vec::new();
        let mut seen = HashSet::new();

        for candidate in blocks.iter().flat_map(|b| candidates(b, lists_only)) {
            if points.len() >= self.config.max_key_points {
                break;
            }
            let cleaned = clean(&candidate);
            if !self.is_key_point(&cleaned) {
                continue;
            }
            if seen.insert(normalize(&cleaned)) {
                points.push(finish_point(&cleaned, prefer_bullet_points));
            }
        }

        if points.is_empty() && self.config.max_key_points > 0 {
            if let Some(first) = split_sentences(plain_text).into_iter().next() {
                let words: Vec<&str> = first.split_whitespace().take(self.config.key_point_max_words).collect();
                points.push(finish_point(&words.join(" "), prefer_bullet_points));
            }
        }

        points
    }

    fn is_key_point(&self, sentence: &str) -> bool {
        let words = sentence.split_whitespace().count();
        words >= self.config.key_point_min_words
            && words <= self.config.key_point_max_words
            && !sentence.ends_with('?')
    }

    /// Capitalized phrases (candidate proper nouns), insertion order
    pub fn related_topics(&self, plain_text: &str) -> Vec<String> {
        let mut topics = Vec::new();
        let mut seen = HashSet::new();

        for phrase in capitalized_runs(plain_text) {
            if topics.len() >= self.config.max_related_topics {
                break;
            }
            if seen.insert(phrase.to_lowercase()) {
                topics.push(phrase);
            }
        }

        topics
    }

    /// Short text verbatim, otherwise first and last sentence
    pub fn summary(&self, plain_text: &str) -> String {
        let text = plain_text.trim();
        if text.is_empty() {
            return String::new();
        }

        let sentences = split_sentences(text);
        if text.chars().count() <= self.config.summary_max_chars
            && sentences.len() <= self.config.summary_max_sentences
        {
            return text.to_string();
        }

        match (sentences.first(), sentences.last()) {
            (Some(first), Some(last)) if sentences.len() > 1 => {
                format!("{} {}", with_terminal_punctuation(first), last)
            }
            (Some(only), _) => only.clone(),
            _ => text.to_string(),
        }
    }
}

fn candidates(block: &ClassifiedBlock, lists_only: bool) -> Vec<String> {
    match &block.block.body {
        BlockBody::List { items, .. } => items.clone(),
        _ if lists_only => Vec::new(),
        BlockBody::Paragraph { lines } | BlockBody::Quote { lines }
            if block.importance == Importance::High =>
        {
            split_sentences(&lines.join(" "))
        }
        _ => Vec::new(),
    }
}

fn clean(text: &str) -> String {
    strip_inline_markup(&strip_markers(text))
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn with_terminal_punctuation(sentence: &str) -> String {
    if sentence.ends_with(['.', '!', '?', ':']) {
        sentence.to_string()
    } else {
        format!("{}.", sentence)
    }
}

fn finish_point(point: &str, bullet_style: bool) -> String {
    if bullet_style {
        point.trim_end_matches('.').to_string()
    } else {
        with_terminal_punctuation(point)
    }
}

fn is_stopword(word: &str) -> bool {
    TOPIC_STOPWORDS.contains(&word.to_lowercase().as_str())
}

fn is_capitalized(word: &str) -> bool {
    let letters = word.chars().filter(|c| c.is_alphabetic()).count();
    letters >= 2 && word.chars().next().is_some_and(char::is_uppercase)
}

/// Runs of capitalized words, split at punctuation, stopwords trimmed
fn capitalized_runs(text: &str) -> Vec<String> {
    let mut runs = Vec::new();
    let mut current: Vec<&str> = Vec::new();

    for token in text.split_whitespace() {
        let word = token.trim_matches(|c: char| !c.is_alphanumeric());
        let opens_clause = token.starts_with(|c: char| !c.is_alphanumeric());
        let closes_clause = token.ends_with(|c: char| !c.is_alphanumeric());

        if opens_clause {
            flush_run(&mut current, &mut runs);
        }
        if is_capitalized(word) {
            current.push(word);
        } else {
            flush_run(&mut current, &mut runs);
        }
        if closes_clause {
            flush_run(&mut current, &mut runs);
        }
    }
    flush_run(&mut current, &mut runs);

    runs
}

fn flush_run(current: &mut Vec<&str>, runs: &mut Vec<String>) {
    let words: Vec<&str> = current
        .drain(..)
        .skip_while(|w| is_stopword(w))
        .take(MAX_TOPIC_WORDS)
        .collect();

    if !words.is_empty() && !words.iter().all(|w| is_stopword(w)) {
        runs.push(words.join(" "));
    }
}
