//! Importance Scorer - Assigns a salience level to each block
//!
//! Rules, applied in order:
//! 1. The first block is always high
//! 2. Structured blocks (list/table/quote/code) start at medium, prose at low
//! 3. A resolvable citation boosts one level
//! 4. An emphasis keyword boosts one more level

use super::citations::CitationIndex;
use super::segmenter::Block;
use crate::models::Importance;

/// Words signalling conclusions or emphasis
pub const EMPHASIS_KEYWORDS: &[&str] = &[
    "important",
    "importantly",
    "key",
    "critical",
    "crucial",
    "essential",
    "significant",
    "significantly",
    "therefore",
    "however",
    "conclusion",
    "notably",
];

/// Whether `text` contains an emphasis keyword as a whole word
pub fn has_emphasis_keyword(text: &str) -> bool {
    text.split(|c: char| !c.is_alphanumeric())
        .any(|word| EMPHASIS_KEYWORDS.iter().any(|k| word.eq_ignore_ascii_case(k)))
}

/// Score a block at `position` in the document
pub fn score_importance(block: &Block, position: usize, has_resolved_citation: bool) -> Importance {
    if position == 0 {
        return Importance::High;
    }

    let mut importance = if block.section_type().is_structured() {
        Importance::Medium
    } else {
        Importance::Low
    };

    if has_resolved_citation {
        importance = importance.boosted();
    }
    if has_emphasis_keyword(&block.raw_text) {
        importance = importance.boosted();
    }

    importance
}

/// A segmented block with its importance and resolved citation ids
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedBlock {
    pub block: Block,
    pub importance: Importance,
    pub citation_ids: Vec<String>,
}

/// Classify blocks in document order
pub fn classify(blocks: Vec<Block>, citations: &CitationIndex<'_>) -> Vec<ClassifiedBlock> {
    blocks
        .into_iter()
        .enumerate()
        .map(|(position, block)| {
            let citation_ids = citations.referenced_ids(&block.raw_text);
            let importance = score_importance(&block, position, !citation_ids.is_empty());
            ClassifiedBlock {
                block,
                importance,
                citation_ids,
            }
        })
        .collect()
}
