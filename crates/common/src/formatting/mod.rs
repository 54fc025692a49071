//! Answer Formatting Engine
//!
//! Turns a raw generated answer (markdown-like prose with `[n]` citation
//! markers) into render-ready content:
//! - Block segmentation and importance scoring
//! - Citation linking
//! - HTML and plain-text rendering
//! - Key point, related topic and summary extraction
//! - Word count and reading time

mod citations;
mod classifier;
mod extractor;
mod formatter;
mod options;
mod reading;
mod renderer;
mod segmenter;
mod text;

pub use citations::{strip_markers, CitationIndex, CitationLinker, CitationUsage};
pub use classifier::{classify, has_emphasis_keyword, score_importance, ClassifiedBlock, EMPHASIS_KEYWORDS};
pub use extractor::{Extractor, ExtractorConfig};
pub use formatter::AnswerFormatter;
pub use options::{AnswerFormatOptions, AnswerFormatOptionsUpdate};
pub use reading::{reading_stats, ReadingStats, WORDS_PER_MINUTE};
pub use renderer::{render_plain_text, Renderer};
pub use segmenter::{segment, Block, BlockBody};
