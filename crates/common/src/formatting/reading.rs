//! Word count and reading time

/// Average adult reading speed
pub const WORDS_PER_MINUTE: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingStats {
    pub word_count: usize,

    /// Whole minutes, rounded up; 0 only for empty text
    pub reading_time: u32,
}

/// Measure `plain_text`
pub fn reading_stats(plain_text: &str) -> ReadingStats {
    let word_count = plain_text.split_whitespace().count();
    let minutes = word_count.div_ceil(WORDS_PER_MINUTE);

    ReadingStats {
        word_count,
        reading_time: u32::try_from(minutes).unwrap_or(u32::MAX),
    }
}
