//! Counting helpers for essay text.
//!
//! Every count is the number of pieces produced by splitting on a separator
//! pattern, so leading or trailing separators contribute an empty piece. That keeps
//! the counts identical to what the web front-end shows for the same text.

use once_cell::sync::Lazy;
use regex::Regex;

static WORD_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());
static PARAGRAPH_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n|\r\n\s*\r\n").unwrap());
static SENTENCE_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?]+\s").unwrap());

pub fn count_words(text: &str) -> usize {
    WORD_SEPARATOR.split(text).count()
}

pub fn count_paragraphs(text: &str) -> usize {
    PARAGRAPH_SEPARATOR.split(text).count()
}

/// Never returns zero, so it is always safe to divide by.
pub fn count_sentences(text: &str) -> usize {
    SENTENCE_SEPARATOR.split(text).count().max(1)
}
