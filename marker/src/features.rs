//! # Feature Extraction
//!
//! Derives the numeric and boolean signals that drive heuristic grading from the
//! assignment instructions and the student's answer. Extraction is a pure function
//! of its two inputs; the compiled patterns are immutable statics shared by all
//! callers.
//!
//! Answer signals:
//! - word, paragraph and sentence counts (see [`crate::utilities::text_metrics`]);
//! - evidence markers (causal connectives, citation language, "data", "example", ...);
//! - structural markers (ordinals and transitions);
//! - creativity markers.
//!
//! Instruction signals classify the essay type. The flags are not mutually
//! exclusive: "Research and discuss..." is both a research and an analysis prompt.

use crate::utilities::text_metrics::{count_paragraphs, count_sentences, count_words};
use once_cell::sync::Lazy;
use regex::Regex;

static EVIDENCE_MARKERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)because|therefore|since|as a result|consequently|research shows|studies indicate|according to|evidence|data|statistics|example",
    )
    .unwrap()
});
static STRUCTURE_MARKERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)first|second|third|finally|in conclusion|to summarize|in summary|to begin with|moreover|furthermore",
    )
    .unwrap()
});
static CREATIVITY_MARKERS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)imagine|creative|unique|novel|innovative|original").unwrap());

static ANALYSIS_PROMPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)analy[sz]e|critical|discuss|examine|explain").unwrap());
static ARGUMENTATIVE_PROMPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)argue|persuade|convince|position|stance|defend").unwrap());
static CREATIVE_PROMPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)creative|imagine|story|narrative").unwrap());
static RESEARCH_PROMPT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)research|investigate|sources|evidence|data").unwrap());

/// Signals extracted from one instructions/answer pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EssayFeatures {
    pub word_count: usize,
    pub paragraph_count: usize,
    pub sentence_count: usize,
    pub avg_sentence_length: f64,
    pub has_evidence: bool,
    pub has_structure: bool,
    pub has_creativity: bool,
    pub is_analysis: bool,
    pub is_argumentative: bool,
    pub is_creative: bool,
    pub is_research: bool,
}

impl EssayFeatures {
    /// Extracts features from already-validated, non-empty inputs.
    pub fn extract(instructions: &str, answer: &str) -> Self {
        let word_count = count_words(answer);
        let sentence_count = count_sentences(answer);

        Self {
            word_count,
            paragraph_count: count_paragraphs(answer),
            sentence_count,
            avg_sentence_length: word_count as f64 / sentence_count as f64,
            has_evidence: EVIDENCE_MARKERS.is_match(answer),
            has_structure: STRUCTURE_MARKERS.is_match(answer),
            has_creativity: CREATIVITY_MARKERS.is_match(answer),
            is_analysis: ANALYSIS_PROMPT.is_match(instructions),
            is_argumentative: ARGUMENTATIVE_PROMPT.is_match(instructions),
            is_creative: CREATIVE_PROMPT.is_match(instructions),
            is_research: RESEARCH_PROMPT.is_match(instructions),
        }
    }
}
