//! # Scorer Module
//!
//! Turns [`EssayFeatures`] into the five heuristic sub-scores and provides the
//! helpers used to weight those scores against a custom rubric.
//!
//! The formulas are deliberately simple and monotonic. All arithmetic is integer
//! floor division followed by a clamp to `[1, 10]`, so identical inputs always
//! produce identical scores.
//!
//! | dimension    | formula                                                          |
//! |--------------|------------------------------------------------------------------|
//! | content      | `words/100 + 3·evidence`                                         |
//! | organization | `paragraphs/2 + 3·structure`                                     |
//! | analysis     | `3·analysis_prompt + 3·evidence + sentences/10`                  |
//! | language     | `floor(10 - abs(avg_sentence_length - 15))`                      |
//! | creativity   | `3·creative_prompt + 3·creativity + words/150`                   |

use crate::features::EssayFeatures;
use crate::types::Dimension;

pub const MIN_SCORE: u32 = 1;
pub const MAX_SCORE: u32 = 10;

/// Sum of the five fixed-category maxima.
pub const FIXED_MAX_TOTAL: u32 = MAX_SCORE * 5;

/// The five heuristic sub-scores, each in `[1, 10]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryScores {
    pub content: u32,
    pub organization: u32,
    pub analysis: u32,
    pub language: u32,
    pub creativity: u32,
}

fn clamp_score(raw: i64) -> u32 {
    raw.clamp(MIN_SCORE as i64, MAX_SCORE as i64) as u32
}

fn bonus(flag: bool) -> i64 {
    if flag { 3 } else { 0 }
}

impl CategoryScores {
    pub fn compute(features: &EssayFeatures) -> Self {
        let words = features.word_count as i64;
        let paragraphs = features.paragraph_count as i64;
        let sentences = features.sentence_count as i64;
        let sentence_drift = (features.avg_sentence_length - 15.0).abs();

        Self {
            content: clamp_score(words / 100 + bonus(features.has_evidence)),
            organization: clamp_score(paragraphs / 2 + bonus(features.has_structure)),
            analysis: clamp_score(
                bonus(features.is_analysis) + bonus(features.has_evidence) + sentences / 10,
            ),
            language: clamp_score((10.0 - sentence_drift).floor() as i64),
            creativity: clamp_score(
                bonus(features.is_creative) + bonus(features.has_creativity) + words / 150,
            ),
        }
    }

    pub fn get(&self, dimension: Dimension) -> u32 {
        match dimension {
            Dimension::Content => self.content,
            Dimension::Organization => self.organization,
            Dimension::Analysis => self.analysis,
            Dimension::Language => self.language,
            Dimension::Creativity => self.creativity,
        }
    }

    pub fn total(&self) -> u32 {
        Dimension::ALL.iter().map(|d| self.get(*d)).sum()
    }

    /// Floor of the mean sub-score; used for rubric categories that match no dimension.
    pub fn mean(&self) -> u32 {
        self.total() / Dimension::ALL.len() as u32
    }
}

/// Everything the feedback and rubric templates can branch on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradingContext {
    pub features: EssayFeatures,
    pub scores: CategoryScores,
}

impl GradingContext {
    pub fn new(instructions: &str, answer: &str) -> Self {
        let features = EssayFeatures::extract(instructions, answer);
        let scores = CategoryScores::compute(&features);
        Self { features, scores }
    }

    /// Total of the five heuristic sub-scores (5..=50), independent of any custom rubric.
    pub fn total(&self) -> u32 {
        self.scores.total()
    }
}

/// Scales a 1..10 score onto a category worth `weight` marks, rounding half up.
pub fn weighted_score(score: u32, weight: u32) -> u32 {
    (score * weight + MAX_SCORE / 2) / MAX_SCORE
}

/// Picks the index of the level a 1..10 score falls into, for levels listed from the
/// highest proficiency to the lowest.
///
/// The score range is cut into `level_count` equal bands; a 10 always lands on the
/// first (highest) level and a 1 on the last.
pub fn level_index(score: u32, level_count: usize) -> usize {
    if level_count == 0 {
        return 0;
    }
    let band = ((score.saturating_sub(1)) as usize * level_count) / MAX_SCORE as usize;
    (level_count - 1) - band.min(level_count - 1)
}
