//! # Types Module
//!
//! This module defines the core data structures used throughout the marker system:
//! the grading request, the optional rubric matrix supplied by the rubric editor, and
//! the structured grading result handed back to callers.
//!
//! All wire-facing types serialize with camelCase keys so that the JSON matches what
//! the front-end and the external grading provider exchange.

use crate::error::MarkerError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// The three feedback buckets: strengths, improvement areas and discussion prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackKind {
    Glow,
    Grow,
    Think,
}

/// A single piece of feedback addressed to the author of the essay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackItem {
    #[serde(rename = "type")]
    pub kind: FeedbackKind,
    pub content: String,
}

impl FeedbackItem {
    pub fn new(kind: FeedbackKind, content: impl Into<String>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }
}

/// Qualitative label attached to a fixed-category rubric line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Below,
    Meets,
    Exceeds,
}

impl Level {
    /// Maps a 1..10 score onto the three-tier scale (`> 7` exceeds, `> 5` meets).
    pub fn from_score(score: u32) -> Self {
        if score > 7 {
            Level::Exceeds
        } else if score > 5 {
            Level::Meets
        } else {
            Level::Below
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Below => "Below expectations",
            Level::Meets => "Meets expectations",
            Level::Exceeds => "Exceeds expectations",
        }
    }
}

/// The five heuristic grading dimensions, in their fixed rubric order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Content,
    Organization,
    Analysis,
    Language,
    Creativity,
}

/// Keyword fragments used to map a custom rubric category onto a dimension.
/// Checked top to bottom; the first dimension with a matching fragment wins.
const DIMENSION_KEYWORDS: &[(Dimension, &[&str])] = &[
    (
        Dimension::Content,
        &[
            "content",
            "relevan",
            "topic",
            "thesis",
            "argument",
            "understanding",
            "knowledge",
            "task",
            "fulfil",
            "idea",
        ],
    ),
    (
        Dimension::Organization,
        &["organi", "structure", "coherence", "flow", "format"],
    ),
    (
        Dimension::Analysis,
        &["analy", "critical", "thinking", "reasoning", "evidence", "support"],
    ),
    (
        Dimension::Language,
        &[
            "language",
            "style",
            "grammar",
            "mechanic",
            "vocabulary",
            "lexi",
            "convention",
            "clarity",
            "writing",
        ],
    ),
    (
        Dimension::Creativity,
        &["creativ", "original", "voice", "innovat"],
    ),
];

impl Dimension {
    pub const ALL: [Dimension; 5] = [
        Dimension::Content,
        Dimension::Organization,
        Dimension::Analysis,
        Dimension::Language,
        Dimension::Creativity,
    ];

    /// Stable rubric id (1..5).
    pub fn id(&self) -> u32 {
        match self {
            Dimension::Content => 1,
            Dimension::Organization => 2,
            Dimension::Analysis => 3,
            Dimension::Language => 4,
            Dimension::Creativity => 5,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Dimension::Content => "Content & Relevance",
            Dimension::Organization => "Organization & Structure",
            Dimension::Analysis => "Critical Thinking & Analysis",
            Dimension::Language => "Language & Style",
            Dimension::Creativity => "Originality & Creativity",
        }
    }

    /// Best-effort mapping from a user-defined category name to a dimension.
    ///
    /// Returns `None` when no keyword matches; callers decide how to score those.
    pub fn classify(category: &str) -> Option<Dimension> {
        let name = category.to_lowercase();
        DIMENSION_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|k| name.contains(k)))
            .map(|(dimension, _)| *dimension)
    }
}

/// One scored rubric row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RubricLineItem {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub level: String,
    pub score: u32,
    pub max_score: u32,
}

/// The structured outcome of grading one essay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingResult {
    pub summary: String,
    pub feedback: Vec<FeedbackItem>,
    pub rubric: Vec<RubricLineItem>,
    pub total_score: u32,
    pub max_score: u32,
}

impl GradingResult {
    /// Builds a result whose totals are derived from its rubric lines.
    pub fn from_parts(
        summary: String,
        feedback: Vec<FeedbackItem>,
        rubric: Vec<RubricLineItem>,
    ) -> Self {
        let total_score = rubric.iter().fold(0u32, |acc, r| acc.saturating_add(r.score));
        let max_score = rubric.iter().fold(0u32, |acc, r| acc.saturating_add(r.max_score));
        Self {
            summary,
            feedback,
            rubric,
            total_score,
            max_score,
        }
    }

    /// `(total, max)` summed over the rubric lines, or `None` if either sum overflows.
    pub fn line_totals(&self) -> Option<(u32, u32)> {
        self.rubric.iter().try_fold((0u32, 0u32), |(total, max), line| {
            Some((
                total.checked_add(line.score)?,
                max.checked_add(line.max_score)?,
            ))
        })
    }

    /// True when `total_score` and `max_score` equal the sums of the rubric lines.
    pub fn totals_consistent(&self) -> bool {
        self.line_totals() == Some((self.total_score, self.max_score))
    }
}

/// A user-defined rubric matrix, as produced by the rubric editor.
///
/// `weights` is parallel to `categories`; `levels` are ordered from the highest
/// proficiency to the lowest, and `bands`/`mark_ranges` are parallel to `levels`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RubricSpec {
    pub categories: Vec<String>,
    pub levels: Vec<String>,
    #[serde(default)]
    pub bands: Vec<String>,
    #[serde(default)]
    pub mark_ranges: Vec<String>,
    pub weights: Vec<u32>,
    #[serde(default)]
    pub matrix: BTreeMap<String, BTreeMap<String, String>>,
}

impl RubricSpec {
    /// Upper bound on the sum of all category weights.
    pub const MAX_TOTAL_WEIGHT: u32 = 100_000;

    /// Checks the structural invariants of the rubric.
    ///
    /// # Errors
    /// Returns [`MarkerError::MalformedRubric`] when categories or levels are empty or
    /// duplicated, when the weight count differs from the category count, when a weight
    /// is zero, when the weights add up to more than [`Self::MAX_TOTAL_WEIGHT`], or when the
    /// matrix references an undeclared category or level.
    pub fn validate(&self) -> Result<(), MarkerError> {
        if self.categories.is_empty() {
            return Err(MarkerError::MalformedRubric(
                "rubric declares no categories".to_string(),
            ));
        }
        if self.levels.is_empty() {
            return Err(MarkerError::MalformedRubric(
                "rubric declares no levels".to_string(),
            ));
        }
        if self.weights.len() != self.categories.len() {
            return Err(MarkerError::MalformedRubric(format!(
                "{} weights for {} categories",
                self.weights.len(),
                self.categories.len()
            )));
        }

        let categories: HashSet<&str> = self.categories.iter().map(String::as_str).collect();
        if categories.len() != self.categories.len() {
            return Err(MarkerError::MalformedRubric(
                "duplicate category names".to_string(),
            ));
        }
        let levels: HashSet<&str> = self.levels.iter().map(String::as_str).collect();
        if levels.len() != self.levels.len() {
            return Err(MarkerError::MalformedRubric(
                "duplicate level names".to_string(),
            ));
        }

        if let Some((category, _)) = self
            .categories
            .iter()
            .zip(&self.weights)
            .find(|(_, w)| **w == 0)
        {
            return Err(MarkerError::MalformedRubric(format!(
                "category '{category}' has a weight of zero"
            )));
        }

        match self.total_weight() {
            Some(total) if total <= Self::MAX_TOTAL_WEIGHT => {}
            _ => {
                return Err(MarkerError::MalformedRubric(format!(
                    "category weights add up to more than {}",
                    Self::MAX_TOTAL_WEIGHT
                )));
            }
        }

        for (category, row) in &self.matrix {
            if !categories.contains(category.as_str()) {
                return Err(MarkerError::MalformedRubric(format!(
                    "matrix references undeclared category '{category}'"
                )));
            }
            if let Some(level) = row.keys().find(|l| !levels.contains(l.as_str())) {
                return Err(MarkerError::MalformedRubric(format!(
                    "matrix row '{category}' references undeclared level '{level}'"
                )));
            }
        }

        Ok(())
    }

    /// The criterion text for a category at a level, if the editor filled it in.
    pub fn cell(&self, category: &str, level: &str) -> Option<&str> {
        self.matrix
            .get(category)
            .and_then(|row| row.get(level))
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    /// Sum of the category weights, or `None` if it does not fit in a `u32`.
    pub fn total_weight(&self) -> Option<u32> {
        self.weights
            .iter()
            .try_fold(0u32, |total, &weight| total.checked_add(weight))
    }
}

/// One stored rubric-criteria row: a single category × level cell.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RubricCriterion {
    pub category: String,
    pub level: String,
    #[serde(default)]
    pub band: Option<String>,
    #[serde(default)]
    pub mark_range: Option<String>,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub order: Option<i64>,
}

/// Everything needed to grade one essay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingRequest {
    pub instructions: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rubric: Option<RubricSpec>,
}

impl GradingRequest {
    pub fn new(instructions: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            instructions: instructions.into(),
            answer: answer.into(),
            rubric: None,
        }
    }

    pub fn with_rubric(mut self, rubric: RubricSpec) -> Self {
        self.rubric = Some(rubric);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec() -> RubricSpec {
        let mut matrix = BTreeMap::new();
        matrix.insert(
            "Task Fulfilment".to_string(),
            BTreeMap::from([("C1".to_string(), "Fully addresses the task".to_string())]),
        );
        RubricSpec {
            categories: vec!["Task Fulfilment".into(), "Organisation".into()],
            levels: vec!["C1".into(), "B2".into()],
            bands: vec!["5".into(), "4".into()],
            mark_ranges: vec!["49-54".into(), "36-43".into()],
            weights: vec![30, 20],
            matrix,
        }
    }

    #[test]
    fn level_thresholds() {
        assert_eq!(Level::from_score(1), Level::Below);
        assert_eq!(Level::from_score(5), Level::Below);
        assert_eq!(Level::from_score(6), Level::Meets);
        assert_eq!(Level::from_score(7), Level::Meets);
        assert_eq!(Level::from_score(8), Level::Exceeds);
        assert_eq!(Level::from_score(10).as_str(), "Exceeds expectations");
    }

    #[test]
    fn classify_maps_fixed_titles_to_themselves() {
        for dimension in Dimension::ALL {
            assert_eq!(Dimension::classify(dimension.title()), Some(dimension));
        }
    }

    #[test]
    fn classify_handles_editor_defaults() {
        assert_eq!(
            Dimension::classify("Task Fulfilment"),
            Some(Dimension::Content)
        );
        assert_eq!(
            Dimension::classify("Structures, Lexis & Organisation"),
            Some(Dimension::Organization)
        );
        assert_eq!(Dimension::classify("Penmanship"), None);
    }

    #[test]
    fn valid_spec_passes() {
        assert_eq!(spec().validate(), Ok(()));
        assert_eq!(spec().total_weight(), Some(50));
    }

    #[test]
    fn weight_count_mismatch_is_malformed() {
        let mut s = spec();
        s.weights.pop();
        assert!(matches!(s.validate(), Err(MarkerError::MalformedRubric(_))));
    }

    #[test]
    fn oversized_weights_are_malformed() {
        let mut s = spec();
        s.weights = vec![3_000_000_000, 3_000_000_000];
        assert_eq!(s.total_weight(), None);
        assert!(matches!(s.validate(), Err(MarkerError::MalformedRubric(_))));

        s.weights = vec![60_000, 50_000];
        assert!(matches!(s.validate(), Err(MarkerError::MalformedRubric(_))));

        s.weights = vec![RubricSpec::MAX_TOTAL_WEIGHT - 1, 1];
        assert_eq!(s.validate(), Ok(()));
    }

    #[test]
    fn zero_weight_is_malformed() {
        let mut s = spec();
        s.weights[1] = 0;
        assert!(matches!(s.validate(), Err(MarkerError::MalformedRubric(_))));
    }

    #[test]
    fn matrix_with_unknown_level_is_malformed() {
        let mut s = spec();
        s.matrix
            .get_mut("Task Fulfilment")
            .unwrap()
            .insert("A1".into(), "Unknown".into());
        let err = s.validate().unwrap_err();
        assert!(err.to_string().contains("'A1'"));
    }

    #[test]
    fn matrix_with_unknown_category_is_malformed() {
        let mut s = spec();
        s.matrix.insert("Penmanship".into(), BTreeMap::new());
        assert!(matches!(s.validate(), Err(MarkerError::MalformedRubric(_))));
    }

    #[test]
    fn blank_cells_are_treated_as_missing() {
        let mut s = spec();
        s.matrix
            .get_mut("Task Fulfilment")
            .unwrap()
            .insert("B2".into(), "   ".into());
        assert_eq!(s.cell("Task Fulfilment", "C1"), Some("Fully addresses the task"));
        assert_eq!(s.cell("Task Fulfilment", "B2"), None);
        assert_eq!(s.cell("Organisation", "C1"), None);
    }

    #[test]
    fn result_serializes_with_wire_names() {
        let result = GradingResult::from_parts(
            "Summary".into(),
            vec![FeedbackItem::new(FeedbackKind::Glow, "Nice")],
            vec![RubricLineItem {
                id: 1,
                title: "Content & Relevance".into(),
                description: "Good".into(),
                level: "Meets expectations".into(),
                score: 6,
                max_score: 10,
            }],
        );
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["feedback"][0], json!({"type": "glow", "content": "Nice"}));
        assert_eq!(value["rubric"][0]["maxScore"], 10);
        assert_eq!(value["totalScore"], 6);
        assert_eq!(value["maxScore"], 10);
        assert!(result.totals_consistent());
    }
}
