//! # Marker Library
//!
//! This crate provides the core logic for automated grading of free-text essays.
//! Given assignment instructions and a student answer (optionally with a custom rubric matrix),
//! it derives a structured [`GradingResult`]: a summary, six categorized feedback items, per-criterion
//! rubric scores and the aggregate score.
//!
//! ## Key Concepts
//! - **Features**: numeric and boolean signals extracted from the text ([`features`]).
//! - **Scores**: five heuristic sub-scores in `[1, 10]` ([`scorer`]).
//! - **Composer**: the summary and glow/grow/think feedback ([`composer`]).
//! - **Rubric**: the fixed five-category rubric, or a weighted custom one ([`rubric`]).
//! - **Providers**: pluggable graders such as an external LLM ([`feedback`], [`traits::provider`]).
//! - **GradingJob**: asks a provider first and falls back to the heuristic grader.
//!
//! ## Example
//!
//! ```rust
//! let result = marker::grade("Discuss the causes of World War I.", "The war began in 1914.", None)?;
//! assert_eq!(result.feedback.len(), 6);
//! assert_eq!(result.max_score, 50);
//! # Ok::<(), marker::error::MarkerError>(())
//! ```

pub mod composer;
pub mod error;
pub mod feedback;
pub mod features;
pub mod parsers;
pub mod report;
pub mod rubric;
pub mod scorer;
pub mod traits;
pub mod types;
pub mod utilities;

use crate::composer::{compose_feedback, compose_summary};
use crate::error::MarkerError;
use crate::report::{GradingReport, GradingSource};
use crate::rubric::{assemble_fixed, assemble_weighted};
use crate::scorer::{GradingContext, MAX_SCORE};
use crate::traits::provider::{GradingProvider, ProviderError};
use crate::types::{
    Dimension, FeedbackKind, GradingRequest, GradingResult, Level, RubricLineItem, RubricSpec,
};

use std::time::Duration;
use tracing::{debug, info, warn};

/// Rejects blank instructions or answers before any work is done.
fn require_input(instructions: &str, answer: &str) -> Result<(), MarkerError> {
    if instructions.trim().is_empty() {
        return Err(MarkerError::MissingInput("instructions".to_string()));
    }
    if answer.trim().is_empty() {
        return Err(MarkerError::MissingInput("answer".to_string()));
    }
    Ok(())
}

fn build_result(ctx: &GradingContext, rubric: Vec<RubricLineItem>) -> GradingResult {
    GradingResult::from_parts(compose_summary(ctx), compose_feedback(ctx), rubric)
}

/// Grades an essay with the heuristic grader.
///
/// A valid `rubric` replaces the five fixed categories with its own weighted ones. A malformed
/// rubric is logged and ignored, and the fixed categories are used instead.
///
/// # Errors
/// Returns [`MarkerError::MissingInput`] if `instructions` or `answer` is blank.
pub fn grade(
    instructions: &str,
    answer: &str,
    rubric: Option<&RubricSpec>,
) -> Result<GradingResult, MarkerError> {
    require_input(instructions, answer)?;
    let ctx = GradingContext::new(instructions, answer);
    debug!(features = ?ctx.features, scores = ?ctx.scores, "Extracted essay features");

    let lines = match rubric.map(|spec| spec.validate().map(|()| spec)) {
        Some(Ok(spec)) => assemble_weighted(&ctx, spec),
        Some(Err(err)) => {
            warn!(error = %err, "Ignoring malformed rubric, grading against the fixed categories");
            assemble_fixed(&ctx)
        }
        None => assemble_fixed(&ctx),
    };

    Ok(build_result(&ctx, lines))
}

/// Grades an essay against a custom rubric, failing instead of falling back when it is malformed.
///
/// # Errors
/// Returns [`MarkerError::MissingInput`] for blank input, then
/// [`MarkerError::MalformedRubric`] if the rubric fails validation.
pub fn grade_against_rubric(
    instructions: &str,
    answer: &str,
    rubric: &RubricSpec,
) -> Result<GradingResult, MarkerError> {
    require_input(instructions, answer)?;
    rubric.validate()?;
    let ctx = GradingContext::new(instructions, answer);
    Ok(build_result(&ctx, assemble_weighted(&ctx, rubric)))
}

const FEEDBACK_ORDER: [FeedbackKind; 6] = [
    FeedbackKind::Glow,
    FeedbackKind::Glow,
    FeedbackKind::Grow,
    FeedbackKind::Grow,
    FeedbackKind::Think,
    FeedbackKind::Think,
];

fn malformed(reason: String) -> ProviderError {
    ProviderError::MalformedResponse(reason)
}

/// A rubric line must carry the expected title, maximum and a level allowed for its score.
fn check_line(
    line: &RubricLineItem,
    title: &str,
    max_score: u32,
    level_ok: impl FnOnce(&str) -> bool,
) -> Result<(), ProviderError> {
    if line.title != title {
        return Err(malformed(format!(
            "expected rubric line '{title}', got '{}'",
            line.title
        )));
    }
    if line.max_score != max_score {
        return Err(malformed(format!(
            "rubric line '{title}' is out of {} instead of {max_score}",
            line.max_score
        )));
    }
    if line.score > line.max_score {
        return Err(malformed(format!(
            "rubric line '{title}' scores {} out of {}",
            line.score, line.max_score
        )));
    }
    if !level_ok(&line.level) {
        return Err(malformed(format!(
            "rubric line '{title}' has level '{}' for a score of {}",
            line.level, line.score
        )));
    }
    Ok(())
}

/// Checks a provider's result against the shape the heuristic grader would produce, then
/// recomputes its totals from the rubric lines.
///
/// `rubric` is the custom rubric in force, if any; without one the five fixed categories
/// are expected, each out of 10 and labelled with the level matching its score.
fn accept_provider_result(
    mut result: GradingResult,
    rubric: Option<&RubricSpec>,
) -> Result<GradingResult, ProviderError> {
    let kinds: Vec<FeedbackKind> = result.feedback.iter().map(|f| f.kind).collect();
    if kinds != FEEDBACK_ORDER {
        return Err(malformed(format!(
            "expected feedback glow, glow, grow, grow, think, think; got {kinds:?}"
        )));
    }

    match rubric {
        Some(spec) => {
            if result.rubric.len() != spec.categories.len() {
                return Err(malformed(format!(
                    "{} rubric lines for {} categories",
                    result.rubric.len(),
                    spec.categories.len()
                )));
            }
            for ((line, category), &weight) in
                result.rubric.iter().zip(&spec.categories).zip(&spec.weights)
            {
                check_line(line, category, weight, |level| {
                    spec.levels.iter().any(|l| l == level)
                })?;
            }
        }
        None => {
            if result.rubric.len() != Dimension::ALL.len() {
                return Err(malformed(format!(
                    "{} rubric lines instead of {}",
                    result.rubric.len(),
                    Dimension::ALL.len()
                )));
            }
            for (line, dimension) in result.rubric.iter().zip(Dimension::ALL) {
                check_line(line, dimension.title(), MAX_SCORE, |level| {
                    level == Level::from_score(line.score).as_str()
                })?;
            }
        }
    }

    let (total_score, max_score) = result
        .line_totals()
        .ok_or_else(|| malformed("rubric totals overflow".to_string()))?;
    if (total_score, max_score) != (result.total_score, result.max_score) {
        debug!(
            total_score = result.total_score,
            max_score = result.max_score,
            "Provider totals disagree with rubric lines, recomputing"
        );
    }
    result.total_score = total_score;
    result.max_score = max_score;
    Ok(result)
}

/// A grading job for a single essay.
///
/// The job asks its provider (if any) once, under a timeout. When there is no provider, or the
/// provider fails, times out or returns an unusable result, the essay is graded by the heuristic
/// grader instead. Only blank input makes the job fail.
pub struct GradingJob<'a> {
    request: GradingRequest,
    provider: Option<Box<dyn GradingProvider + 'a>>,
    timeout: Duration,
}

impl<'a> GradingJob<'a> {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a new grading job that uses only the heuristic grader.
    pub fn new(request: GradingRequest) -> Self {
        Self {
            request,
            provider: None,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Set the provider to ask before falling back.
    pub fn with_provider<P: GradingProvider + 'a>(mut self, provider: P) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Set how long to wait for the provider.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn ask(&self, provider: &dyn GradingProvider) -> Result<GradingResult, ProviderError> {
        let result = tokio::time::timeout(self.timeout, provider.grade(&self.request))
            .await
            .map_err(|_| ProviderError::Timeout(self.timeout.as_millis()))??;
        let rubric = self
            .request
            .rubric
            .as_ref()
            .filter(|spec| spec.validate().is_ok());
        accept_provider_result(result, rubric)
    }

    /// Run the job and produce a report.
    ///
    /// # Errors
    /// Returns [`MarkerError::MissingInput`] if the instructions or answer is blank. The
    /// provider is not contacted in that case.
    pub async fn run(self) -> Result<GradingReport, MarkerError> {
        require_input(&self.request.instructions, &self.request.answer)?;

        if let Some(provider) = self.provider.as_deref() {
            match self.ask(provider).await {
                Ok(result) => {
                    info!(
                        provider = provider.name(),
                        total_score = result.total_score,
                        max_score = result.max_score,
                        "Essay graded by provider"
                    );
                    return Ok(GradingReport::new(GradingSource::Provider, result));
                }
                Err(err) => {
                    warn!(
                        provider = provider.name(),
                        error = %err,
                        "Grading provider failed, falling back to heuristic grading"
                    );
                }
            }
        }

        let result = grade(
            &self.request.instructions,
            &self.request.answer,
            self.request.rubric.as_ref(),
        )?;
        info!(
            total_score = result.total_score,
            max_score = result.max_score,
            "Essay graded heuristically"
        );
        Ok(GradingReport::new(GradingSource::Fallback, result))
    }
}
