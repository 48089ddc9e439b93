//! Marker Error Types
//!
//! This module defines the [`MarkerError`] enum, which covers every way a grading
//! request can be rejected by the marker before (or instead of) producing a result.
//!
//! # Usage
//!
//! Use [`MarkerError`] as the error type in functions that validate grading input or
//! parse rubric data. Provider failures have their own type,
//! [`ProviderError`](crate::traits::provider::ProviderError), because they never reach
//! the caller: the grading job always falls back to the heuristic grader instead.
//!
//! # Example
//!
//! ```rust
//! use marker::error::MarkerError;
//!
//! fn require_answer(answer: &str) -> Result<(), MarkerError> {
//!     if answer.trim().is_empty() {
//!         return Err(MarkerError::MissingInput("answer".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Represents all error types that can occur in the marker system.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkerError {
    /// `instructions` or `answer` was empty or whitespace-only.
    #[error("missing input: {0} must not be empty")]
    MissingInput(String),
    /// A rubric declared inconsistent categories, levels, weights or matrix cells.
    #[error("malformed rubric: {0}")]
    MalformedRubric(String),
    /// JSON is malformed or does not match the expected schema.
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
}
