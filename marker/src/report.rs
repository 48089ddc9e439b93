//! # Grading Report Module
//!
//! This module defines the serializable report returned by a [`GradingJob`](crate::GradingJob).
//! It wraps the [`GradingResult`] with the provenance the client needs: which grader produced it
//! and when.
//!
//! ## JSON Output Example
//!
//! ```json
//! {
//!   "source": "fallback",
//!   "gradedAt": "2025-09-01T10:15:00.123456Z",
//!   "result": {
//!     "summary": "This 412-word essay ...",
//!     "feedback": [ { "type": "glow", "content": "..." }, ... ],
//!     "rubric": [ { "id": 1, "title": "Content & Relevance", ... }, ... ],
//!     "totalScore": 31,
//!     "maxScore": 50
//!   }
//! }
//! ```

use crate::types::GradingResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which grader produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradingSource {
    /// The configured external provider.
    Provider,
    /// The heuristic grader, either because no provider is configured or because it failed.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingReport {
    pub source: GradingSource,
    pub graded_at: DateTime<Utc>,
    pub result: GradingResult,
}

impl GradingReport {
    pub fn new(source: GradingSource, result: GradingResult) -> Self {
        Self {
            source,
            graded_at: Utc::now(),
            result,
        }
    }
}
