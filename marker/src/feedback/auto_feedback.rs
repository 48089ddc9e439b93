//! # AutoFeedback Provider
//!
//! This module provides the `AutoFeedback` provider for the marker system.
//! It implements the [`GradingProvider`] trait on top of the deterministic heuristic
//! grader ([`crate::grade`]): feature extraction, category scoring, feedback composition
//! and rubric assembly, with no network access.
//!
//! [`GradingJob`](crate::GradingJob) falls back to [`crate::grade`] itself; this wrapper is for
//! callers that want the heuristic grader behind the same seam as an external provider, for
//! example as the explicit provider of a job or of the HTTP server's state.

use crate::traits::provider::{GradingProvider, ProviderError};
use crate::types::{GradingRequest, GradingResult};
use async_trait::async_trait;

/// Heuristic grading provider. Identical requests always produce identical results.
#[derive(Debug, Clone, Copy, Default)]
pub struct AutoFeedback;

#[async_trait]
impl GradingProvider for AutoFeedback {
    async fn grade(&self, request: &GradingRequest) -> Result<GradingResult, ProviderError> {
        Ok(crate::grade(
            &request.instructions,
            &request.answer,
            request.rubric.as_ref(),
        )?)
    }

    fn name(&self) -> &'static str {
        "heuristic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GradingJob;
    use crate::error::MarkerError;
    use crate::report::GradingSource;
    use crate::types::RubricSpec;

    #[tokio::test]
    async fn test_grades_like_the_core() {
        let request = GradingRequest::new("Write.", "Short.");
        let result = AutoFeedback.grade(&request).await.unwrap();
        assert_eq!(result, crate::grade("Write.", "Short.", None).unwrap());
        assert_eq!(result.total_score, 5);
    }

    #[tokio::test]
    async fn test_job_accepts_heuristic_results() {
        let rubric = RubricSpec {
            categories: vec!["Task Fulfilment".into(), "Penmanship".into()],
            levels: vec!["High".into(), "Low".into()],
            weights: vec![30, 20],
            ..RubricSpec::default()
        };
        for request in [
            GradingRequest::new("Analyze the causes.", "However, the war began in 1914."),
            GradingRequest::new("Write.", "Short.").with_rubric(rubric),
        ] {
            let expected = crate::grade(
                &request.instructions,
                &request.answer,
                request.rubric.as_ref(),
            )
            .unwrap();
            let report = GradingJob::new(request)
                .with_provider(AutoFeedback)
                .run()
                .await
                .unwrap();
            assert_eq!(report.source, GradingSource::Provider);
            assert_eq!(report.result, expected);
        }
    }

    #[tokio::test]
    async fn test_blank_answer_is_rejected() {
        let request = GradingRequest::new("Write.", "   ");
        let err = AutoFeedback.grade(&request).await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Rejected(MarkerError::MissingInput(_))
        ));
    }
}
