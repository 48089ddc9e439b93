//! # Grading Provider Trait
//!
//! A [`GradingProvider`] turns a [`GradingRequest`] into a [`GradingResult`]. The grading
//! job asks its provider first and falls back to the heuristic grader on any
//! [`ProviderError`], so implementations never need to produce a "best effort" result
//! of their own.
//!
//! Implementations:
//! - [`AutoFeedback`](crate::feedback::auto_feedback::AutoFeedback): the deterministic
//!   heuristic grader. Never fails on validated input.
//! - [`AiFeedback`](crate::feedback::ai_feedback::AiFeedback): an external
//!   chat-completions model.

use crate::error::MarkerError;
use crate::types::{GradingRequest, GradingResult};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Why a provider could not produce a usable result.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request to grading provider failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("grading provider returned HTTP {0}: {1}")]
    Status(u16, String),

    #[error("grading provider returned an unusable response: {0}")]
    MalformedResponse(String),

    #[error("grading provider did not answer within {0} ms")]
    Timeout(u128),

    #[error("grading request rejected: {0}")]
    Rejected(#[from] MarkerError),
}

#[async_trait]
pub trait GradingProvider: Send + Sync {
    /// Grades one request. The request has already passed the blank-input checks.
    async fn grade(&self, request: &GradingRequest) -> Result<GradingResult, ProviderError>;

    /// Short name used in logs.
    fn name(&self) -> &'static str;
}

#[async_trait]
impl<P: GradingProvider + ?Sized> GradingProvider for Arc<P> {
    async fn grade(&self, request: &GradingRequest) -> Result<GradingResult, ProviderError> {
        (**self).grade(request).await
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
