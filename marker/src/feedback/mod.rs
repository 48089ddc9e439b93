//! # Grading Providers Module
//!
//! This module provides the pluggable grading providers for the marker system.
//! Each provider implements the [`GradingProvider`](crate::traits::provider::GradingProvider)
//! trait and turns a grading request into a complete grading result.
//!
//! ## Available Providers
//!
//! - [`auto_feedback`]: Deterministic, template-based grading from text heuristics.
//! - [`ai_feedback`]: Uses an LLM (DeepSeek) to grade the essay and write the feedback.

pub mod ai_feedback;
pub mod auto_feedback;
