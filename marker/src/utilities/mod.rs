//! # Utilities
//!
//! Helpers shared across the marker crate:
//! - [`text_metrics`]: word, paragraph and sentence counting.
//! - [`clauses`]: the `(gate, text)` tables used to write rubric descriptions and feedback.

pub mod clauses;
pub mod text_metrics;
