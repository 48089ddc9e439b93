//! Rubric parsing seam.
//!
//! A rubric reaches the grader in more than one shape: the flat fields posted alongside a
//! grading request, or the row-per-cell records kept by the rubric editor. Each shape gets
//! its own [`Parser`] implementation that ends in a validated value.
//!
//! ```rust
//! use marker::error::MarkerError;
//! use marker::traits::parser::Parser;
//! use serde_json::Value;
//!
//! struct CategoryCounter;
//!
//! impl<'a> Parser<&'a Value, usize> for CategoryCounter {
//!     fn parse(&self, raw: &'a Value) -> Result<usize, MarkerError> {
//!         raw.get("categories")
//!             .and_then(Value::as_array)
//!             .map(Vec::len)
//!             .ok_or_else(|| MarkerError::InvalidJson("missing 'categories'".to_string()))
//!     }
//! }
//!
//! let count = CategoryCounter.parse(&serde_json::json!({"categories": ["Task", "Range"]}))?;
//! assert_eq!(count, 2);
//! # Ok::<(), MarkerError>(())
//! ```

use crate::error::MarkerError;

/// Turns an `Input` borrowed from the caller into an owned `Output`.
pub trait Parser<Input, Output> {
    /// # Errors
    ///
    /// [`MarkerError::InvalidJson`] when the input has the wrong shape, or
    /// [`MarkerError::MalformedRubric`] when it parses but is inconsistent.
    fn parse(&self, input: Input) -> Result<Output, MarkerError>;
}
