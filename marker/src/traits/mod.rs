//!
//! Traits Module
//!
//! This module contains the core traits used throughout the marker system for extensibility and abstraction.
//!
//! - [`parser`]: Defines the generic trait for parsing rubric data into Rust types.
//! - [`provider`]: Defines the grading provider seam and its error type.
//!
//! Implement these traits to plug in new rubric sources or grading backends.

pub mod parser;
pub mod provider;
