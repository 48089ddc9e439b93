//! # Parsers
//!
//! This module is responsible for parsing custom grading rubrics.
//! Each parser implements the [`Parser`](crate::traits::parser::Parser) trait and produces a
//! validated [`RubricSpec`](crate::types::RubricSpec).
//!
//! The available parsers are:
//! - [`rubric_parser::JsonRubricParser`]: For the rubric fields posted with a grading request.
//! - [`rubric_parser::CriteriaRubricParser`]: For stored rubric-criteria rows.

pub mod rubric_parser;
