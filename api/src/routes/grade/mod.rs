//! # Grade Routes Module
//!
//! Defines the `/grade` endpoint group.
//!
//! ## Structure
//! - `post.rs` — `POST /grade`: grade one essay, optionally against a custom rubric.

pub mod post;

use crate::state::AppState;
use axum::{Router, routing::post};

use post::grade_essay;

/// Builds the `/grade` route group.
///
/// - `POST /grade` → `grade_essay`
pub fn grade_routes() -> Router<AppState> {
    Router::new().route("/", post(grade_essay))
}
