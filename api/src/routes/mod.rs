//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → Health check endpoint
//! - `/grade` → Essay grading

use crate::middleware::log_request;
use crate::routes::{grade::grade_routes, health::health_routes};
use crate::state::AppState;
use axum::{Router, middleware::from_fn};
use tower_http::cors::CorsLayer;

pub mod grade;
pub mod health;

/// Builds the router for every endpoint under `/api`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/health", health_routes())
        .nest("/grade", grade_routes())
}

/// Builds the complete application: `/api` routes, request logging and a permissive CORS policy.
///
/// The same router is served by `main` and driven directly in the integration tests.
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes())
        .layer(from_fn(log_request))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}
