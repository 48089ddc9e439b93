use api::routes::app;
use api::state::AppState;
use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, header::CONTENT_TYPE},
    response::Response,
};
use marker::traits::provider::{GradingProvider, ProviderError};
use marker::types::{GradingRequest, GradingResult};
use serde_json::Value;
use std::sync::Arc;
use util::config::AppConfig;

/// App with no external provider: every essay goes through the heuristic grader.
pub fn make_test_app() -> Router {
    app(AppState::new(AppConfig::default()))
}

pub fn make_test_app_with_provider(provider: Arc<dyn GradingProvider>) -> Router {
    app(AppState::new(AppConfig::default()).with_provider(provider))
}

pub fn post_json(uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Answers every request with a canned result, or an error when none is set.
pub struct StubProvider(pub Option<GradingResult>);

#[async_trait]
impl GradingProvider for StubProvider {
    async fn grade(&self, _request: &GradingRequest) -> Result<GradingResult, ProviderError> {
        self.0
            .clone()
            .ok_or_else(|| ProviderError::Status(503, "unavailable".into()))
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}
