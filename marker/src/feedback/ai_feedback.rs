//! # AI Feedback Provider
//!
//! This module provides a [`GradingProvider`] that grades essays with a Large Language Model,
//! specifically the DeepSeek chat-completions API. The model is asked to return the complete
//! grading result (summary, six feedback items and the rubric) as a single JSON object.
//!
//! ## Overview
//!
//! - The system prompt describes the expected JSON layout (see `grading_prompt.txt`).
//! - The user message carries the assignment instructions and the student answer. When the
//!   request has a custom rubric, the rubric is appended as JSON so the model scores against it.
//! - `choices[0].message.content` is parsed as a [`GradingResult`]. Markdown code fences
//!   around the JSON are tolerated.
//!
//! Any transport failure, non-2xx status or unparsable payload becomes a [`ProviderError`];
//! the grading job then falls back to the heuristic grader.
//!
//! ## Environment
//!
//! - Requires `DEEPSEEK_API_KEY`. Without it [`AiFeedback::from_config`] returns `None`.

use crate::traits::provider::{GradingProvider, ProviderError};
use crate::types::{GradingRequest, GradingResult, RubricSpec};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use util::config::AppConfig;

const SYSTEM_PROMPT: &str = include_str!("grading_prompt.txt");
const TEMPERATURE: f32 = 0.2;
const MAX_TOKENS: u32 = 4096;

/// AI grading provider backed by DeepSeek.
#[derive(Debug, Clone)]
pub struct AiFeedback {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

/// Request body for the chat-completions endpoint.
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    response_format: ResponseFormat,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: MessageResponse,
}

#[derive(Debug, Deserialize)]
struct MessageResponse {
    content: Option<String>,
}

/// The part of the rubric the model needs to score against it.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RubricPrompt<'a> {
    categories: &'a [String],
    category_weights: &'a [u32],
    levels: &'a [String],
    criteria_matrix: &'a std::collections::BTreeMap<String, std::collections::BTreeMap<String, String>>,
}

impl AiFeedback {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
        }
    }

    /// Builds a provider from the application config, or `None` when no API key is set.
    pub fn from_config(config: &AppConfig) -> Option<Self> {
        config.has_provider().then(|| {
            Self::new(
                config.deepseek_api_key.clone(),
                config.deepseek_base_url.clone(),
                config.deepseek_model.clone(),
            )
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        )
    }

    fn request_body<'a>(&'a self, request: &GradingRequest) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: SYSTEM_PROMPT.trim_end().to_string(),
                },
                Message {
                    role: "user",
                    content: user_message(request),
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

fn rubric_prompt(rubric: &RubricSpec) -> String {
    let prompt = RubricPrompt {
        categories: &rubric.categories,
        category_weights: &rubric.weights,
        levels: &rubric.levels,
        criteria_matrix: &rubric.matrix,
    };
    // Plain strings and integers only; serialization cannot fail.
    serde_json::to_string_pretty(&prompt).unwrap_or_default()
}

fn user_message(request: &GradingRequest) -> String {
    let mut message = format!(
        "Assignment Instructions: {}\n\nStudent Answer: {}",
        request.instructions, request.answer
    );
    if let Some(rubric) = &request.rubric {
        message.push_str(
            "\n\nGrading Rubric (use one rubric entry per category, with maxScore equal to the \
             category weight and level taken from the listed levels):\n",
        );
        message.push_str(&rubric_prompt(rubric));
    }
    message
}

/// Removes a surrounding Markdown code fence, if any.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Extracts the grading result from a raw chat-completions response body.
fn parse_completion(body: &str) -> Result<GradingResult, ProviderError> {
    let response: ChatResponse = serde_json::from_str(body).map_err(|e| {
        ProviderError::MalformedResponse(format!("error decoding response body: {e}"))
    })?;

    let content = response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ProviderError::MalformedResponse("response has no message".to_string()))?;

    serde_json::from_str(strip_code_fence(&content)).map_err(|e| {
        ProviderError::MalformedResponse(format!("message is not a grading result: {e}"))
    })
}

#[async_trait]
impl GradingProvider for AiFeedback {
    async fn grade(&self, request: &GradingRequest) -> Result<GradingResult, ProviderError> {
        info!(model = %self.model, "Using DeepSeek for essay grading");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&self.request_body(request))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16(), body));
        }

        debug!(bytes = body.len(), "DeepSeek response received");
        parse_completion(&body)
    }

    fn name(&self) -> &'static str {
        "deepseek"
    }
}
