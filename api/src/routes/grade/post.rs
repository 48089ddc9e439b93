use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use marker::GradingJob;
use marker::error::MarkerError;
use marker::parsers::rubric_parser::{CriteriaRubricParser, JsonRubricParser};
use marker::report::GradingReport;
use marker::traits::parser::Parser;
use marker::types::{GradingRequest, RubricCriterion, RubricSpec};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{error, warn};

pub const MISSING_INPUT_MESSAGE: &str = "Instructions and answer are required";

/// Body of `POST /grade`.
///
/// The rubric fields are optional and flattened into the top level, exactly as the
/// grading form sends them; see [`JsonRubricParser`] for their layout. A client holding the
/// rubric editor's stored rows can send them as `criteria` instead.
#[derive(Debug, Deserialize)]
pub struct GradeRequest {
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub criteria: Option<Vec<RubricCriterion>>,
    #[serde(flatten)]
    pub rubric: Map<String, Value>,
}

impl GradeRequest {
    /// The custom rubric, if the request carries one that parses.
    ///
    /// A rubric that fails to parse is logged and dropped so the essay is still graded.
    fn rubric(&self) -> Option<RubricSpec> {
        let parsed = if self.rubric.get("categories").is_some_and(|v| !v.is_null()) {
            JsonRubricParser.parse(&Value::Object(self.rubric.clone()))
        } else if let Some(rows) = self.criteria.as_deref().filter(|rows| !rows.is_empty()) {
            CriteriaRubricParser.parse(rows)
        } else {
            return None;
        };

        match parsed {
            Ok(spec) => Some(spec),
            Err(err) => {
                warn!(
                    rubric_id = ?self.rubric.get("rubricId"),
                    error = %err,
                    "Ignoring unusable rubric, grading against the fixed categories"
                );
                None
            }
        }
    }
}

type GradeResponse = (StatusCode, Json<ApiResponse<Option<GradingReport>>>);

/// POST /grade
///
/// Grades an essay. The configured external provider is asked first; if there is none, or it
/// fails, the heuristic grader is used.
///
/// ### Request Body
/// ```json
/// {
///   "instructions": "Analyze the causes of World War I.",
///   "answer": "The war began in 1914 because ...",
///   "rubricId": "optional",
///   "categories": ["Task Fulfilment"],
///   "levels": ["C1", "B2"],
///   "categoryWeights": [30],
///   "criteriaMatrix": { "Task Fulfilment": { "C1": "..." } }
/// }
/// ```
///
/// or, with stored rubric rows instead of the flattened fields:
/// ```json
/// { "instructions": "...", "answer": "...",
///   "criteria": [{ "category": "Task Fulfilment", "level": "C1", "weight": 30, "order": 1 }] }
/// ```
///
/// ### Responses
/// - `200 OK` with a grading report:
/// ```json
/// {
///   "success": true,
///   "data": { "source": "fallback", "gradedAt": "...", "result": { "summary": "...", ... } },
///   "message": "Essay graded"
/// }
/// ```
/// - `400 Bad Request` when the body is not valid JSON, or instructions/answer is missing or blank:
/// ```json
/// { "success": false, "data": null, "message": "Instructions and answer are required" }
/// ```
pub async fn grade_essay(
    State(state): State<AppState>,
    payload: Result<Json<GradeRequest>, JsonRejection>,
) -> GradeResponse {
    let Json(body) = match payload {
        Ok(body) => body,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected grading request body");
            return ApiResponse::error(format!("Invalid request body: {}", rejection.body_text()))
                .with_status(StatusCode::BAD_REQUEST);
        }
    };

    let mut request = GradingRequest::new(
        body.instructions.clone().unwrap_or_default(),
        body.answer.clone().unwrap_or_default(),
    );
    if let Some(rubric) = body.rubric() {
        request = request.with_rubric(rubric);
    }

    let mut job = GradingJob::new(request).with_timeout(state.config().provider_timeout());
    if let Some(provider) = state.provider() {
        job = job.with_provider(provider);
    }

    match job.run().await {
        Ok(report) => ApiResponse::success(Some(report), "Essay graded").with_status(StatusCode::OK),
        Err(MarkerError::MissingInput(field)) => {
            warn!(field = %field, "Grading request missing input");
            ApiResponse::error(MISSING_INPUT_MESSAGE).with_status(StatusCode::BAD_REQUEST)
        }
        Err(err) => {
            error!(error = %err, "Grading failed");
            ApiResponse::error("Failed to grade essay").with_status(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> GradeRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn plain_request_has_no_rubric() {
        let req = parse(json!({"instructions": "Write.", "answer": "Short."}));
        assert!(req.rubric().is_none());
    }

    #[test]
    fn flattened_rubric_is_parsed() {
        let req = parse(json!({
            "instructions": "Write.",
            "answer": "Short.",
            "rubricId": "r-1",
            "rubricName": "Default",
            "categories": ["Task Fulfilment"],
            "levels": ["C1", "B2"],
            "bands": ["5", "4"],
            "markRanges": ["49-54", "37-48"],
            "categoryWeights": [30],
            "criteriaMatrix": {"Task Fulfilment": {"C1": "Fully relevant", "B2": ""}}
        }));
        let spec = req.rubric().unwrap();
        assert_eq!(spec.categories, vec!["Task Fulfilment"]);
        assert_eq!(spec.weights, vec![30]);
    }

    #[test]
    fn criteria_rows_are_parsed() {
        let req = parse(json!({
            "instructions": "Write.",
            "answer": "Short.",
            "criteria": [
                {"category": "Organisation", "level": "B2", "weight": 20, "order": 2},
                {"category": "Task Fulfilment", "level": "C1", "weight": 30,
                 "description": "Fully relevant", "order": 1},
                {"category": "Task Fulfilment", "level": "B2", "order": 3}
            ]
        }));
        let spec = req.rubric().unwrap();
        assert_eq!(spec.categories, vec!["Task Fulfilment", "Organisation"]);
        assert_eq!(spec.levels, vec!["C1", "B2"]);
        assert_eq!(spec.weights, vec![30, 20]);
        assert_eq!(spec.cell("Task Fulfilment", "C1"), Some("Fully relevant"));
    }

    #[test]
    fn flattened_fields_win_over_criteria_rows() {
        let req = parse(json!({
            "instructions": "Write.",
            "answer": "Short.",
            "categories": ["Range"],
            "levels": ["High"],
            "categoryWeights": [10],
            "criteria": [{"category": "Organisation", "level": "B2", "weight": 20}]
        }));
        assert_eq!(req.rubric().unwrap().categories, vec!["Range"]);
    }

    #[test]
    fn oversized_weights_are_dropped() {
        let req = parse(json!({
            "instructions": "Write.",
            "answer": "Short.",
            "categories": ["A", "B"],
            "levels": ["High"],
            "categoryWeights": [3000000000u64, 3000000000u64]
        }));
        assert!(req.rubric().is_none());
    }

    #[test]
    fn broken_rubric_is_dropped() {
        let req = parse(json!({
            "instructions": "Write.",
            "answer": "Short.",
            "categories": ["A", "B"],
            "levels": ["High"],
            "categoryWeights": [10]
        }));
        assert!(req.rubric().is_none());
    }
}
