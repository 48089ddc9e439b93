use axum::{Json, http::StatusCode};
use serde::Serialize;

/// JSON envelope returned by every endpoint: `{ "success", "data", "message" }`.
///
/// Failed requests carry `data: null` when `T` is an `Option`, which is how the grading
/// route reports bad input:
///
/// ```json
/// { "success": false, "data": null, "message": "Instructions and answer are required" }
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// A successful envelope around `data`.
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    /// A failed envelope whose `data` is `T::default()`.
    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }

    /// Pairs the envelope with a status code, ready to return from a handler.
    pub fn with_status(self, status: StatusCode) -> (StatusCode, Json<Self>) {
        (status, Json(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_uses_null_data_for_options() {
        let response: ApiResponse<Option<String>> = ApiResponse::error("Nope");
        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({"success": false, "data": null, "message": "Nope"})
        );
    }

    #[test]
    fn with_status_keeps_envelope() {
        let (status, Json(body)) = ApiResponse::success(1, "ok").with_status(StatusCode::CREATED);
        assert_eq!(status, StatusCode::CREATED);
        assert!(body.success);
        assert_eq!(body.data, 1);
    }
}
