use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use employee_sdk::SdkError;
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upstream error: {0}")]
    Upstream(SdkError),
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(format!("Validation failed: {}", errors))
    }
}

impl From<SdkError> for ApiError {
    fn from(err: SdkError) -> Self {
        match err {
            SdkError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            other => ApiError::Upstream(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, details) = match &self {
            ApiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(msg.clone()),
            ),
            ApiError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                "Resource not found",
                Some(msg.clone()),
            ),
            ApiError::Upstream(err) => {
                tracing::error!("Upstream error: {:?}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Upstream error", Some(err.to_string()))
            }
        };

        let mut response_json = json!({
            "error": message,
        });

        if let Some(details_msg) = details {
            response_json["details"] = json!(details_msg);
        }

        (status, Json(response_json)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
