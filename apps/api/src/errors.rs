use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::llm_client::sanitize::ResponseParseFailed;
use crate::llm_client::ModelRequestFailed;

/// Message shown to consumers for any model or parse failure.
pub const GENERATION_FAILED_MESSAGE: &str = "Content generation failed";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller-supplied input broke a constraint; the message names it.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    ModelRequestFailed(#[from] ModelRequestFailed),

    #[error(transparent)]
    ResponseParseFailed(#[from] ResponseParseFailed),
}

impl AppError {
    /// Builds the HTTP response. With `expose_detail`, model and parse
    /// failures carry their diagnostic message in a `detail` field.
    pub fn to_response(&self, expose_detail: bool) -> Response {
        let (status, code, message, detail) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
                None,
            ),
            AppError::ModelRequestFailed(e) => {
                tracing::error!(status = ?e.status, "Model request failed: {}", e.message);
                (
                    StatusCode::BAD_GATEWAY,
                    "MODEL_REQUEST_FAILED",
                    GENERATION_FAILED_MESSAGE.to_string(),
                    Some(json!({ "upstreamStatus": e.status, "message": e.message })),
                )
            }
            AppError::ResponseParseFailed(e) => {
                tracing::error!(raw = %e.raw, "Model response parse failed: {} ({})", e.reason, e.kind);
                (
                    StatusCode::BAD_GATEWAY,
                    "RESPONSE_PARSE_FAILED",
                    GENERATION_FAILED_MESSAGE.to_string(),
                    Some(json!({ "kind": e.kind.to_string(), "message": e.reason })),
                )
            }
        };

        let mut error: Value = json!({
            "code": code,
            "message": message
        });
        if let (true, Some(detail)) = (expose_detail, detail) {
            error["detail"] = detail;
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}

/// Body rejections (missing field, wrong type, bad JSON, wrong content type)
/// are caller mistakes and report the violated constraint.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_response(false)
    }
}

/// An `AppError` paired with the deployment's disclosure policy.
/// Handlers map into this so development builds see full diagnostics.
#[derive(Debug)]
pub struct ApiError {
    pub error: AppError,
    pub expose_detail: bool,
}

impl ApiError {
    pub fn new(error: impl Into<AppError>, expose_detail: bool) -> Self {
        Self {
            error: error.into(),
            expose_detail,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.error.to_response(self.expose_detail)
    }
}
