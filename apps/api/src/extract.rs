//! Request extractors whose rejections use the API's error body.

use axum::extract::FromRequest;

use crate::errors::AppError;

/// `axum::Json`, but a malformed or mistyped body becomes a 400
/// `VALIDATION_ERROR` instead of axum's plain-text rejection.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);
