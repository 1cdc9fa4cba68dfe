//! Axum route handlers for the learning API.

use axum::{extract::State, Json};

use crate::errors::ApiError;
use crate::extract::AppJson;
use crate::learning::models::{
    EvaluationRequest, EvaluationResponse, LearningRequest, SubmitLearningResponse,
};
use crate::state::AppState;

/// POST /api/submitLearningRequest
///
/// Returns a short overview of the topic and a beginner quiz about it.
pub async fn handle_submit_learning_request(
    State(state): State<AppState>,
    AppJson(request): AppJson<LearningRequest>,
) -> Result<Json<SubmitLearningResponse>, ApiError> {
    let response = state
        .learning
        .submit_learning_request(request)
        .await
        .map_err(|e| ApiError::new(e, state.expose_error_detail))?;

    Ok(Json(response))
}

/// POST /api/evaluateKnowledge
///
/// Scores the submitted answers and returns a learning path for the resulting
/// level. No score is returned if learning-path generation fails.
pub async fn handle_evaluate_knowledge(
    State(state): State<AppState>,
    AppJson(request): AppJson<EvaluationRequest>,
) -> Result<Json<EvaluationResponse>, ApiError> {
    let response = state
        .learning
        .evaluate_knowledge(request)
        .await
        .map_err(|e| ApiError::new(e, state.expose_error_detail))?;

    Ok(Json(response))
}
