pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::learning::handlers;
use crate::state::AppState;

async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/submitLearningRequest",
            post(handlers::handle_submit_learning_request),
        )
        .route(
            "/api/evaluateKnowledge",
            post(handlers::handle_evaluate_knowledge),
        )
        .fallback(not_found)
        .with_state(state)
}
