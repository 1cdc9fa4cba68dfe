use std::sync::Arc;
use std::time::Instant;

use crate::learning::service::LearningService;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub learning: Arc<LearningService>,
    /// Development mode: error responses include diagnostic detail.
    pub expose_error_detail: bool,
    pub started_at: Instant,
}
