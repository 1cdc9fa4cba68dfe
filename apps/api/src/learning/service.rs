//! Learning Service — orchestrates the two learning operations.
//!
//! Submit:   validate → overview (prose) → quiz (JSON) → response.
//! Evaluate: validate → score → learning path (JSON) → response.
//!
//! Stages run strictly in sequence. Any failure aborts the whole operation;
//! nothing computed by an earlier stage is returned on its own.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::config::StageTokenBudgets;
use crate::errors::AppError;
use crate::learning::models::{
    EvaluationRequest, EvaluationResponse, KnowledgeLevel, LearningPath, LearningPathEnvelope,
    LearningRequest, Question, SubmitLearningResponse,
};
use crate::learning::prompts::{
    build_learning_path_prompt, build_overview_prompt, build_quiz_prompt, learning_path_system,
    quiz_system, OVERVIEW_SYSTEM,
};
use crate::learning::scoring;
use crate::learning::validation::{
    check_generated_learning_path, check_generated_quiz, validate_evaluation_request,
    validate_learning_request,
};
use crate::llm_client::sanitize::{self, ResponseParseFailed};
use crate::llm_client::{CompletionClient, CompletionRequest};

/// Stateless orchestrator shared by all requests behind an `Arc`.
pub struct LearningService {
    llm: Arc<dyn CompletionClient>,
    budgets: StageTokenBudgets,
    /// Development only: where decoded quizzes are written for inspection.
    debug_artifact_dir: Option<PathBuf>,
}

impl LearningService {
    pub fn new(llm: Arc<dyn CompletionClient>, budgets: StageTokenBudgets) -> Self {
        Self {
            llm,
            budgets,
            debug_artifact_dir: None,
        }
    }

    pub fn with_debug_artifacts(mut self, dir: impl Into<PathBuf>) -> Self {
        self.debug_artifact_dir = Some(dir.into());
        self
    }

    /// Produces an overview and a quiz for a topic.
    pub async fn submit_learning_request(
        &self,
        request: LearningRequest,
    ) -> Result<SubmitLearningResponse, AppError> {
        let request = validate_learning_request(request)?;
        let request_id = Uuid::new_v4();

        info!(%request_id, topic = %request.topic, "Processing learning request");

        let overview = self
            .llm
            .complete(&CompletionRequest::new(
                OVERVIEW_SYSTEM,
                build_overview_prompt(&request.topic, &request.purpose),
                self.budgets.overview,
            ))
            .await
            .inspect_err(|e| warn!(%request_id, "Overview generation failed: {e}"))?;

        let questions = self
            .generate_quiz(&request.topic)
            .await
            .inspect_err(|e| warn!(%request_id, "Quiz generation failed: {e}"))?;

        if let Some(dir) = &self.debug_artifact_dir {
            write_debug_artifact(dir, request_id, &questions).await;
        }

        info!(
            %request_id,
            questions = questions.len(),
            "Learning request processed successfully"
        );

        Ok(SubmitLearningResponse {
            overview,
            questions,
            request_id,
        })
    }

    /// Scores the answers and produces a learning path for the resulting level.
    pub async fn evaluate_knowledge(
        &self,
        request: EvaluationRequest,
    ) -> Result<EvaluationResponse, AppError> {
        let request = validate_evaluation_request(request)?;
        let request_id = Uuid::new_v4();

        info!(%request_id, topic = %request.topic, "Processing knowledge evaluation");

        let score = scoring::score(&request.questions, &request.answers)?;

        let learning_path = self
            .generate_learning_path(&request, score.level)
            .await
            .inspect_err(|e| warn!(%request_id, "Learning path generation failed: {e}"))?;

        info!(
            %request_id,
            score = score.correct_count,
            total = score.total,
            percentage = score.percentage,
            level = %score.level,
            "Knowledge evaluation completed"
        );

        Ok(EvaluationResponse {
            score: score.correct_count,
            total: score.total,
            percentage: score.percentage,
            level: score.level,
            learning_path,
            request_id,
        })
    }

    async fn generate_quiz(&self, topic: &str) -> Result<Vec<Question>, AppError> {
        let raw = self
            .llm
            .complete(&CompletionRequest::new(
                &quiz_system(),
                build_quiz_prompt(topic),
                self.budgets.questions,
            ))
            .await?;

        let questions: Vec<Question> = sanitize::decode_as(&raw)?;
        check_generated_quiz(&questions)
            .map_err(|reason| ResponseParseFailed::schema_mismatch(&raw, reason))?;
        Ok(questions)
    }

    async fn generate_learning_path(
        &self,
        request: &EvaluationRequest,
        level: KnowledgeLevel,
    ) -> Result<LearningPath, AppError> {
        let raw = self
            .llm
            .complete(&CompletionRequest::new(
                &learning_path_system(),
                build_learning_path_prompt(
                    &request.topic,
                    &request.purpose,
                    &request.questions,
                    &request.answers,
                    level,
                ),
                self.budgets.learning_path,
            ))
            .await?;

        let generated = sanitize::decode_as::<LearningPathEnvelope>(&raw)?.learning_path;
        check_generated_learning_path(&generated)
            .map_err(|reason| ResponseParseFailed::schema_mismatch(&raw, reason))?;

        // The computed level is authoritative; the model only echoes it.
        if let Some(echoed) = generated
            .knowledge_level
            .as_deref()
            .filter(|l| !l.trim().eq_ignore_ascii_case(level.as_str()))
        {
            warn!("Model echoed knowledge level '{echoed}', keeping computed level {level}");
        }

        Ok(LearningPath {
            objective: generated.objective,
            knowledge_level: level,
            modules: generated.modules,
        })
    }
}

/// Writes the decoded quiz to `questions_{request_id}.json`. Never fails the request.
async fn write_debug_artifact(dir: &Path, request_id: Uuid, questions: &[Question]) {
    let path = dir.join(format!("questions_{request_id}.json"));
    let result = async {
        tokio::fs::create_dir_all(dir).await?;
        let json = serde_json::to_vec_pretty(questions)?;
        tokio::fs::write(&path, json).await?;
        Ok::<_, anyhow::Error>(())
    }
    .await;

    match result {
        Ok(()) => info!(%request_id, "Wrote debug artifact {}", path.display()),
        Err(e) => warn!(%request_id, "Failed to write debug artifact {}: {e}", path.display()),
    }
}
