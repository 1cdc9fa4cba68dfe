//! Request, quiz, score and learning-path types for the learning API.
//!
//! Wire names are camelCase. Question fields keep the short names the quiz
//! prompt asks the model for (`question`, `options`, `correct`).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user's topic and reason for learning it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningRequest {
    pub topic: String,
    #[serde(alias = "learningPurpose")]
    pub purpose: String,
}

/// One multiple-choice question, as produced by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question")]
    pub text: String,
    pub options: Vec<String>,
    #[serde(rename = "correct")]
    pub correct_option: String,
}

/// Three-tier classification derived from the quiz percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KnowledgeLevel {
    #[serde(alias = "beginner", alias = "BEGINNER")]
    Beginner,
    #[serde(alias = "intermediate", alias = "INTERMEDIATE")]
    Intermediate,
    #[serde(alias = "expert", alias = "EXPERT")]
    Expert,
}

impl KnowledgeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            KnowledgeLevel::Beginner => "Beginner",
            KnowledgeLevel::Intermediate => "Intermediate",
            KnowledgeLevel::Expert => "Expert",
        }
    }
}

impl std::fmt::Display for KnowledgeLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub correct_count: usize,
    pub total: usize,
    /// 0.0 – 100.0
    pub percentage: f64,
    pub level: KnowledgeLevel,
}

/// One step of a learning path. Contents are passed through uninterpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningModule {
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    pub objective: String,
    pub knowledge_level: KnowledgeLevel,
    pub modules: Vec<LearningModule>,
}

/// The envelope the learning-path prompt asks the model to emit.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPathEnvelope {
    pub learning_path: GeneratedLearningPath,
}

/// Learning path as the model wrote it. The echoed `knowledge_level` is kept
/// as free text: it is only compared against the computed level, never used.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedLearningPath {
    pub objective: String,
    #[serde(default)]
    pub knowledge_level: Option<String>,
    pub modules: Vec<LearningModule>,
}

/// Caller input for knowledge evaluation. `answers[i]` answers `questions[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    #[serde(alias = "quiz")]
    pub questions: Vec<Question>,
    pub answers: Vec<String>,
    pub topic: String,
    pub purpose: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitLearningResponse {
    pub overview: String,
    pub questions: Vec<Question>,
    pub request_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResponse {
    pub score: usize,
    pub total: usize,
    pub percentage: f64,
    pub level: KnowledgeLevel,
    pub learning_path: LearningPath,
    pub request_id: Uuid,
}
