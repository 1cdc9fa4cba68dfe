//! Quiz scoring and knowledge-level classification. Pure, no I/O.

use thiserror::Error;

use crate::errors::AppError;
use crate::learning::models::{KnowledgeLevel, Question, ScoreResult};

/// Lowest percentage classified as Expert (inclusive).
pub const EXPERT_THRESHOLD: f64 = 80.0;
/// Lowest percentage classified as Intermediate (inclusive).
pub const INTERMEDIATE_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("Cannot score an empty quiz")]
    EmptyQuiz,

    #[error("Answers must have the same length as questions (got {answers} answers for {questions} questions)")]
    LengthMismatch { questions: usize, answers: usize },
}

impl From<ScoringError> for AppError {
    fn from(err: ScoringError) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Scores index-aligned answers against a quiz.
///
/// An answer counts only when it equals the question's correct option exactly
/// (no case or whitespace normalization).
pub fn score(quiz: &[Question], answers: &[String]) -> Result<ScoreResult, ScoringError> {
    if quiz.is_empty() {
        return Err(ScoringError::EmptyQuiz);
    }
    if quiz.len() != answers.len() {
        return Err(ScoringError::LengthMismatch {
            questions: quiz.len(),
            answers: answers.len(),
        });
    }

    let correct_count = quiz
        .iter()
        .zip(answers)
        .filter(|(question, answer)| **answer == question.correct_option)
        .count();
    let total = quiz.len();
    let percentage = 100.0 * correct_count as f64 / total as f64;

    Ok(ScoreResult {
        correct_count,
        total,
        percentage,
        level: classify(percentage),
    })
}

/// Maps a percentage to a level, highest tier first.
pub fn classify(percentage: f64) -> KnowledgeLevel {
    if percentage >= EXPERT_THRESHOLD {
        KnowledgeLevel::Expert
    } else if percentage >= INTERMEDIATE_THRESHOLD {
        KnowledgeLevel::Intermediate
    } else {
        KnowledgeLevel::Beginner
    }
}
