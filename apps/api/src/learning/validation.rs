//! Input validation for caller-supplied requests, plus shape checks for
//! model-generated quizzes and learning paths.
//!
//! Text limits are counted in characters after trimming. All violated
//! constraints are reported together, joined with "; ".

use crate::errors::AppError;
use crate::learning::models::{
    EvaluationRequest, GeneratedLearningPath, LearningRequest, Question,
};
use crate::learning::prompts::QUIZ_OPTION_COUNT;

pub const TOPIC_CHARS: (usize, usize) = (2, 100);
pub const PURPOSE_CHARS: (usize, usize) = (5, 500);
pub const QUIZ_LEN: (usize, usize) = (1, 10);

fn char_len_within(value: &str, (min, max): (usize, usize)) -> bool {
    (min..=max).contains(&value.chars().count())
}

fn into_result<T>(value: T, violations: Vec<String>) -> Result<T, AppError> {
    if violations.is_empty() {
        Ok(value)
    } else {
        Err(AppError::Validation(violations.join("; ")))
    }
}

/// Trims and checks topic and purpose. Returns the trimmed request.
pub fn validate_learning_request(request: LearningRequest) -> Result<LearningRequest, AppError> {
    let request = LearningRequest {
        topic: request.topic.trim().to_string(),
        purpose: request.purpose.trim().to_string(),
    };

    let mut violations = Vec::new();
    if !char_len_within(&request.topic, TOPIC_CHARS) {
        violations.push("Topic must be between 2 and 100 characters".to_string());
    }
    if !char_len_within(&request.purpose, PURPOSE_CHARS) {
        violations.push("Learning purpose must be between 5 and 500 characters".to_string());
    }

    into_result(request, violations)
}

/// Checks list bounds, answer alignment and text limits. Answers and quiz
/// content are kept exactly as sent; only topic and purpose are trimmed.
pub fn validate_evaluation_request(
    request: EvaluationRequest,
) -> Result<EvaluationRequest, AppError> {
    let request = EvaluationRequest {
        topic: request.topic.trim().to_string(),
        purpose: request.purpose.trim().to_string(),
        ..request
    };

    let (min, max) = QUIZ_LEN;
    let mut violations = Vec::new();
    if !(min..=max).contains(&request.answers.len()) {
        violations.push("Answers must be an array with 1-10 elements".to_string());
    }
    if !(min..=max).contains(&request.questions.len()) {
        violations.push("Questions must be an array with 1-10 elements".to_string());
    }
    if request.answers.len() != request.questions.len() {
        violations.push(format!(
            "Answers must have the same length as questions (got {} answers for {} questions)",
            request.answers.len(),
            request.questions.len()
        ));
    }
    if !char_len_within(&request.purpose, PURPOSE_CHARS) {
        violations.push("Purpose must be between 5 and 500 characters".to_string());
    }
    if !char_len_within(&request.topic, TOPIC_CHARS) {
        violations.push("Topic must be between 2 and 100 characters".to_string());
    }

    into_result(request, violations)
}

/// Shape check for a model-generated quiz. Returns the first problem found.
///
/// Only structure is checked. Whether `correct` names one of the options is
/// left alone; scoring compares against it verbatim either way.
pub fn check_generated_quiz(questions: &[Question]) -> Result<(), String> {
    let (min, max) = QUIZ_LEN;
    if !(min..=max).contains(&questions.len()) {
        return Err(format!(
            "expected between {min} and {max} questions, got {}",
            questions.len()
        ));
    }
    for (i, question) in questions.iter().enumerate() {
        let n = i + 1;
        if question.text.trim().is_empty() {
            return Err(format!("question {n} has empty text"));
        }
        if question.options.len() != QUIZ_OPTION_COUNT {
            return Err(format!(
                "question {n} has {} options, expected {QUIZ_OPTION_COUNT}",
                question.options.len()
            ));
        }
        if question.correct_option.trim().is_empty() {
            return Err(format!("question {n} has no correct option"));
        }
    }
    Ok(())
}

/// Shape check for a model-generated learning path.
pub fn check_generated_learning_path(path: &GeneratedLearningPath) -> Result<(), String> {
    if path.modules.is_empty() {
        return Err("learning path has no modules".to_string());
    }
    if let Some(i) = path.modules.iter().position(|m| m.title.trim().is_empty()) {
        return Err(format!("module {} has an empty title", i + 1));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::learning::models::LearningModule;

    fn question(options: usize) -> Question {
        Question {
            text: "What is Rust?".to_string(),
            options: (0..options).map(|i| format!("option {i}")).collect(),
            correct_option: "option 0".to_string(),
        }
    }

    fn evaluation(questions: usize, answers: usize) -> EvaluationRequest {
        EvaluationRequest {
            questions: (0..questions).map(|_| question(4)).collect(),
            answers: (0..answers).map(|_| "option 0".to_string()).collect(),
            topic: "Rust".to_string(),
            purpose: "Write services".to_string(),
        }
    }

    fn validation_message(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_learning_request_is_trimmed() {
        let request = validate_learning_request(LearningRequest {
            topic: "  Rust  ".to_string(),
            purpose: "\tBuild a CLI\n".to_string(),
        })
        .unwrap();
        assert_eq!(request.topic, "Rust");
        assert_eq!(request.purpose, "Build a CLI");
    }

    #[test]
    fn test_topic_length_is_checked_after_trim() {
        let err = validate_learning_request(LearningRequest {
            topic: "  R  ".to_string(),
            purpose: "Build a CLI".to_string(),
        })
        .unwrap_err();
        assert_eq!(
            validation_message(err),
            "Topic must be between 2 and 100 characters"
        );
    }

    #[test]
    fn test_limits_count_characters_not_bytes() {
        // 100 two-byte characters is within the topic limit
        let topic: String = std::iter::repeat('é').take(100).collect();
        assert!(validate_learning_request(LearningRequest {
            topic,
            purpose: "Learn French".to_string(),
        })
        .is_ok());
    }

    #[test]
    fn test_all_violations_are_reported() {
        let err = validate_learning_request(LearningRequest {
            topic: "x".to_string(),
            purpose: "hey".to_string(),
        })
        .unwrap_err();
        let message = validation_message(err);
        assert!(message.contains("Topic must be between 2 and 100 characters"));
        assert!(message.contains("Learning purpose must be between 5 and 500 characters"));
    }

    #[test]
    fn test_evaluation_accepts_aligned_request() {
        assert!(validate_evaluation_request(evaluation(3, 3)).is_ok());
    }

    #[test]
    fn test_evaluation_rejects_length_mismatch() {
        let message = validation_message(validate_evaluation_request(evaluation(3, 2)).unwrap_err());
        assert_eq!(
            message,
            "Answers must have the same length as questions (got 2 answers for 3 questions)"
        );
    }

    #[test]
    fn test_evaluation_rejects_empty_quiz() {
        let message = validation_message(validate_evaluation_request(evaluation(0, 0)).unwrap_err());
        assert!(message.contains("Questions must be an array with 1-10 elements"));
        assert!(message.contains("Answers must be an array with 1-10 elements"));
    }

    #[test]
    fn test_evaluation_rejects_oversized_quiz() {
        let message =
            validation_message(validate_evaluation_request(evaluation(11, 11)).unwrap_err());
        assert!(message.contains("Questions must be an array with 1-10 elements"));
    }

    #[test]
    fn test_evaluation_keeps_answers_verbatim() {
        let mut request = evaluation(1, 1);
        request.answers = vec!["  padded  ".to_string()];
        let request = validate_evaluation_request(request).unwrap();
        assert_eq!(request.answers[0], "  padded  ");
    }

    #[test]
    fn test_generated_quiz_requires_four_options() {
        assert!(check_generated_quiz(&[question(4), question(4), question(4)]).is_ok());
        let err = check_generated_quiz(&[question(4), question(3)]).unwrap_err();
        assert_eq!(err, "question 2 has 3 options, expected 4");
    }

    #[test]
    fn test_generated_quiz_must_not_be_empty() {
        assert!(check_generated_quiz(&[]).is_err());
    }

    #[test]
    fn test_generated_learning_path_needs_modules() {
        let mut path = GeneratedLearningPath {
            objective: "Learn Rust".to_string(),
            knowledge_level: None,
            modules: vec![],
        };
        assert!(check_generated_learning_path(&path).is_err());

        path.modules.push(LearningModule {
            title: "Ownership".to_string(),
            description: "Moves and borrows".to_string(),
            estimated_time: Some(serde_json::json!("2 hours")),
            resources: None,
        });
        assert!(check_generated_learning_path(&path).is_ok());
    }
}
