// All model prompts for the learning API.
// Reuses cross-cutting fragments from llm_client::prompts.
// Topic, purpose and answers are embedded verbatim as plain text.

use crate::learning::models::{KnowledgeLevel, Question};
use crate::llm_client::prompts::json_only_system;

/// System prompt for the prose overview.
pub const OVERVIEW_SYSTEM: &str = "You are a helpful assistant.";

const QUIZ_PERSONA: &str = "You are a helpful assistant and an expert learning path planner.";

const LEARNING_PATH_PERSONA: &str = "You are an expert learning path planner. \
    Create a detailed, personalized learning path based on the user's input.";

/// Number of questions the quiz prompt asks for.
pub const QUIZ_QUESTION_COUNT: usize = 3;
/// Number of options per question the quiz prompt asks for.
pub const QUIZ_OPTION_COUNT: usize = 4;

/// Shown in the per-question summary when an answer is missing.
const NO_ANSWER: &str = "(no answer)";

pub fn quiz_system() -> String {
    json_only_system(QUIZ_PERSONA)
}

pub fn learning_path_system() -> String {
    json_only_system(LEARNING_PATH_PERSONA)
}

pub fn build_overview_prompt(topic: &str, purpose: &str) -> String {
    format!(
        "Explain briefly what {topic} is and why it is useful. \
        Consider the user wants to learn for {purpose}. \
        Limit the response to 200 words."
    )
}

/// Quiz prompt. The JSON shape below is what the quiz decoder expects.
pub fn build_quiz_prompt(topic: &str) -> String {
    format!(
        r#"Generate {QUIZ_QUESTION_COUNT} beginner-level multiple-choice questions about {topic}.
Each question should include {QUIZ_OPTION_COUNT} choices, with the correct choice explicitly labeled in the response.
The "correct" value must be copied exactly from one of the "options".
Format it as JSON:
[
  {{
    "question": "Question text",
    "options": ["choice1", "choice2", "choice3", "choice4"],
    "correct": "choiceX"
  }}
]"#
    )
}

/// One summary block per question, in quiz order.
pub fn summarize_answers(quiz: &[Question], answers: &[String]) -> String {
    quiz.iter()
        .enumerate()
        .map(|(i, question)| {
            let answer = answers.get(i).map_or(NO_ANSWER, String::as_str);
            format!(
                "Q{}: {}\nAnswer: {}\nCorrect Answer: {}\n",
                i + 1,
                question.text,
                answer,
                question.correct_option
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_learning_path_prompt(
    topic: &str,
    purpose: &str,
    quiz: &[Question],
    answers: &[String],
    level: KnowledgeLevel,
) -> String {
    let summary = summarize_answers(quiz, answers);
    format!(
        r#"The user is learning about {topic} with the objective: {purpose}.
The user answered the following questions:
{summary}
The user's knowledge level is determined to be: {level}.
Please provide a detailed, actionable learning path for achieving the objective.
Focus the early modules on the questions the user answered incorrectly.

Respond in JSON format:
{{
  "learningPath": {{
    "objective": "Learn {topic}",
    "knowledgeLevel": "{level}",
    "modules": [
      {{"title": "Module Title", "description": "Module description", "estimatedTime": "X hours"}}
    ]
  }}
}}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(text: &str, correct: &str) -> Question {
        Question {
            text: text.to_string(),
            options: vec![
                correct.to_string(),
                "x".to_string(),
                "y".to_string(),
                "z".to_string(),
            ],
            correct_option: correct.to_string(),
        }
    }

    #[test]
    fn test_overview_prompt_embeds_inputs_verbatim() {
        let prompt = build_overview_prompt("Rust {lifetimes}", "ship a \"CLI\" at work");
        assert!(prompt.contains("Explain briefly what Rust {lifetimes} is"));
        assert!(prompt.contains("learn for ship a \"CLI\" at work."));
        assert!(prompt.contains("200 words"));
    }

    #[test]
    fn test_quiz_prompt_specifies_shape() {
        let prompt = build_quiz_prompt("Kubernetes");
        assert!(prompt.contains("Generate 3 beginner-level multiple-choice questions about Kubernetes."));
        assert!(prompt.contains("include 4 choices"));
        assert!(prompt.contains(r#""question": "Question text""#));
        assert!(prompt.contains(r#""options": ["choice1", "choice2", "choice3", "choice4"]"#));
        assert!(prompt.contains(r#""correct": "choiceX""#));
    }

    #[test]
    fn test_summary_preserves_quiz_order() {
        let quiz = vec![question("First?", "a"), question("Second?", "b"), question("Third?", "c")];
        let answers = vec!["a".to_string(), "wrong".to_string(), "c".to_string()];
        let summary = summarize_answers(&quiz, &answers);

        let first = summary.find("Q1: First?").unwrap();
        let second = summary.find("Q2: Second?").unwrap();
        let third = summary.find("Q3: Third?").unwrap();
        assert!(first < second && second < third);
        assert!(summary.contains("Q2: Second?\nAnswer: wrong\nCorrect Answer: b\n"));
    }

    #[test]
    fn test_summary_marks_missing_answers() {
        let quiz = vec![question("Only?", "a")];
        let summary = summarize_answers(&quiz, &[]);
        assert!(summary.contains("Answer: (no answer)"));
    }

    #[test]
    fn test_learning_path_prompt_contains_level_and_envelope() {
        let quiz = vec![question("What is a crate?", "A compilation unit")];
        let answers = vec!["A package manager".to_string()];
        let prompt = build_learning_path_prompt(
            "Rust",
            "build a web service",
            &quiz,
            &answers,
            KnowledgeLevel::Beginner,
        );
        assert!(prompt.contains("learning about Rust with the objective: build a web service."));
        assert!(prompt.contains("Answer: A package manager\nCorrect Answer: A compilation unit"));
        assert!(prompt.contains("knowledge level is determined to be: Beginner."));
        assert!(prompt.contains(r#""learningPath": {"#));
        assert!(prompt.contains(r#""knowledgeLevel": "Beginner""#));
        assert!(prompt.contains(r#""objective": "Learn Rust""#));
    }

    #[test]
    fn test_json_stages_use_json_only_system_prompts() {
        assert!(quiz_system().contains("Respond only in JSON format."));
        assert!(learning_path_system().starts_with("You are an expert learning path planner."));
    }
}
