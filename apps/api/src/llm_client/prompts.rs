// Shared prompt fragments.
// Each service that needs model calls defines its own prompts.rs alongside it.
// This file contains cross-cutting pieces only.

/// Appended to the system prompt of every stage whose output is decoded as JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "Respond only in JSON format. \
    Do NOT include any text outside the JSON value.";

/// Joins a stage persona with the JSON-only instruction.
pub fn json_only_system(persona: &str) -> String {
    format!("{persona} {JSON_ONLY_INSTRUCTION}")
}
