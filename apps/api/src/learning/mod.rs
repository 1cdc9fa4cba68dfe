// Learning API: overview + quiz generation, scoring, and learning paths.
// All model calls go through llm_client — no direct HTTP calls here.

pub mod handlers;
pub mod models;
pub mod prompts;
pub mod scoring;
pub mod service;
pub mod validation;
