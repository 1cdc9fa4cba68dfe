use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_DEPLOYMENT: &str = "gpt-4o";
const DEFAULT_API_VERSION: &str = "2024-12-01-preview";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub azure_openai: AzureOpenAiConfig,
    pub max_tokens: StageTokenBudgets,
    pub port: u16,
    pub rust_log: String,
    pub app_env: String,
    pub debug_artifact_dir: String,
    pub allowed_origins: Vec<String>,
}

/// Connection settings for the Azure OpenAI chat-completions deployment.
#[derive(Debug, Clone)]
pub struct AzureOpenAiConfig {
    pub endpoint: String,
    pub api_key: String,
    pub deployment: String,
    pub api_version: String,
    pub timeout: Duration,
}

/// Max output tokens granted to each model call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageTokenBudgets {
    pub overview: u32,
    pub questions: u32,
    pub learning_path: u32,
}

impl Default for StageTokenBudgets {
    fn default() -> Self {
        Self {
            overview: 200,
            questions: 500,
            learning_path: 1000,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = StageTokenBudgets::default();

        Ok(Config {
            azure_openai: AzureOpenAiConfig {
                endpoint: require_env("AZURE_OPENAI_ENDPOINT")?,
                api_key: require_env("AZURE_OPENAI_API_KEY")?,
                deployment: env_or("AZURE_OPENAI_DEPLOYMENT", DEFAULT_DEPLOYMENT),
                api_version: env_or("AZURE_OPENAI_API_VERSION", DEFAULT_API_VERSION),
                timeout: Duration::from_secs(parse_env("MODEL_TIMEOUT_SECS", 30)?),
            },
            max_tokens: StageTokenBudgets {
                overview: parse_env("MAX_TOKENS_OVERVIEW", defaults.overview)?,
                questions: parse_env("MAX_TOKENS_QUESTIONS", defaults.questions)?,
                learning_path: parse_env("MAX_TOKENS_LEARNING_PATH", defaults.learning_path)?,
            },
            port: parse_env("PORT", 5000)?,
            rust_log: env_or("RUST_LOG", "info"),
            app_env: env_or("APP_ENV", "production"),
            debug_artifact_dir: env_or("DEBUG_ARTIFACT_DIR", "logs"),
            allowed_origins: parse_origins(&env_or("ALLOWED_ORIGINS", DEFAULT_ALLOWED_ORIGIN)),
        })
    }

    /// Development mode exposes error detail to callers and writes debug artifacts.
    pub fn is_development(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("development")
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
