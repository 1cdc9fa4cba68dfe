/// LLM Client — the single point of entry for all completion-endpoint calls.
///
/// ARCHITECTURAL RULE: No other module may call the Azure OpenAI API directly.
/// All model interactions MUST go through a `CompletionClient`.
///
/// There is no retry here: a failed call is reported once and the caller aborts.
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::AzureOpenAiConfig;

pub mod prompts;
pub mod sanitize;
#[cfg(test)]
pub mod testutil;

/// Sampling temperature used when a stage does not ask for anything else.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Any failure of the outbound call: transport, timeout, non-2xx status, or
/// a response envelope without a usable first choice.
#[derive(Debug, Clone, Error)]
#[error("model request failed{}: {message}", status_suffix(.status))]
pub struct ModelRequestFailed {
    /// Upstream HTTP status, when the endpoint answered at all.
    pub status: Option<u16>,
    pub message: String,
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {s})")).unwrap_or_default()
}

impl ModelRequestFailed {
    pub fn new(status: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn timed_out(after: Duration) -> Self {
        Self::new(None, format!("request timed out after {}s", after.as_secs_f32()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// One chat-completion call: messages plus per-call sampling settings.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionRequest {
    /// A `system` + `user` pair at the default temperature.
    pub fn new(system: &str, prompt: String, max_tokens: u32) -> Self {
        Self {
            messages: vec![ChatMessage::system(system), ChatMessage::user(prompt)],
            max_tokens,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// The completion endpoint as seen by the rest of the service.
///
/// Carried as `Arc<dyn CompletionClient>` so tests can script responses.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Issues exactly one call and returns the trimmed text of the first choice.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ModelRequestFailed>;
}

// ────────────────────────────────────────────────────────────────────────────
// Azure OpenAI chat completions
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatCompletionBody<'a> {
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Chat-completions client for an Azure OpenAI deployment.
#[derive(Clone)]
pub struct AzureOpenAiClient {
    client: Client,
    endpoint: String,
    api_key: String,
    deployment: String,
    api_version: String,
    timeout: Duration,
}

impl AzureOpenAiClient {
    pub fn new(config: &AzureOpenAiConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            deployment: config.deployment.clone(),
            api_version: config.api_version.clone(),
            timeout: config.timeout,
        })
    }

    pub fn deployment(&self) -> &str {
        &self.deployment
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions",
            self.endpoint, self.deployment
        )
    }

    fn transport_error(&self, e: reqwest::Error) -> ModelRequestFailed {
        if e.is_timeout() {
            ModelRequestFailed::timed_out(self.timeout)
        } else {
            ModelRequestFailed::new(e.status().map(|s| s.as_u16()), e.to_string())
        }
    }
}

#[async_trait]
impl CompletionClient for AzureOpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ModelRequestFailed> {
        let body = ChatCompletionBody {
            messages: &request.messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        debug!(
            "Calling deployment {} (max_tokens={}, temperature={})",
            self.deployment, request.max_tokens, request.temperature
        );

        let response = self
            .client
            .post(self.completions_url())
            .query(&[("api-version", self.api_version.as_str())])
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!(status = status.as_u16(), "Completion endpoint returned an error: {message}");
            return Err(ModelRequestFailed::new(Some(status.as_u16()), message));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ModelRequestFailed::timed_out(self.timeout)
            } else {
                ModelRequestFailed::new(
                    Some(status.as_u16()),
                    format!("malformed completion envelope: {e}"),
                )
            }
        })?;

        if let Some(usage) = &completion.usage {
            debug!(
                "Completion succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| {
                ModelRequestFailed::new(
                    Some(status.as_u16()),
                    "completion envelope contained no message content in the first choice",
                )
            })
    }
}
