//! In-memory `CompletionClient` that replays scripted responses in order.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CompletionClient, CompletionRequest, ModelRequestFailed};

#[derive(Default)]
pub struct ScriptedClient {
    responses: Mutex<VecDeque<Result<String, ModelRequestFailed>>>,
    calls: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedClient {
    pub fn new(responses: Vec<Result<String, ModelRequestFailed>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every request received so far, in call order.
    pub fn calls(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ModelRequestFailed> {
        self.calls.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ModelRequestFailed::new(None, "no scripted response left")))
    }
}
