//! Stub model client for synthesizer and service tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm::{ChatCompletion, ChatRequest, Completion, LlmError, Usage};

/// Returns a fixed reply (or error) and records every request.
pub struct StubLlm {
    reply: Result<String, LlmError>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl StubLlm {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(err: LlmError) -> Self {
        Self {
            reply: Err(err),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChatCompletion for StubLlm {
    async fn complete(&self, request: ChatRequest) -> Result<Completion, LlmError> {
        self.requests.lock().unwrap().push(request);
        self.reply.clone().map(|text| Completion {
            text,
            model: "stub-model".to_string(),
            usage: Some(Usage {
                prompt_tokens: 100,
                completion_tokens: 20,
                total_tokens: 120,
            }),
        })
    }

    async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        Ok(vec!["stub-model".to_string()])
    }

    fn model(&self) -> &str {
        "stub-model"
    }
}
