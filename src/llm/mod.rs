//! Chat-completion gateway.
//!
//! [`ChatCompletion`] is the seam between the narrative synthesizer and the
//! hosted model. [`OpenAiClient`] talks to any OpenAI-compatible endpoint.

mod openai;

#[cfg(test)]
pub(crate) mod testing;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use openai::OpenAiClient;

/// One prompt sent to the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system: Option<String>,
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// Token accounting reported by the endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// A successful completion.
#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    /// Trimmed, non-empty message content.
    pub text: String,
    pub model: String,
    pub usage: Option<Usage>,
}

/// Failures talking to the model endpoint.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

/// A model endpoint that turns one prompt into one completion.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// Sends a single request. Nothing is retried here except the optional
    /// insecure-TLS fallback of the HTTP client.
    async fn complete(&self, request: ChatRequest) -> Result<Completion, LlmError>;

    /// Model ids offered by the endpoint.
    async fn list_models(&self) -> Result<Vec<String>, LlmError>;

    /// Model name used for completions.
    fn model(&self) -> &str;
}
