//! OpenAI-compatible client (`/chat/completions`, `/models`).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::config::LlmConfig;
use crate::llm::{ChatCompletion, ChatRequest, Completion, LlmError, Usage};

/// Client for any endpoint implementing the OpenAI chat-completion API.
///
/// Cheap to clone, `reqwest::Client` is reference counted.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    /// Whether a connection-level failure is retried once without
    /// certificate verification.
    insecure_retry: bool,
    base_url: String,
    model: String,
    api_key: Option<String>,
    timeout_secs: u64,
}

impl OpenAiClient {
    pub fn new(config: &LlmConfig) -> Result<Self, LlmError> {
        let client = build_client(config.timeout_secs, false)?;

        Ok(Self {
            client,
            insecure_retry: config.insecure_retry,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.as_ref().map(|k| k.expose().to_string()),
            timeout_secs: config.timeout_secs,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => req.bearer_auth(key),
            None => req,
        }
    }

    /// Sends a request, retrying once without certificate verification when
    /// enabled and the first attempt failed before any HTTP response.
    async fn send<F>(&self, build: F) -> Result<Response, LlmError>
    where
        F: Fn(&Client) -> RequestBuilder,
    {
        let first = self.authorize(build(&self.client)).send().await;

        let err = match first {
            Ok(response) => return Ok(response),
            Err(e) => e,
        };

        if self.insecure_retry && err.is_connect() {
            warn!(
                url = %self.base_url,
                error = %err,
                "connection failed, retrying once without certificate verification"
            );
            let insecure = build_client(self.timeout_secs, true)?;
            return self
                .authorize(build(&insecure))
                .send()
                .await
                .map_err(|e| self.transport_error(e));
        }

        Err(self.transport_error(err))
    }

    fn transport_error(&self, e: reqwest::Error) -> LlmError {
        if e.is_timeout() {
            error!(url = %self.base_url, timeout_secs = self.timeout_secs, "LLM request timed out");
            LlmError::Timeout(self.timeout_secs)
        } else {
            error!(url = %self.base_url, error = %e, "LLM HTTP request failed (transport)");
            LlmError::Transport(e.to_string())
        }
    }
}

fn build_client(timeout_secs: u64, accept_invalid_certs: bool) -> Result<Client, LlmError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .danger_accept_invalid_certs(accept_invalid_certs)
        .build()
        .map_err(|e| LlmError::Transport(format!("failed to build HTTP client: {}", e)))
}

#[async_trait]
impl ChatCompletion for OpenAiClient {
    async fn complete(&self, request: ChatRequest) -> Result<Completion, LlmError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system {
            messages.push(Message {
                role: "system",
                content: system,
            });
        }
        messages.push(Message {
            role: "user",
            content: request.prompt,
        });

        let payload = ChatCompletionRequest {
            model: &self.model,
            messages,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        debug!(
            model = %self.model,
            max_tokens = payload.max_tokens,
            temperature = payload.temperature,
            "sending LLM request"
        );

        let url = self.url("chat/completions");
        let response = self.send(|client| client.post(&url).json(&payload)).await?;
        let response = check_status(response).await?;

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(format!("failed to parse body: {}", e)))?;

        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| LlmError::MalformedResponse("empty or missing content".to_string()))?;

        debug!(chars = text.len(), usage = ?parsed.usage, "received LLM response");

        Ok(Completion {
            text,
            model: parsed.model.unwrap_or_else(|| self.model.clone()),
            usage: parsed.usage,
        })
    }

    async fn list_models(&self) -> Result<Vec<String>, LlmError> {
        let url = self.url("models");
        let response = self.send(|client| client.get(&url)).await?;
        let response = check_status(response).await?;

        let parsed: ModelList = response
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(format!("failed to parse body: {}", e)))?;

        Ok(parsed.data.into_iter().map(|m| m.id).collect())
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// Wire types

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

/// Passes a 2xx response through, otherwise captures status and body text.
async fn check_status(response: Response) -> Result<Response, LlmError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());

    error!(%status, body = %body, "LLM request returned HTTP error");
    Err(LlmError::Status {
        status: status.as_u16(),
        body,
    })
}
