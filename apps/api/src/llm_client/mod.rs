//! LLM Gateway: the single point of entry for every chat-completion call.
//!
//! ARCHITECTURAL RULE: handlers never talk to a provider directly. They build a
//! `PromptSpec` and hand it to an `LlmGateway`.
//!
//! One attempt per call. No retries, no streaming, no caching.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_GROQ_MODEL: &str = "llama3-70b-8192";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
/// Upper bound for a single provider call.
pub const MAX_TIMEOUT_SECS: u64 = 60;

/// Which upstream a gateway talks to. Drives the client-facing failure detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Groq,
    OpenAi,
}

impl Provider {
    pub fn failure_detail(self) -> &'static str {
        match self {
            Provider::Groq => "Error communicating with Groq Api",
            Provider::OpenAi => "Error communicating with OpenAI API",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Groq => f.write_str("Groq"),
            Provider::OpenAi => f.write_str("OpenAI"),
        }
    }
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("no API key configured for {0}")]
    MissingCredential(Provider),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// A single chat message as sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptMessage {
    pub role: &'static str,
    pub content: String,
}

/// A fully-formed prompt, consumed once by `LlmGateway::complete`.
/// The target model is fixed by the gateway's configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptSpec {
    pub messages: Vec<PromptMessage>,
}

impl PromptSpec {
    pub fn user(content: String) -> Self {
        Self {
            messages: vec![PromptMessage {
                role: "user",
                content,
            }],
        }
    }

    /// Text of the first user message.
    pub fn content(&self) -> &str {
        self.messages
            .iter()
            .find(|m| m.role == "user")
            .map(|m| m.content.as_str())
            .unwrap_or_default()
    }
}

/// The gateway seam. Carried in `AppState` as `Arc<dyn LlmGateway>`.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    fn provider(&self) -> Provider;

    async fn complete(&self, prompt: &PromptSpec) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [PromptMessage],
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ProviderError {
    error: ProviderErrorBody,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    message: String,
}

impl ChatResponse {
    /// Text of the first completion, if it has any.
    fn into_text(self) -> Result<String, LlmError> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(LlmError::EmptyContent)
    }
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint (Groq, OpenAI).
#[derive(Clone)]
pub struct ChatCompletionClient {
    client: Client,
    provider: Provider,
    endpoint: String,
    api_key: Option<String>,
    model: String,
}

impl ChatCompletionClient {
    pub fn new(
        provider: Provider,
        endpoint: String,
        api_key: Option<String>,
        model: String,
        timeout_secs: u64,
    ) -> Result<Self, LlmError> {
        let timeout = Duration::from_secs(timeout_secs.clamp(1, MAX_TIMEOUT_SECS));
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            provider,
            endpoint,
            api_key,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LlmGateway for ChatCompletionClient {
    fn provider(&self) -> Provider {
        self.provider
    }

    async fn complete(&self, prompt: &PromptSpec) -> Result<String, LlmError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(LlmError::MissingCredential(self.provider))?;

        debug!(
            "Sending {}-char prompt to {} ({})",
            prompt.content().len(),
            self.provider,
            self.model
        );
        let request_body = ChatRequest {
            model: &self.model,
            messages: &prompt.messages,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat_response: ChatResponse = response.json().await?;
        if let Some(usage) = &chat_response.usage {
            debug!(
                "{} call succeeded: prompt_tokens={}, completion_tokens={}",
                self.provider, usage.prompt_tokens, usage.completion_tokens
            );
        }

        chat_response.into_text()
    }
}
