//! LLM client, the single entry point for completion calls in Coldreach.
//!
//! ARCHITECTURAL RULE: no other module may talk to the Anthropic API
//! directly. Everything goes through the `CompletionBackend` trait, and
//! `AppState` carries it as `Arc<dyn CompletionBackend>` so tests can
//! script the backend.
//!
//! The client makes exactly ONE request per call. The outreach generator
//! owns the attempt budget, and a client-side retry loop would hide
//! failures from that accounting.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all completion calls.
/// Intentionally hardcoded to prevent accidental drift between deploys.
pub const MODEL: &str = "claude-sonnet-4-5";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One text completion round trip.
///
/// Implementations make exactly one attempt; retry policy belongs to the
/// caller. Carried in `AppState` as `Arc<dyn CompletionBackend>`.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Anthropic Messages API client.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String, timeout: std::time::Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Makes a single call to the Messages API and returns the full
    /// response object. Non-success statuses, rate limits included, come
    /// back as `LlmError::Api` so the caller's attempt accounting sees
    /// every failure.
    pub async fn call(
        &self,
        system: &str,
        prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<LlmResponse, LlmError> {
        let request_body = AnthropicRequest {
            model: MODEL,
            max_tokens,
            temperature,
            system,
            messages: vec![AnthropicMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Prefer the structured error message when the body parses
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!("LLM API returned {status}: {message}");
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        Ok(llm_response)
    }
}

#[async_trait]
impl CompletionBackend for LlmClient {
    async fn complete(
        &self,
        system: &str,
        prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> Result<String, LlmError> {
        let response = self.call(system, prompt, temperature, max_tokens).await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        Ok(text.to_string())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Scripted backend for tests
// ────────────────────────────────────────────────────────────────────────────

/// What one scripted call should return.
#[cfg(test)]
pub(crate) enum ScriptedReply {
    Text(String),
    ApiError(u16, String),
}

#[cfg(test)]
impl ScriptedReply {
    pub(crate) fn text(body: impl Into<String>) -> Self {
        Self::Text(body.into())
    }

    pub(crate) fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError(status, message.into())
    }
}

/// In-memory `CompletionBackend` that replays a fixed script and counts
/// calls, so retry accounting is observable in tests.
#[cfg(test)]
pub(crate) struct ScriptedBackend {
    script: Vec<ScriptedReply>,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl ScriptedBackend {
    pub(crate) fn new(script: Vec<ScriptedReply>) -> Self {
        Self {
            script,
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl CompletionBackend for ScriptedBackend {
    async fn complete(
        &self,
        _system: &str,
        _prompt: &str,
        _temperature: f32,
        _max_tokens: u32,
    ) -> Result<String, LlmError> {
        let n = self
            .calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        match self
            .script
            .get(n)
            .unwrap_or_else(|| panic!("unscripted LLM call number {}", n + 1))
        {
            ScriptedReply::Text(text) => Ok(text.clone()),
            ScriptedReply::ApiError(status, message) => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}
