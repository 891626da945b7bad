/// LLM Client — the single point of entry for all chat-completion calls.
///
/// ARCHITECTURAL RULE: No other module talks to the provider directly.
/// Everything else goes through the `ChatBackend` trait.
///
/// Wire format: OpenAI Chat Completions (`POST {base_url}/chat/completions`).
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod retry;

pub use retry::{AttemptOutcome, RetryPolicy};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
/// Low temperature keeps repeated assessments of the same resume consistent.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("Gave up after {attempts} attempts: {last}")]
    RetriesExhausted { attempts: u32, last: Box<LlmError> },
}

impl LlmError {
    /// Rate limits, server errors and transport failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::Http(e) => !e.is_decode() && !e.is_builder(),
            LlmError::Api { status, .. } => *status == 429 || (500..600).contains(status),
            LlmError::Parse(_) | LlmError::EmptyContent | LlmError::RetriesExhausted { .. } => {
                false
            }
        }
    }

    pub fn is_retries_exhausted(&self) -> bool {
        matches!(self, LlmError::RetriesExhausted { .. })
    }

    /// Retries ran out while the provider kept answering 429 or 5xx.
    pub fn is_overloaded(&self) -> bool {
        match self {
            LlmError::RetriesExhausted { last, .. } => matches!(
                **last,
                LlmError::Api { status, .. } if status == 429 || (500..600).contains(&status)
            ),
            _ => false,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Messages
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Token counts reported by the provider for one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// Text of the first choice together with the call's usage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    pub usage: Usage,
}

// ────────────────────────────────────────────────────────────────────────────
// Backend seam
// ────────────────────────────────────────────────────────────────────────────

/// Anything that can turn a message array into a completion.
/// `Conversation` holds an `Arc<dyn ChatBackend>`; `LlmClient` is the real one.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Completion, LlmError>;
}

/// Everything the client needs. Built once from `Config` and passed in explicitly.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub retry: RetryPolicy,
}

#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    config: LlmConfig,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    /// One request, no retries.
    async fn send_once(&self, messages: &[ChatMessage]) -> Result<Completion, LlmError> {
        let request_body = ChatCompletionRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        parse_completion(&body)
    }
}

#[async_trait]
impl ChatBackend for LlmClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<Completion, LlmError> {
        let completion: Completion = self
            .config
            .retry
            .run(|attempt| async move {
                debug!(attempt, messages = messages.len(), "Sending chat completion");
                AttemptOutcome::from(self.send_once(messages).await)
            })
            .await?;

        debug!(
            prompt_tokens = completion.usage.prompt_tokens,
            completion_tokens = completion.usage.completion_tokens,
            "LLM call succeeded"
        );
        Ok(completion)
    }
}

/// Extracts the first choice's text from a successful response body.
fn parse_completion(body: &str) -> Result<Completion, LlmError> {
    let response: ChatCompletionResponse = serde_json::from_str(body)?;
    let text = response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|t| !t.trim().is_empty())
        .ok_or(LlmError::EmptyContent)?;

    Ok(Completion {
        text,
        usage: response.usage,
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Backend that replays queued results and records every message array it receives.
    /// Once the queue is empty it answers `"ok"`.
    #[derive(Default)]
    pub struct ScriptedBackend {
        replies: Mutex<VecDeque<Result<Completion, LlmError>>>,
        requests: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl ScriptedBackend {
        pub fn with_replies(replies: Vec<Result<Completion, LlmError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::default(),
            }
        }

        pub fn requests(&self) -> Vec<Vec<ChatMessage>> {
            self.requests.lock().unwrap().clone()
        }
    }

    pub fn reply(text: &str, total_tokens: u32) -> Result<Completion, LlmError> {
        Ok(Completion {
            text: text.to_string(),
            usage: Usage {
                prompt_tokens: total_tokens / 2,
                completion_tokens: total_tokens - total_tokens / 2,
                total_tokens,
            },
        })
    }

    #[async_trait]
    impl ChatBackend for ScriptedBackend {
        async fn complete(&self, messages: &[ChatMessage]) -> Result<Completion, LlmError> {
            self.requests.lock().unwrap().push(messages.to_vec());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| reply("ok", 0))
        }
    }
}
