//! Conversation manager. Owns the assessment context and talks to the model through a
//! `ChatBackend`.
//!
//! Setting the context, PD or resume starts a fresh assessment: follow-up turns from the
//! previous one are dropped. Every reply is reflowed with the configured `WordWrap`
//! before it is returned.

use std::sync::Arc;

use tracing::info;

use crate::llm_client::{ChatBackend, ChatMessage, Completion, LlmError};
use crate::text::WordWrap;

pub mod context;
pub mod prompts;
pub mod usage;

pub use context::ConversationContext;
pub use usage::TokenTracker;

use prompts::{CONTEXT_PREFIX, POSITION_DESCRIPTION_PREFIX, RESUME_PREFIX};

pub struct Conversation {
    context: ConversationContext,
    backend: Arc<dyn ChatBackend>,
    wrapper: WordWrap,
    usage: TokenTracker,
}

impl Conversation {
    pub fn new(backend: Arc<dyn ChatBackend>, wrapper: WordWrap) -> Self {
        Self {
            context: ConversationContext::default(),
            backend,
            wrapper,
            usage: TokenTracker::new(),
        }
    }

    #[cfg(test)]
    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    pub fn usage(&self) -> &TokenTracker {
        &self.usage
    }

    /// Sets the extra context shown to the model before the PD.
    /// With `update_response`, re-runs the assessment and returns the new reply.
    pub async fn set_context(
        &mut self,
        text: &str,
        update_response: bool,
    ) -> Result<Option<String>, LlmError> {
        self.context.turns.clear();
        self.context.extra_context = Some(format!("{CONTEXT_PREFIX}{text}"));

        if !update_response {
            return Ok(None);
        }
        let completion = self.request().await?;
        Ok(Some(self.wrapper.fill(&completion.text)))
    }

    pub fn set_position_description(&mut self, text: &str) {
        self.context.turns.clear();
        self.context.position_description = Some(format!("{POSITION_DESCRIPTION_PREFIX}{text}"));
    }

    /// Stores the resume and returns the model's assessment of it.
    pub async fn set_resume(&mut self, text: &str) -> Result<String, LlmError> {
        self.context.turns.clear();
        self.context.resume = Some(format!("{RESUME_PREFIX}{text}"));

        let completion = self.request().await?;
        Ok(self.wrapper.fill(&completion.text))
    }

    /// Sends a follow-up message. Both sides of the exchange are kept for later turns;
    /// a failed request leaves the turns as they were.
    pub async fn chat(&mut self, text: &str) -> Result<String, LlmError> {
        self.context.turns.push(ChatMessage::user(text));

        match self.request().await {
            Ok(completion) => {
                let reply = self.wrapper.fill(&completion.text);
                self.context
                    .turns
                    .push(ChatMessage::assistant(completion.text));
                Ok(reply)
            }
            Err(e) => {
                self.context.turns.pop();
                Err(e)
            }
        }
    }

    async fn request(&mut self) -> Result<Completion, LlmError> {
        let messages = self.context.messages();
        let completion = self.backend.complete(&messages).await?;

        self.usage.record(completion.usage);
        info!(
            tokens = completion.usage.total_tokens,
            total_tokens = self.usage.total_tokens(),
            "Model replied"
        );
        Ok(completion)
    }
}
