//! Conversation context: the named slots of an assessment plus any follow-up turns.
//!
//! The provider only ever sees the flattened form produced by [`ConversationContext::messages`]:
//!
//! | # | role      | content                          |
//! |---|-----------|----------------------------------|
//! | 0 | system    | system prompt                    |
//! | 1 | user      | extra context (or empty)         |
//! | 2 | assistant | [`CONTEXT_ACK`]                  |
//! | 3 | user      | position description (or empty)  |
//! | 4 | assistant | [`POSITION_DESCRIPTION_ACK`]     |
//! | 5 | user      | resume (or empty)                |
//! | 6.. | *     | follow-up turns                  |

use crate::conversation::prompts::{CONTEXT_ACK, POSITION_DESCRIPTION_ACK, SYSTEM_PROMPT};
use crate::llm_client::ChatMessage;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationContext {
    pub system_prompt: String,
    /// Stored with its prefix already applied.
    pub extra_context: Option<String>,
    /// Stored with its prefix already applied.
    pub position_description: Option<String>,
    /// Stored with its prefix already applied.
    pub resume: Option<String>,
    pub turns: Vec<ChatMessage>,
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self::with_system_prompt(SYSTEM_PROMPT)
    }
}

impl ConversationContext {
    pub fn with_system_prompt(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            extra_context: None,
            position_description: None,
            resume: None,
            turns: Vec::new(),
        }
    }

    /// Flattens the slots into the provider's message array.
    /// Unset slots go out as empty user messages so the canned replies stay in place.
    pub fn messages(&self) -> Vec<ChatMessage> {
        let slot = |value: &Option<String>| ChatMessage::user(value.clone().unwrap_or_default());

        let mut messages = Vec::with_capacity(6 + self.turns.len());
        messages.push(ChatMessage::system(self.system_prompt.clone()));
        messages.push(slot(&self.extra_context));
        messages.push(ChatMessage::assistant(CONTEXT_ACK));
        messages.push(slot(&self.position_description));
        messages.push(ChatMessage::assistant(POSITION_DESCRIPTION_ACK));
        messages.push(slot(&self.resume));
        messages.extend(self.turns.iter().cloned());
        messages
    }
}
