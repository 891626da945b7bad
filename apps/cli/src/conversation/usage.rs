//! Running token counter for a session.

use crate::llm_client::Usage;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenTracker {
    total: Usage,
    call_count: u64,
}

impl TokenTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record token usage from an API call.
    pub fn record(&mut self, usage: Usage) {
        self.total.prompt_tokens = self.total.prompt_tokens.saturating_add(usage.prompt_tokens);
        self.total.completion_tokens = self
            .total
            .completion_tokens
            .saturating_add(usage.completion_tokens);
        self.total.total_tokens = self.total.total_tokens.saturating_add(usage.total_tokens);
        self.call_count += 1;
    }

    pub fn total(&self) -> &Usage {
        &self.total
    }

    pub fn total_tokens(&self) -> u32 {
        self.total.total_tokens
    }

    pub fn call_count(&self) -> u64 {
        self.call_count
    }
}
