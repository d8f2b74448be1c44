//! Completion provider trait.
//!
//! A provider turns a list of prompt messages into raw completion text.
//! Retry with a bounded attempt count lives inside the provider; callers
//! never retry on top of it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::ai::AiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One message of a prompt conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptMessage {
    pub role: Role,
    pub content: String,
}

impl PromptMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Common interface for completion backends.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &str;

    /// Request one completion for the given messages.
    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, AiError>;
}
