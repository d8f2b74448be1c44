//! Completion providers and prompt assembly.

pub mod openai;
pub mod prompts;
pub mod provider;

pub use openai::{OpenAiClient, DEFAULT_MAX_RETRIES, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
pub use provider::{CompletionProvider, PromptMessage, Role};

/// Errors from the completion layer.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("no API key configured")]
    MissingApiKey,
    #[error("request to the model provider failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("model provider returned an error: {0}")]
    Provider(String),
    #[error("model response contained no usable text")]
    EmptyResponse,
}
