//! Design orchestration shared by library users and the CLI.
//!
//! One request = one completion (retry lives inside the provider) followed
//! by one validation pass. No partial state survives a failed attempt.

use std::sync::Arc;

use crate::ai::openai::{DEFAULT_MAX_RETRIES, DEFAULT_MODEL, DEFAULT_TEMPERATURE};
use crate::ai::prompts::{design_messages, format_history};
use crate::ai::{AiError, CompletionProvider, PromptMessage};
use crate::circuit::types::CircuitDesign;
use crate::circuit::validate::{parse_design, ValidateError};

/// Provider settings for a design session.
#[derive(Debug, Clone)]
pub struct DesignOptions {
    pub model: String,
    pub temperature: f64,
    /// Extra attempts after a failed completion request.
    pub max_retries: u32,
}

impl Default for DesignOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Top-level failure for one design request.
#[derive(Debug, thiserror::Error)]
pub enum SchematicaError {
    #[error("completion request failed: {0}")]
    Ai(#[from] AiError),
    #[error("model output rejected: {0}")]
    Validate(#[from] ValidateError),
}

/// Turns natural-language circuit requests into validated designs.
pub struct CircuitDesigner {
    provider: Arc<dyn CompletionProvider>,
}

impl CircuitDesigner {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Request one circuit design for `input`, given earlier conversation
    /// turns, and validate the model's answer.
    pub async fn design(
        &self,
        input: &str,
        history: &[PromptMessage],
    ) -> Result<CircuitDesign, SchematicaError> {
        let history_text = format_history(history);
        let messages = design_messages(input, &history_text);

        tracing::info!(provider = self.provider.name(), "requesting circuit design");
        let raw = self.provider.complete(&messages).await?;
        tracing::debug!(bytes = raw.len(), "validating model completion");

        Ok(parse_design(&raw)?)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::ai::Role;

    struct CannedProvider {
        completion: String,
    }

    #[async_trait]
    impl CompletionProvider for CannedProvider {
        fn name(&self) -> &str {
            "canned"
        }

        async fn complete(&self, _messages: &[PromptMessage]) -> Result<String, AiError> {
            Ok(self.completion.clone())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl CompletionProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        async fn complete(&self, _messages: &[PromptMessage]) -> Result<String, AiError> {
            Err(AiError::MissingApiKey)
        }
    }

    #[tokio::test]
    async fn design_validates_the_completion() {
        let provider = Arc::new(CannedProvider {
            completion: "```json\n{\"response\":\"listo\",\"circuit\":{}}\n```".to_string(),
        });
        let designer = CircuitDesigner::new(provider);
        let design = designer.design("un led", &[]).await.unwrap();
        assert_eq!(design.response, "listo");
        assert!(design.circuit.components.is_empty());
    }

    #[tokio::test]
    async fn provider_errors_surface_as_ai_errors() {
        let designer = CircuitDesigner::new(Arc::new(FailingProvider));
        let error = designer.design("un led", &[]).await.unwrap_err();
        assert!(matches!(error, SchematicaError::Ai(_)));
    }

    #[tokio::test]
    async fn invalid_completion_surfaces_as_validate_error() {
        let provider = Arc::new(CannedProvider {
            completion: "lo siento, no puedo".to_string(),
        });
        let designer = CircuitDesigner::new(provider);
        let error = designer
            .design("un led", &[PromptMessage::new(Role::User, "hola")])
            .await
            .unwrap_err();
        assert!(matches!(error, SchematicaError::Validate(_)));
    }
}
