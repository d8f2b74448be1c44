//! OpenAI Responses API client.
//!
//! Bounded retry without backoff: a failed request is reissued immediately
//! up to `max_retries` additional times, then the last error surfaces to the
//! caller. The response body is probed for `output_text` first, then for
//! text segments nested under `output` or `choices`.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::ai::provider::{CompletionProvider, PromptMessage};
use crate::ai::AiError;
use crate::core::DesignOptions;

const RESPONSES_URL: &str = "https://api.openai.com/v1/responses";
const REQUEST_TIMEOUT_SECS: u64 = 60;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_TEMPERATURE: f64 = 0.2;
pub const DEFAULT_MAX_RETRIES: u32 = 2;

pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
    temperature: f64,
    max_retries: u32,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Build a client from one [`DesignOptions`] bundle.
    pub fn from_options(api_key: impl Into<String>, options: &DesignOptions) -> Self {
        Self::new(api_key)
            .with_model(options.model.clone())
            .with_temperature(options.temperature)
            .with_max_retries(options.max_retries)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    async fn request_once(&self, body: &RequestBody<'_>) -> Result<String, AiError> {
        let response = self
            .client
            .post(RESPONSES_URL)
            .bearer_auth(&self.api_key)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let data: ResponseBody = response.json().await?;

        if !status.is_success() {
            let message = data
                .error
                .and_then(|e| e.message)
                .unwrap_or_else(|| format!("provider returned status {status}"));
            return Err(AiError::Provider(message));
        }

        extract_text(data).ok_or(AiError::EmptyResponse)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    fn name(&self) -> &str {
        "openai"
    }

    async fn complete(&self, messages: &[PromptMessage]) -> Result<String, AiError> {
        if self.api_key.is_empty() {
            return Err(AiError::MissingApiKey);
        }

        let body = RequestBody {
            model: &self.model,
            temperature: self.temperature,
            input: messages
                .iter()
                .map(|message| InputMessage {
                    role: message.role.as_str(),
                    content: vec![InputSegment {
                        kind: "input_text",
                        text: &message.content,
                    }],
                })
                .collect(),
        };

        let body_ref = &body;
        retry_request(self.max_retries, move || self.request_once(body_ref)).await
    }
}

/// Run `request` up to `max_retries + 1` times, returning the first success
/// or the last error observed.
async fn retry_request<F, Fut>(max_retries: u32, mut request: F) -> Result<String, AiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<String, AiError>>,
{
    let mut last_error = AiError::EmptyResponse;
    for attempt in 0..=max_retries {
        match request().await {
            Ok(text) => return Ok(text),
            Err(error) => {
                tracing::warn!(attempt, %error, "completion request failed");
                last_error = error;
            }
        }
    }
    Err(last_error)
}

#[derive(Serialize)]
struct RequestBody<'a> {
    model: &'a str,
    temperature: f64,
    input: Vec<InputMessage<'a>>,
}

#[derive(Serialize)]
struct InputMessage<'a> {
    role: &'static str,
    content: Vec<InputSegment<'a>>,
}

#[derive(Serialize)]
struct InputSegment<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct ResponseBody {
    output_text: Option<String>,
    output: Option<Vec<ResponseChoice>>,
    choices: Option<Vec<ResponseChoice>>,
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseChoice {
    message: Option<ChoiceMessage>,
    content: Option<Vec<ResponseSegment>>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<Vec<ResponseSegment>>,
}

#[derive(Debug, Deserialize)]
struct ResponseSegment {
    #[serde(rename = "type")]
    kind: Option<String>,
    text: Option<String>,
}

fn extract_text(body: ResponseBody) -> Option<String> {
    if let Some(text) = body.output_text {
        return Some(text.trim().to_string());
    }

    let choices = body.output.or(body.choices)?;
    for choice in choices {
        let segments = choice
            .message
            .and_then(|m| m.content)
            .or(choice.content)
            .unwrap_or_default();
        for segment in segments {
            let is_text = matches!(segment.kind.as_deref(), Some("output_text") | Some("text"));
            if is_text {
                if let Some(text) = segment.text {
                    return Some(text.trim().to_string());
                }
            }
        }
        if let Some(text) = choice.text {
            return Some(text.trim().to_string());
        }
    }

    None
}
