use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ErrorBody};
use crate::config::{ApiKey, CompletionConfig};

#[derive(Debug, thiserror::Error)]
pub enum OpenAiError {
    #[error("OpenAI rejected the API key: {0}")]
    Unauthorized(String),

    #[error("OpenAI rate limit exceeded: {0}")]
    RateLimited(String),

    #[error("OpenAI API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("OpenAI returned no completion text")]
    EmptyCompletion,

    #[error("OpenAI network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Chat-completion provider.
/// Implemented by `OpenAiClient` for production; mock implementations used in tests.
pub trait ChatClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, OpenAiError>;
}

#[derive(Clone)]
pub struct OpenAiClient {
    http: Client,
    api_key: ApiKey,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(http: Client, config: &CompletionConfig) -> Self {
        Self {
            http,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            base_url: config.base_url.clone(),
        }
    }
}

impl ChatClient for OpenAiClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, OpenAiError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.api_key.expose())
            .header("User-Agent", crate::USER_AGENT)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let err = classify_status(status, &text);
            warn!(error = %err, model = %self.model, "OpenAI completion failed");
            return Err(err);
        }

        let body: ChatCompletionResponse = response.json().await?;
        debug!(model = %self.model, choices = body.choices.len(), "completion received");

        body.first_content().ok_or(OpenAiError::EmptyCompletion)
    }
}

fn classify_status(status: StatusCode, text: &str) -> OpenAiError {
    let message = match serde_json::from_str::<ErrorBody>(text) {
        Ok(body) => {
            let message = body
                .error
                .message
                .unwrap_or_else(|| "Unknown error".to_string());
            match body.error.kind {
                Some(kind) => format!("{message} ({kind})"),
                None => message,
            }
        }
        Err(_) => {
            let end = text.floor_char_boundary(200);
            format!("HTTP {status}: {}", &text[..end])
        }
    };

    match status.as_u16() {
        401 => OpenAiError::Unauthorized(message),
        429 => OpenAiError::RateLimited(message),
        code => OpenAiError::Api { code, message },
    }
}
