use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use super::types::{ErrorBody, SearchDocument, SearchRequest, SearchResponse};
use crate::config::{ApiKey, SearchConfig};

#[derive(Debug, thiserror::Error)]
pub enum TavilyError {
    #[error("Tavily rejected the API key: {0}")]
    Unauthorized(String),

    #[error("Tavily rate limit exceeded. Please retry later.")]
    RateLimited,

    #[error("Tavily API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("Tavily network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Web search provider.
/// Implemented by `TavilyClient` for production; mock implementations used in tests.
pub trait SearchClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchDocument>, TavilyError>;
}

#[derive(Clone)]
pub struct TavilyClient {
    http: Client,
    api_key: ApiKey,
    base_url: String,
    max_results: u8,
}

impl TavilyClient {
    pub fn new(http: Client, config: &SearchConfig) -> Self {
        Self {
            http,
            api_key: config.api_key.clone(),
            base_url: config.base_url.clone(),
            max_results: config.max_results,
        }
    }
}

impl SearchClient for TavilyClient {
    async fn search(&self, query: &str) -> Result<Vec<SearchDocument>, TavilyError> {
        let url = format!("{}/search", self.base_url);
        let request = SearchRequest {
            query,
            max_results: self.max_results,
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
            warn!(error = %err, "Tavily search failed");
            return Err(err);
        }

        let body: SearchResponse = response.json().await?;
        debug!(results = body.results.len(), "tavily search complete");
        Ok(body.results)
    }
}

fn classify_status(status: StatusCode, text: &str) -> TavilyError {
    let message = serde_json::from_str::<ErrorBody>(text)
        .ok()
        .and_then(ErrorBody::message)
        .unwrap_or_else(|| {
            let end = text.floor_char_boundary(200);
            format!("HTTP {status}: {}", &text[..end])
        });

    match status.as_u16() {
        401 | 403 => TavilyError::Unauthorized(message),
        429 => TavilyError::RateLimited,
        code => TavilyError::Api { code, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_401_as_unauthorized_with_detail() {
        let err = classify_status(
            StatusCode::UNAUTHORIZED,
            r#"{"detail": {"error": "Unauthorized: missing or invalid API key."}}"#,
        );
        match err {
            TavilyError::Unauthorized(message) => assert!(message.contains("invalid API key")),
            other => panic!("expected Unauthorized, got: {other:?}"),
        }
    }

    #[test]
    fn classify_429_as_rate_limited() {
        let err = classify_status(StatusCode::TOO_MANY_REQUESTS, "");
        assert!(matches!(err, TavilyError::RateLimited));
    }

    #[test]
    fn classify_500_keeps_flat_error_message() {
        let err = classify_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error": "upstream failure"}"#,
        );
        match err {
            TavilyError::Api { code, message } => {
                assert_eq!(code, 500);
                assert_eq!(message, "upstream failure");
            }
            other => panic!("expected Api error, got: {other:?}"),
        }
    }

    #[test]
    fn classify_unstructured_body_truncates_snippet() {
        let body = "é".repeat(300);
        let err = classify_status(StatusCode::BAD_GATEWAY, &body);
        match err {
            TavilyError::Api { code: 502, message } => {
                assert!(message.starts_with("HTTP 502"));
                assert!(message.len() < body.len());
            }
            other => panic!("expected Api(502), got: {other:?}"),
        }
    }
}
