use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct SearchRequest<'a> {
    pub query: &'a str,
    pub max_results: u8,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchDocument>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchDocument {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub content: String,
}

/// Error body. Tavily nests the message under `detail` for most failures.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: Option<ErrorDetail>,
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn message(self) -> Option<String> {
        self.detail.and_then(|d| d.error).or(self.error)
    }
}
