use tracing::{debug, warn};

use super::types::SearchDocument;

/// Join document bodies into the prompt context, one body per line.
/// No documents yields an empty string.
pub fn join_contents(documents: &[SearchDocument]) -> String {
    if documents.is_empty() {
        warn!("search returned no documents, continuing with empty context");
        return String::new();
    }

    for doc in documents {
        debug!(url = %doc.url, bytes = doc.content.len(), "search document");
    }

    documents
        .iter()
        .map(|d| d.content.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}
