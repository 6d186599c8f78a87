//! Question answering: web search for context, then a child-level explanation.

mod prompt;

use tracing::{debug, info};

use crate::openai::client::{ChatClient, OpenAiError};
use crate::tavily::client::{SearchClient, TavilyError};
use crate::tavily::context::join_contents;

use prompt::build_messages;

#[derive(Debug, thiserror::Error)]
pub enum Eli5Error {
    #[error(transparent)]
    Search(#[from] TavilyError),

    #[error(transparent)]
    Completion(#[from] OpenAiError),
}

/// Fetch web context for `question`. No results yields an empty string.
pub async fn search(searcher: &impl SearchClient, question: &str) -> Result<String, TavilyError> {
    info!(query = %question, "search");
    let documents = searcher.search(question).await?;
    let context = join_contents(&documents);
    debug!(documents = documents.len(), bytes = context.len(), "search done");
    Ok(context)
}

/// Ask the model to answer `question` using `context`, in words a five-year-old understands.
pub async fn explain(
    chat: &impl ChatClient,
    question: &str,
    context: &str,
) -> Result<String, OpenAiError> {
    info!(context_bytes = context.len(), "explain");
    let messages = build_messages(question, context);
    let answer = chat.complete(&messages).await?;
    debug!(bytes = answer.len(), "explain done");
    Ok(answer)
}

/// Search, then explain. The second call starts only after the first returns.
pub async fn eli5(
    searcher: &impl SearchClient,
    chat: &impl ChatClient,
    question: &str,
) -> Result<String, Eli5Error> {
    info!(question = %question, "eli5");
    let context = search(searcher, question).await?;
    let answer = explain(chat, question, &context).await?;
    Ok(answer)
}
