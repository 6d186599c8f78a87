mod config;
mod openai;
mod pipeline;
mod tavily;

pub const USER_AGENT: &str = concat!("eli5/", env!("CARGO_PKG_VERSION"));

use std::time::Duration;

use clap::Parser;
use reqwest::Client;
use tracing::info;

use config::Config;
use openai::client::OpenAiClient;
use tavily::client::TavilyClient;

/// TCP connection establishment timeout.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Global HTTP client timeout covering connect + response body.
const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// Answer a question so that a five-year-old could understand it.
///
/// Configuration is read from the environment and from `.env` in the current directory:
/// `TAVILY_API_KEY`, `OPENAI_API_KEY` (required), `OPENAI_MODEL`, `OPENAI_BASE_URL`,
/// `TAVILY_BASE_URL` (optional).
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// The question to explain
    #[arg(required = true, value_name = "QUESTION")]
    question: Vec<String>,
}

impl Cli {
    fn question(&self) -> Option<String> {
        let joined = self.question.join(" ");
        let trimmed = joined.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("eli5=info".parse()?),
        )
        .init();

    let question = cli.question().ok_or("question must not be empty")?;
    let config = Config::load()?;

    let http = Client::builder()
        .connect_timeout(CONNECT_TIMEOUT)
        .timeout(HTTP_TIMEOUT)
        .build()?;
    let searcher = TavilyClient::new(http.clone(), &config.search);
    let chat = OpenAiClient::new(http, &config.completion);

    let answer = pipeline::eli5(&searcher, &chat, &question)
        .await
        .inspect_err(|e| tracing::error!("eli5 failed: {e}"))?;

    info!(model = %config.completion.model, "answer ready");
    println!("{answer}");
    Ok(())
}
