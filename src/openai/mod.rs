//! OpenAI-compatible chat completions.

pub mod client;
pub mod types;
