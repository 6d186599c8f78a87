//! Tavily web search: one query in, ranked documents out.

pub mod client;
pub mod context;
pub mod types;
