// Adapters layer: concrete implementations of the domain ports over HTTP.

pub mod http;
pub mod llm;
pub mod serper;
