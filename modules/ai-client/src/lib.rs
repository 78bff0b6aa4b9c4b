//! Minimal chat-completions client for OpenAI-compatible endpoints.
//!
//! Pointed at the hosted OpenAI API by default; a local Ollama server (or
//! any other endpoint speaking the `/chat/completions` wire format) works
//! via [`OpenAi::with_base_url`].

mod client;
pub(crate) mod types;
pub mod util;

pub use client::OpenAi;
