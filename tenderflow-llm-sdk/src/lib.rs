//! Unified SDK for the text-completion providers used by the tender workflow.
//!
//! Two providers are supported behind a single [`LlmClient`] trait:
//! - Google Gemini (`generateContent` API)
//! - Groq (OpenAI-compatible chat completions)
//!
//! [`CompletionManager`] chains them in order and falls back on failure, so
//! callers see one `analyze` call rather than per-provider plumbing.

pub mod client;
pub mod error;
pub mod gemini;
pub mod groq;
pub mod manager;
pub mod models;
pub mod providers;
pub mod types;

pub use client::LlmClient;
pub use error::LlmError;
pub use gemini::GeminiClient;
pub use groq::GroqClient;
pub use manager::CompletionManager;
pub use types::{Completion, CompletionRequest, CompletionResponse, Usage};
