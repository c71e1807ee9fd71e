//! Provider name constants
//!
//! This module defines canonical provider names used throughout the SDK

/// Google (Gemini models)
pub const GEMINI: &str = "gemini";

/// Groq (hosted Llama models)
pub const GROQ: &str = "groq";
