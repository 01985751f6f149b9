//! LLM provider implementations

pub mod gemini_provider;

pub use gemini_provider::{GeminiConfig, GeminiProvider};
