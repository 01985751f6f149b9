//! LLM Engine module for AI-assisted report writing
//!
//! A single provider (Google Gemini) sits behind the `LlmProvider` trait.

pub mod commands;
pub mod engine;
#[cfg(test)]
pub(crate) mod mock;
pub mod provider;
pub mod providers;
pub mod refine;

pub use engine::LlmEngine;
pub use provider::{CompletionRequest, CompletionResponse, LlmError, LlmProvider};
pub use refine::{build_refine_prompt, refine_findings, REFINE_ERROR_MESSAGE};
