//! LLM provider trait and request/response types

use async_trait::async_trait;
use std::fmt;

#[derive(Debug, Clone)]
pub enum LlmError {
    /// API key missing or rejected
    AuthenticationFailed(String),
    /// Network failure or non-success HTTP status
    RequestFailed(String),
    InvalidRequest(String),
    /// Body could not be decoded
    InvalidResponse(String),
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::AuthenticationFailed(msg) => write!(f, "Authentication failed: {}", msg),
            LlmError::RequestFailed(msg) => write!(f, "Request failed: {}", msg),
            LlmError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            LlmError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for LlmError {}

/// Single-turn text generation request
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub prompt: String,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into() }
    }
}

#[derive(Debug, Clone)]
pub struct CompletionResponse {
    /// Generated text, possibly empty
    pub content: String,
    /// Model version that answered
    pub model: String,
    pub prompt_tokens: Option<u32>,
    pub completion_tokens: Option<u32>,
    /// STOP, MAX_TOKENS, SAFETY, ...
    pub finish_reason: Option<String>,
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// Whether a request can be attempted (credentials present)
    async fn is_ready(&self) -> bool;

    fn model(&self) -> String;

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}
