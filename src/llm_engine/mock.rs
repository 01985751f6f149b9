// Canned provider for tests
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::llm_engine::provider::{CompletionRequest, CompletionResponse, LlmError, LlmProvider};

pub struct MockProvider {
    reply: Result<String, LlmError>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl MockProvider {
    pub fn replying(reply: Result<String, LlmError>) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn provider_name(&self) -> &'static str {
        "mock"
    }

    async fn is_ready(&self) -> bool {
        true
    }

    fn model(&self) -> String {
        "mock-model".to_string()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(request.prompt);
        self.reply.clone().map(|content| CompletionResponse {
            content,
            model: "mock-model".to_string(),
            prompt_tokens: None,
            completion_tokens: None,
            finish_reason: Some("STOP".to_string()),
        })
    }
}
