//! LLM Engine - owns the configured provider
//!
//! Commands clone the provider handle out of the engine so the engine lock
//! is not held while a request is in flight.

use std::sync::Arc;

use crate::database::EditorSettings;
use crate::llm_engine::provider::LlmProvider;
use crate::llm_engine::providers::gemini_provider::{resolve_api_key, GeminiConfig, GeminiProvider};

pub struct LlmEngine {
    provider: Arc<dyn LlmProvider>,
}

impl LlmEngine {
    /// Gemini provider configured from settings and the environment
    pub fn from_settings(settings: &EditorSettings) -> Self {
        let api_key = resolve_api_key(settings.gemini_api_key.as_deref());
        if api_key.is_none() {
            log::warn!("No Gemini API key configured; AI refinement will fail until one is set");
        }

        let config = GeminiConfig {
            model: settings.llm_model.clone(),
            api_key,
            ..GeminiConfig::default()
        };
        Self::with_provider(Arc::new(GeminiProvider::new(config)))
    }

    pub fn with_provider(provider: Arc<dyn LlmProvider>) -> Self {
        log::info!(
            "LLM engine using provider '{}' (model {})",
            provider.provider_name(),
            provider.model()
        );
        Self { provider }
    }

    pub fn provider(&self) -> Arc<dyn LlmProvider> {
        self.provider.clone()
    }

    pub async fn is_ready(&self) -> bool {
        self.provider.is_ready().await
    }
}
