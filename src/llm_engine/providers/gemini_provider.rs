//! Google Gemini API provider
//!
//! Calls `generateContent` on the Generative Language API with an API key
//! passed as a query parameter.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::llm_engine::provider::{CompletionRequest, CompletionResponse, LlmError, LlmProvider};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Environment variables checked, in order, when no key is stored in settings
pub const API_KEY_ENV_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

/// Gemini content part
#[derive(Debug, Serialize, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

/// generateContent request body
#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: Option<u32>,
    #[serde(default)]
    candidates_token_count: Option<u32>,
}

/// generateContent response body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsage>,
    #[serde(default)]
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    error: GeminiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorDetail {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Gemini provider configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout_secs: 60,
        }
    }
}

/// Stored key first, then the environment
pub fn resolve_api_key(stored: Option<&str>) -> Option<String> {
    resolve_api_key_with(stored, |name| std::env::var(name).ok())
}

fn resolve_api_key_with<F>(stored: Option<&str>, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    stored
        .map(str::to_string)
        .into_iter()
        .chain(API_KEY_ENV_VARS.iter().filter_map(|name| lookup(*name)))
        .map(|key| key.trim().to_string())
        .find(|key| !key.is_empty())
}

/// One user turn carrying the whole prompt
fn build_request(request: &CompletionRequest) -> GeminiRequest {
    GeminiRequest {
        contents: vec![GeminiContent {
            role: Some("user".to_string()),
            parts: vec![GeminiPart { text: request.prompt.clone() }],
        }],
    }
}

fn parse_response(response: GeminiResponse, model: &str) -> CompletionResponse {
    let first = response.candidates.into_iter().next();
    let finish_reason = first.as_ref().and_then(|c| c.finish_reason.clone());
    let content = first
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().map(|p| p.text).collect::<String>())
        .unwrap_or_default();

    CompletionResponse {
        content,
        model: response.model_version.unwrap_or_else(|| model.to_string()),
        prompt_tokens: response.usage_metadata.as_ref().and_then(|u| u.prompt_token_count),
        completion_tokens: response.usage_metadata.as_ref().and_then(|u| u.candidates_token_count),
        finish_reason,
    }
}

fn map_error_status(status: StatusCode, body: &str) -> LlmError {
    let detail = serde_json::from_str::<GeminiErrorBody>(body)
        .map(|b| b.error)
        .ok();
    let message = detail
        .as_ref()
        .map(|d| d.message.clone())
        .unwrap_or_else(|| body.to_string());

    let auth_problem = matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        || detail
            .as_ref()
            .and_then(|d| d.status.as_deref())
            .map_or(false, |s| s == "PERMISSION_DENIED" || s == "UNAUTHENTICATED")
        || message.contains("API key");

    if auth_problem {
        LlmError::AuthenticationFailed(message)
    } else {
        LlmError::RequestFailed(format!("Gemini returned {}: {}", status, message))
    }
}

/// Gemini LLM provider
pub struct GeminiProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                log::warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Self { config, client }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    async fn is_ready(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| LlmError::AuthenticationFailed("API Key not found".to_string()))?;

        if request.prompt.is_empty() {
            return Err(LlmError::InvalidRequest("Empty prompt".to_string()));
        }

        let body = build_request(&request);
        log::debug!("Gemini request to model {}", self.config.model);

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(map_error_status(status, &error_text));
        }

        let gemini_response: GeminiResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        Ok(parse_response(gemini_response, &self.config.model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_api_key_order() {
        let env = |name: &str| match name {
            "GEMINI_API_KEY" => Some("from-gemini-env".to_string()),
            "API_KEY" => Some("from-api-env".to_string()),
            _ => None,
        };
        assert_eq!(
            resolve_api_key_with(Some("stored"), env).as_deref(),
            Some("stored")
        );
        assert_eq!(
            resolve_api_key_with(None, env).as_deref(),
            Some("from-gemini-env")
        );

        let only_api_key = |name: &str| (name == "API_KEY").then(|| "fallback".to_string());
        assert_eq!(
            resolve_api_key_with(Some("  "), only_api_key).as_deref(),
            Some("fallback")
        );
        assert_eq!(resolve_api_key_with(None, |_| None), None);
    }

    #[test]
    fn test_build_request_body() {
        let json = serde_json::to_value(build_request(&CompletionRequest::new("olá"))).unwrap();

        let contents = json["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 1);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[0]["parts"][0]["text"], "olá");
        assert_eq!(json.as_object().unwrap().len(), 1);
    }

    #[test]
    fn test_parse_response_text() {
        let raw = r#"{
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Septo "}, {"text": "centrado."}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 4},
            "modelVersion": "gemini-2.5-flash-001"
        }"#;
        let parsed: GeminiResponse = serde_json::from_str(raw).unwrap();
        let response = parse_response(parsed, DEFAULT_MODEL);

        assert_eq!(response.content, "Septo centrado.");
        assert_eq!(response.model, "gemini-2.5-flash-001");
        assert_eq!(response.prompt_tokens, Some(12));
        assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
    }

    #[test]
    fn test_parse_response_without_candidates() {
        let parsed: GeminiResponse = serde_json::from_str("{}").unwrap();
        let response = parse_response(parsed, DEFAULT_MODEL);
        assert!(response.content.is_empty());
        assert_eq!(response.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_map_error_status() {
        let body = r#"{"error": {"code": 400, "message": "API key not valid. Please pass a valid API key.", "status": "INVALID_ARGUMENT"}}"#;
        assert!(matches!(
            map_error_status(StatusCode::BAD_REQUEST, body),
            LlmError::AuthenticationFailed(_)
        ));
        assert!(matches!(
            map_error_status(StatusCode::INTERNAL_SERVER_ERROR, "boom"),
            LlmError::RequestFailed(_)
        ));
    }

    #[test]
    fn test_endpoint() {
        let provider = GeminiProvider::new(GeminiConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..GeminiConfig::default()
        });
        assert_eq!(
            provider.endpoint(),
            "http://localhost:8080/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_missing_key_fails_at_call_time() {
        let provider = GeminiProvider::new(GeminiConfig::default());
        assert!(!provider.is_ready().await);

        let err = provider
            .complete(CompletionRequest::new("texto"))
            .await
            .unwrap_err();
        match err {
            LlmError::AuthenticationFailed(msg) => assert_eq!(msg, "API Key not found"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_prompt_rejected_before_sending() {
        let provider = GeminiProvider::new(GeminiConfig {
            api_key: Some("key".to_string()),
            base_url: "http://127.0.0.1:9".to_string(),
            ..GeminiConfig::default()
        });

        let err = provider.complete(CompletionRequest::new("")).await.unwrap_err();
        assert!(matches!(err, LlmError::InvalidRequest(_)));
    }
}
