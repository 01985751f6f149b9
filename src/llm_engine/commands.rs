//! Tauri commands for LLM functionality

use std::sync::Arc;
use tauri::{AppHandle, Emitter, Runtime, State};

use crate::llm_engine::provider::LlmProvider;
use crate::llm_engine::refine::{refine_findings, REFINE_ERROR_MESSAGE};
use crate::state::AppState;

/// Whether a request can be attempted (an API key is available)
#[tauri::command]
pub async fn llm_is_ready(state: State<'_, AppState>) -> Result<bool, String> {
    let engine = state.llm_engine.read().await;
    Ok(engine.is_ready().await)
}

/// Refine the report's findings with `provider` and store the result.
/// No lock is held during the request; on failure the findings stay as they were.
pub async fn refine_report_findings(
    state: &AppState,
    provider: Arc<dyn LlmProvider>,
) -> Result<String, String> {
    let (findings, exam_type) = {
        let report = state.report.read().await;
        (report.exam.findings.clone(), report.exam.exam_type)
    };
    if findings.is_empty() {
        return Ok(findings);
    }

    let refined = refine_findings(provider.as_ref(), &findings, exam_type)
        .await
        .map_err(|e| {
            log::error!("Gemini Error: {}", e);
            REFINE_ERROR_MESSAGE.to_string()
        })?;

    state.report.write().await.exam.findings = refined.clone();
    Ok(refined)
}

/// Rewrite the current findings with the language model
#[tauri::command]
pub async fn llm_refine_findings<R: Runtime>(
    app: AppHandle<R>,
    state: State<'_, AppState>,
) -> Result<String, String> {
    let provider = state.llm_engine.read().await.provider();
    let refined = refine_report_findings(&state, provider).await?;

    if let Err(e) = app.emit("findings-updated", serde_json::json!({ "findings": refined })) {
        log::warn!("Failed to emit findings-updated: {}", e);
    }
    Ok(refined)
}
