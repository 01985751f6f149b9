//! Tauri commands for dictation

use serde::Serialize;
use tauri::{AppHandle, Emitter, Runtime, State};

use super::session::{apply_results, DictationStatus, RecognitionResult};
use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
struct FindingsUpdated {
    findings: String,
}

/// Start or stop listening. `supported` is false when the webview has no
/// speech recognition.
#[tauri::command]
pub async fn dictation_toggle(
    state: State<'_, AppState>,
    supported: bool,
) -> Result<DictationStatus, String> {
    let mut dictation = state.dictation.lock().await;
    dictation.toggle(supported).map_err(|e| e.to_string())?;
    Ok(dictation.status())
}

/// Forward a recognition result event; returns the updated findings
#[tauri::command]
pub async fn dictation_results<R: Runtime>(
    app: AppHandle<R>,
    state: State<'_, AppState>,
    results: Vec<RecognitionResult>,
    result_index: usize,
) -> Result<String, String> {
    if !results.iter().skip(result_index).any(|r| r.is_final) {
        return Ok(state.report.read().await.exam.findings.clone());
    }

    let findings = {
        let mut report = state.report.write().await;
        report.exam.findings = apply_results(&report.exam.findings, &results, result_index);
        report.exam.findings.clone()
    };

    if let Err(e) = app.emit("findings-updated", FindingsUpdated { findings: findings.clone() }) {
        log::warn!("Failed to emit findings-updated: {}", e);
    }
    Ok(findings)
}

#[tauri::command]
pub async fn dictation_ended(state: State<'_, AppState>) -> Result<DictationStatus, String> {
    let mut dictation = state.dictation.lock().await;
    dictation.on_end();
    Ok(dictation.status())
}

#[tauri::command]
pub async fn dictation_error(
    state: State<'_, AppState>,
    error: String,
) -> Result<DictationStatus, String> {
    let mut dictation = state.dictation.lock().await;
    dictation.on_error(&error);
    Ok(dictation.status())
}

#[tauri::command]
pub async fn dictation_status(state: State<'_, AppState>) -> Result<DictationStatus, String> {
    Ok(state.dictation.lock().await.status())
}
