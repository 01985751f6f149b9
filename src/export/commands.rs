//! Tauri commands for report rendering and export

use std::path::PathBuf;
use tauri::State;

use super::{export_report, render_report_html};
use crate::state::AppState;

/// HTML for the print view
#[tauri::command]
pub async fn report_render_html(state: State<'_, AppState>) -> Result<String, String> {
    let report = state.report.read().await;
    Ok(render_report_html(&report))
}

/// Write the report as HTML. Without a path, `laudo.html` goes into the exam folder.
#[tauri::command]
pub async fn report_export_html(
    state: State<'_, AppState>,
    path: Option<String>,
) -> Result<String, String> {
    let media_root = state.settings.read().await.media_root();
    let mut report = state.report.write().await;

    let target = match path {
        Some(path) => PathBuf::from(path),
        None => report
            .ensure_exam_folder(&media_root)
            .map_err(|e| e.to_string())?
            .join("laudo.html"),
    };

    export_report(&report, &target).map_err(|e| e.to_string())?;
    Ok(target.to_string_lossy().to_string())
}
