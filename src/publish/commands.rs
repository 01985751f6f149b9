//! Tauri commands for video publishing

use tauri::State;

use super::{UploadRequest, VideoLink};
use crate::state::AppState;

/// Simulate uploading the first recorded video and attach the link to the report
#[tauri::command]
pub async fn publish_video_link(state: State<'_, AppState>) -> Result<VideoLink, String> {
    let request = {
        let report = state.report.read().await;
        UploadRequest::from_session(&report).map_err(|e| e.to_string())?
    };

    let link = state
        .publisher
        .publish(request)
        .await
        .map_err(|e| e.to_string())?;

    state.report.write().await.video_link = Some(link.clone());
    Ok(link)
}

#[tauri::command]
pub async fn publish_get_link(state: State<'_, AppState>) -> Result<Option<VideoLink>, String> {
    Ok(state.report.read().await.video_link.clone())
}
