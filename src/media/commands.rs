//! Tauri commands for the media library

use tauri::State;

use super::{file_io, MediaItem};
use crate::state::AppState;

/// Media captured for the current report, in capture order
#[tauri::command]
pub async fn media_list(state: State<'_, AppState>) -> Result<Vec<MediaItem>, String> {
    let report = state.report.read().await;
    Ok(report.media.items().to_vec())
}

/// Remove an item from the report; its file on disk is removed best-effort
#[tauri::command]
pub async fn media_delete(state: State<'_, AppState>, id: String) -> Result<bool, String> {
    let removed = {
        let mut report = state.report.write().await;
        report.media.remove(&id)
    };

    let Some(item) = removed else {
        log::debug!("media_delete: no item with id {}", id);
        return Ok(false);
    };

    if let Some(path) = &item.file_path {
        if let Err(e) = file_io::remove_media_file(path) {
            log::warn!("{:#}", e);
        }
    }

    log::info!("Deleted {:?} {}", item.kind, item.id);
    Ok(true)
}
