//! Tauri commands for camera capture and recording

use serde::Serialize;
use std::time::Instant;
use tauri::ipc::{InvokeBody, Request};
use tauri::{AppHandle, Emitter, Runtime, State};

use super::shortcuts::{KeyEvent, ShortcutOutcome};
use super::snapshot::{self, SnapshotFrame};
use super::ticker::spawn_ticker;
use super::{CaptureView, FinishedRecording, RecordingStatus};
use crate::media::{file_io, MediaItem};
use crate::state::AppState;

pub const MEDIA_CAPTURED_EVENT: &str = "media-captured";

#[derive(Debug, Clone, Serialize)]
struct RecordingStopped {
    mime_type: &'static str,
    started_at: chrono::DateTime<chrono::Utc>,
    active_ms: u64,
    size_bytes: usize,
    chunk_count: usize,
}

impl From<&FinishedRecording> for RecordingStopped {
    fn from(finished: &FinishedRecording) -> Self {
        Self {
            mime_type: finished.mime_type,
            started_at: finished.started_at,
            active_ms: finished.active_ms,
            size_bytes: finished.payload.len(),
            chunk_count: finished.chunk_count,
        }
    }
}

fn emit_or_warn<R: Runtime, S: Serialize + Clone>(app: &AppHandle<R>, event: &str, payload: S) {
    if let Err(e) = app.emit(event, payload) {
        log::warn!("Failed to emit {}: {}", event, e);
    }
}

/// Bytes of a binary invoke; JSON bodies are rejected
fn binary_body(request: &Request<'_>) -> Result<Vec<u8>, String> {
    match request.body() {
        InvokeBody::Raw(bytes) => Ok(bytes.clone()),
        _ => Err("Expected a binary payload".to_string()),
    }
}

/// Append to the report library and notify the webview
async fn store_media<R: Runtime>(
    app: &AppHandle<R>,
    state: &AppState,
    item: MediaItem,
) -> Result<MediaItem, String> {
    {
        let mut report = state.report.write().await;
        report.media.append(item.clone()).map_err(|e| e.to_string())?;
    }
    emit_or_warn(app, MEDIA_CAPTURED_EVENT, &item);
    Ok(item)
}

/// Exam folder for new files; failures are logged and the media stays in memory only
async fn exam_folder(state: &AppState) -> Option<std::path::PathBuf> {
    let media_root = state.settings.read().await.media_root();
    let mut report = state.report.write().await;
    match report.ensure_exam_folder(&media_root) {
        Ok(folder) => Some(folder),
        Err(e) => {
            log::warn!("Media will not be saved to disk: {:#}", e);
            None
        }
    }
}

#[tauri::command]
pub async fn capture_get_state(state: State<'_, AppState>) -> Result<CaptureView, String> {
    let capture = state.capture.lock().await;
    Ok(capture.view(Instant::now()))
}

#[tauri::command]
pub async fn capture_camera_ready(
    state: State<'_, AppState>,
    width: u32,
    height: u32,
) -> Result<CaptureView, String> {
    let mut capture = state.capture.lock().await;
    capture.camera_ready(width, height);
    Ok(capture.view(Instant::now()))
}

/// Returns the message to show the user
#[tauri::command]
pub async fn capture_camera_failed(
    state: State<'_, AppState>,
    reason: String,
) -> Result<String, String> {
    let mut capture = state.capture.lock().await;
    Ok(capture.camera_failed(&reason).to_string())
}

/// Encode a preview frame as JPEG and add it to the report.
/// The body is raw RGBA; width and height come in `x-frame-*` headers.
/// Returns None when the camera is not streaming.
#[tauri::command]
pub async fn capture_snapshot<R: Runtime>(
    app: AppHandle<R>,
    state: State<'_, AppState>,
    request: Request<'_>,
) -> Result<Option<MediaItem>, String> {
    if !state.capture.lock().await.is_streaming() {
        log::debug!("Snapshot ignored: camera is not streaming");
        return Ok(None);
    }

    let frame = SnapshotFrame::from_ipc(request.headers(), binary_body(&request)?)
        .map_err(|e| e.to_string())?;

    let jpeg = crate::perf_time!(
        "Snapshot encoding",
        tokio::task::spawn_blocking(move || snapshot::encode_jpeg(frame)).await
    )
    .map_err(|e| format!("Snapshot task failed: {}", e))?
    .map_err(|e| e.to_string())?;
    crate::perf_debug!("Snapshot JPEG is {} bytes", jpeg.len());

    let file_path = match exam_folder(&state).await {
        Some(folder) => match file_io::write_snapshot(&folder, &jpeg) {
            Ok(path) => Some(path),
            Err(e) => {
                log::warn!("{:#}", e);
                None
            }
        },
        None => None,
    };

    let item = MediaItem::image(snapshot::jpeg_data_url(&jpeg), file_path);
    store_media(&app, &state, item).await.map(Some)
}

/// Start a recording. The webview starts its recorder only when the
/// returned status is `recording`.
#[tauri::command]
pub async fn capture_start_recording<R: Runtime>(
    app: AppHandle<R>,
    state: State<'_, AppState>,
) -> Result<CaptureView, String> {
    let now = Instant::now();
    let mut capture = state.capture.lock().await;

    if capture.start_recording(now) {
        let ticker = spawn_ticker(app.clone(), state.capture.clone());
        capture.set_ticker(ticker);
        log::info!("Recording started");
        emit_or_warn(&app, "recording-started", capture.view(now));
    }

    Ok(capture.view(now))
}

#[tauri::command]
pub async fn capture_toggle_pause<R: Runtime>(
    app: AppHandle<R>,
    state: State<'_, AppState>,
) -> Result<CaptureView, String> {
    let now = Instant::now();
    let mut capture = state.capture.lock().await;

    match capture.recording.toggle_pause(now) {
        RecordingStatus::Paused => {
            log::info!("Recording paused");
            emit_or_warn(&app, "recording-paused", capture.view(now));
        }
        RecordingStatus::Recording => {
            log::info!("Recording resumed");
            emit_or_warn(&app, "recording-resumed", capture.view(now));
        }
        RecordingStatus::Idle => {}
    }

    Ok(capture.view(now))
}

/// Recorder flush sent as a binary body. The webview sends chunks one at a
/// time in dataavailable order.
#[tauri::command]
pub async fn capture_push_chunk(
    state: State<'_, AppState>,
    request: Request<'_>,
) -> Result<bool, String> {
    let InvokeBody::Raw(chunk) = request.body() else {
        return Err("Expected a binary payload".to_string());
    };
    let mut capture = state.capture.lock().await;
    Ok(capture.recording.push_chunk(chunk))
}

/// Finish the recording after the webview recorder has flushed its last chunk
#[tauri::command]
pub async fn capture_stop_recording<R: Runtime>(
    app: AppHandle<R>,
    state: State<'_, AppState>,
) -> Result<Option<MediaItem>, String> {
    let finished = {
        let mut capture = state.capture.lock().await;
        capture.stop_recording(Instant::now())
    };
    let Some(finished) = finished else {
        return Ok(None);
    };

    log::info!(
        "Recording stopped: {} bytes in {} chunks, {} ms active",
        finished.payload.len(),
        finished.chunk_count,
        finished.active_ms
    );
    emit_or_warn(&app, "recording-stopped", RecordingStopped::from(&finished));

    let file_path = match exam_folder(&state).await {
        Some(folder) => match file_io::write_video(&folder, &finished.payload) {
            Ok(path) => Some(path),
            Err(e) => {
                log::warn!("{:#}", e);
                None
            }
        },
        None => None,
    };
    let url = file_path
        .as_ref()
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_default();

    let item = MediaItem::video(url, finished.payload, file_path);
    store_media(&app, &state, item).await.map(Some)
}

#[tauri::command]
pub async fn capture_key_down(
    state: State<'_, AppState>,
    event: KeyEvent,
) -> Result<ShortcutOutcome, String> {
    let mut capture = state.capture.lock().await;
    Ok(capture.shortcuts.key_down(&event, Instant::now()))
}

/// Classify an ArrowRight release against the current recording state
#[tauri::command]
pub async fn capture_key_up(
    state: State<'_, AppState>,
    event: KeyEvent,
) -> Result<ShortcutOutcome, String> {
    let mut capture = state.capture.lock().await;
    let active = capture.recording.is_active();
    Ok(capture.shortcuts.key_up(&event, Instant::now(), active))
}
