// Once-per-second recording-tick events while a recording is running
use serde::Serialize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tauri::{AppHandle, Emitter, Runtime};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use super::{format_elapsed, CaptureState, RecordingStatus};

pub const TICK_EVENT: &str = "recording-tick";

#[derive(Debug, Clone, Serialize)]
pub struct RecordingTick {
    pub elapsed_secs: u64,
    pub elapsed_label: String,
}

pub fn spawn_ticker<R: Runtime>(
    app: AppHandle<R>,
    capture: Arc<Mutex<CaptureState>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        // First tick completes immediately
        interval.tick().await;

        loop {
            interval.tick().await;

            let (status, elapsed_secs) = {
                let guard = capture.lock().await;
                (guard.recording.status(), guard.recording.elapsed_secs(Instant::now()))
            };

            match status {
                RecordingStatus::Idle => break,
                RecordingStatus::Paused => continue,
                RecordingStatus::Recording => {
                    let tick = RecordingTick {
                        elapsed_secs,
                        elapsed_label: format_elapsed(elapsed_secs),
                    };
                    if let Err(e) = app.emit(TICK_EVENT, &tick) {
                        log::warn!("Failed to emit {}: {}", TICK_EVENT, e);
                    }
                }
            }
        }

        log::debug!("Recording ticker finished");
    })
}
