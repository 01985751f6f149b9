//! Camera capture: snapshots, recording sessions and keyboard shortcuts
//!
//! The webview owns the camera stream and the recorder; this module owns the
//! state that decides what they should do.

pub mod commands;
pub mod session;
pub mod shortcuts;
pub mod snapshot;
pub mod ticker;

use serde::Serialize;
use std::time::Instant;
use tokio::task::JoinHandle;

pub use session::{format_elapsed, FinishedRecording, RecordingSession, RecordingStatus};
pub use shortcuts::{KeyEvent, ShortcutAction, ShortcutClassifier, ShortcutOutcome};
pub use snapshot::SnapshotFrame;

pub const CAMERA_ERROR_MESSAGE: &str =
    "Não foi possível acessar a câmera. Verifique as permissões.";

/// Constraints the webview requests from getUserMedia
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CameraConstraints {
    pub ideal_width: u32,
    pub ideal_height: u32,
    pub audio: bool,
}

pub const CAMERA_CONSTRAINTS: CameraConstraints = CameraConstraints {
    ideal_width: 1920,
    ideal_height: 1080,
    audio: true,
};

#[derive(Debug, Clone, Default, Serialize)]
pub struct CameraStatus {
    pub streaming: bool,
    pub width: u32,
    pub height: u32,
    pub last_error: Option<String>,
}

/// Capture state as seen by the webview
#[derive(Debug, Clone, Serialize)]
pub struct CaptureView {
    pub camera: CameraStatus,
    pub constraints: CameraConstraints,
    pub status: RecordingStatus,
    pub elapsed_secs: u64,
    pub elapsed_label: String,
    pub recorder_mime_type: &'static str,
    pub timeslice_ms: u32,
}

#[derive(Debug, Default)]
pub struct CaptureState {
    pub camera: CameraStatus,
    pub recording: RecordingSession,
    pub shortcuts: ShortcutClassifier,
    ticker: Option<JoinHandle<()>>,
}

impl CaptureState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn camera_ready(&mut self, width: u32, height: u32) {
        self.camera = CameraStatus {
            streaming: true,
            width,
            height,
            last_error: None,
        };
        log::info!("Camera streaming at {}x{}", width, height);
    }

    /// Record a camera failure and return the message shown to the user
    pub fn camera_failed(&mut self, reason: &str) -> &'static str {
        log::error!("Error accessing camera: {}", reason);
        self.camera.streaming = false;
        self.camera.last_error = Some(reason.to_string());
        CAMERA_ERROR_MESSAGE
    }

    pub fn is_streaming(&self) -> bool {
        self.camera.streaming
    }

    /// Start recording when the camera is live and no session is active
    pub fn start_recording(&mut self, now: Instant) -> bool {
        if !self.camera.streaming {
            log::warn!("Cannot start recording: camera is not streaming");
            return false;
        }
        self.recording.start(now)
    }

    pub fn stop_recording(&mut self, now: Instant) -> Option<FinishedRecording> {
        let finished = self.recording.stop(now);
        self.stop_ticker();
        finished
    }

    pub fn set_ticker(&mut self, handle: JoinHandle<()>) {
        self.stop_ticker();
        self.ticker = Some(handle);
    }

    pub fn stop_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }

    pub fn view(&self, now: Instant) -> CaptureView {
        let elapsed_secs = self.recording.elapsed_secs(now);
        CaptureView {
            camera: self.camera.clone(),
            constraints: CAMERA_CONSTRAINTS,
            status: self.recording.status(),
            elapsed_secs,
            elapsed_label: format_elapsed(elapsed_secs),
            recorder_mime_type: session::RECORDER_MIME_TYPE,
            timeslice_ms: session::RECORDER_TIMESLICE_MS,
        }
    }
}
