//! Recording session state machine
//!
//! Chunks flushed by the webview recorder are accumulated here until the
//! session is stopped, at which point they are handed back as one webm
//! payload. Active time excludes paused intervals.

use bytes::{Bytes, BytesMut};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

pub const RECORDER_MIME_TYPE: &str = "video/webm;codecs=vp9";
pub const VIDEO_MIME_TYPE: &str = "video/webm";
pub const RECORDER_TIMESLICE_MS: u32 = 1000;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RecordingStatus {
    Idle,
    Recording,
    Paused,
}

impl Default for RecordingStatus {
    fn default() -> Self {
        RecordingStatus::Idle
    }
}

/// Clip handed back by `stop`
#[derive(Debug, Clone)]
pub struct FinishedRecording {
    pub payload: Bytes,
    pub mime_type: &'static str,
    pub started_at: DateTime<Utc>,
    pub active_ms: u64,
    pub chunk_count: usize,
}

#[derive(Debug, Default)]
pub struct RecordingSession {
    status: RecordingStatus,
    chunks: BytesMut,
    chunk_count: usize,
    started_at: Option<DateTime<Utc>>,
    /// Active time from earlier recording windows
    active_ms_baseline: u64,
    running_anchor: Option<Instant>,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> RecordingStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status != RecordingStatus::Idle
    }

    pub fn buffered_bytes(&self) -> usize {
        self.chunks.len()
    }

    /// Begin a new recording. Returns false when one is already active.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.is_active() {
            return false;
        }
        *self = Self {
            status: RecordingStatus::Recording,
            chunks: BytesMut::new(),
            chunk_count: 0,
            started_at: Some(Utc::now()),
            active_ms_baseline: 0,
            running_anchor: Some(now),
        };
        true
    }

    /// Accept a recorder flush. Empty chunks and chunks outside a session are dropped.
    pub fn push_chunk(&mut self, chunk: &[u8]) -> bool {
        if chunk.is_empty() || !self.is_active() {
            return false;
        }
        self.chunks.extend_from_slice(chunk);
        self.chunk_count += 1;
        crate::perf_trace!(
            "Recording chunk #{} ({} bytes, {} buffered)",
            self.chunk_count,
            chunk.len(),
            self.chunks.len()
        );
        true
    }

    /// Recording -> Paused, Paused -> Recording. Returns the new status.
    pub fn toggle_pause(&mut self, now: Instant) -> RecordingStatus {
        match self.status {
            RecordingStatus::Recording => {
                self.active_ms_baseline = self.elapsed_ms(now);
                self.running_anchor = None;
                self.status = RecordingStatus::Paused;
            }
            RecordingStatus::Paused => {
                self.running_anchor = Some(now);
                self.status = RecordingStatus::Recording;
            }
            RecordingStatus::Idle => {}
        }
        self.status
    }

    /// Finish the session and return every buffered chunk as one payload
    pub fn stop(&mut self, now: Instant) -> Option<FinishedRecording> {
        if !self.is_active() {
            return None;
        }
        let active_ms = self.elapsed_ms(now);
        let chunk_count = self.chunk_count;
        let started_at = self.started_at.unwrap_or_else(Utc::now);
        let payload = std::mem::take(&mut self.chunks).freeze();
        *self = Self::default();

        Some(FinishedRecording {
            payload,
            mime_type: VIDEO_MIME_TYPE,
            started_at,
            active_ms,
            chunk_count,
        })
    }

    pub fn elapsed_ms(&self, now: Instant) -> u64 {
        match (self.status, self.running_anchor) {
            (RecordingStatus::Recording, Some(anchor)) => self
                .active_ms_baseline
                .saturating_add(now.saturating_duration_since(anchor).as_millis() as u64),
            (RecordingStatus::Paused, _) => self.active_ms_baseline,
            _ => 0,
        }
    }

    pub fn elapsed_secs(&self, now: Instant) -> u64 {
        self.elapsed_ms(now) / 1000
    }
}

/// `m:ss` display of a recording duration
pub fn format_elapsed(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
