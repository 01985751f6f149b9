// Media types
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// A captured still image or recorded clip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    pub kind: MediaKind,
    /// Data URL for images, file path for videos
    pub url: String,
    /// Raw webm bytes, kept in memory for upload and never sent to the webview
    #[serde(skip)]
    pub payload: Option<Bytes>,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    pub file_path: Option<PathBuf>,
}

impl MediaItem {
    pub fn image(data_url: String, file_path: Option<PathBuf>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind: MediaKind::Image,
            url: data_url,
            payload: None,
            timestamp: chrono::Utc::now().timestamp_millis(),
            file_path,
        }
    }

    pub fn video(url: String, payload: Bytes, file_path: Option<PathBuf>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind: MediaKind::Video,
            url,
            payload: Some(payload),
            timestamp: chrono::Utc::now().timestamp_millis(),
            file_path,
        }
    }

    pub fn is_image(&self) -> bool {
        self.kind == MediaKind::Image
    }

    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}
