//! Video publishing
//!
//! Uploading is simulated: after a fixed delay a demo watch link is produced,
//! together with the URL of a QR image pointing at it.

pub mod commands;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::report::ReportSession;

pub const NO_VIDEO_MESSAGE: &str = "Nenhum vídeo gravado para enviar.";
pub const UPLOAD_IN_PROGRESS_MESSAGE: &str = "Envio de vídeo já em andamento.";
pub const SIMULATED_UPLOAD_LATENCY: Duration = Duration::from_millis(2500);

const WATCH_URL: &str = "https://youtube.com/watch";
const QR_SERVICE_URL: &str = "https://api.qrserver.com/v1/create-qr-code/";
const QR_SIZE: &str = "150x150";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VideoLink {
    pub url: String,
    pub qr_code_url: String,
}

/// What gets uploaded, captured before the report lock is released
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub video_id: String,
    pub size_bytes: usize,
    pub patient_first_name: String,
}

impl UploadRequest {
    /// Uses the first recorded video of the report
    pub fn from_session(session: &ReportSession) -> Result<Self> {
        let Some(video) = session.media.first_video() else {
            bail!(NO_VIDEO_MESSAGE);
        };
        Ok(Self {
            video_id: video.id.clone(),
            size_bytes: video.payload.as_ref().map_or(0, |p| p.len()),
            patient_first_name: session.patient.first_name().to_string(),
        })
    }
}

/// URL of a 150x150 QR image encoding `link`
pub fn qr_code_url(link: &str) -> Result<String> {
    let url = reqwest::Url::parse_with_params(QR_SERVICE_URL, &[("size", QR_SIZE), ("data", link)])
        .context("Failed to build QR code URL")?;
    Ok(url.to_string())
}

/// Short lowercase base-36 token
fn demo_video_id() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut value = uuid::Uuid::new_v4().as_u128();
    let mut id = String::with_capacity(6);
    for _ in 0..6 {
        id.push(ALPHABET[(value % 36) as usize] as char);
        value /= 36;
    }
    id
}

pub fn demo_watch_link(video_token: &str, patient_first_name: &str) -> String {
    format!("{}?v=DEMO_{}_{}", WATCH_URL, video_token, patient_first_name)
}

/// Clears the in-flight flag when the upload finishes or is dropped
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

pub struct Publisher {
    uploading: AtomicBool,
    latency: Duration,
}

impl Publisher {
    pub fn new() -> Self {
        Self::with_latency(SIMULATED_UPLOAD_LATENCY)
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            uploading: AtomicBool::new(false),
            latency,
        }
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading.load(Ordering::SeqCst)
    }

    /// Simulated upload. A second call while one is in flight is rejected.
    pub async fn publish(&self, request: UploadRequest) -> Result<VideoLink> {
        if self
            .uploading
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            bail!(UPLOAD_IN_PROGRESS_MESSAGE);
        }
        let _in_flight = InFlight(&self.uploading);

        log::info!(
            "Uploading video {} ({} bytes)",
            request.video_id,
            request.size_bytes
        );
        tokio::time::sleep(self.latency).await;

        let url = demo_watch_link(&demo_video_id(), &request.patient_first_name);
        let qr_code_url = qr_code_url(&url)?;
        log::info!("Video link generated: {}", url);

        Ok(VideoLink { url, qr_code_url })
    }
}

impl Default for Publisher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaItem;
    use crate::report::{DoctorInfo, PatientUpdate};
    use bytes::Bytes;
    use std::sync::Arc;

    fn session_with_video() -> ReportSession {
        let mut session = ReportSession::new(DoctorInfo::default());
        session.update_patient(PatientUpdate {
            name: Some("Maria Silva".to_string()),
            ..Default::default()
        });
        session
            .media
            .append(MediaItem::video("clip.webm".to_string(), Bytes::from_static(b"1234"), None))
            .unwrap();
        session
    }

    #[test]
    fn test_request_requires_video() {
        let mut session = ReportSession::new(DoctorInfo::default());
        session
            .media
            .append(MediaItem::image("data:image/jpeg;base64,AA==".to_string(), None))
            .unwrap();

        let err = UploadRequest::from_session(&session).unwrap_err();
        assert_eq!(err.to_string(), NO_VIDEO_MESSAGE);
    }

    #[test]
    fn test_request_from_session() {
        let request = UploadRequest::from_session(&session_with_video()).unwrap();
        assert_eq!(request.patient_first_name, "Maria");
        assert_eq!(request.size_bytes, 4);
    }

    #[test]
    fn test_qr_code_url_encodes_link() {
        let url = qr_code_url("https://youtube.com/watch?v=DEMO_ab12_Ana").unwrap();
        assert!(url.starts_with("https://api.qrserver.com/v1/create-qr-code/?size=150x150&data="));
        assert!(url.contains("data=https%3A%2F%2Fyoutube.com%2Fwatch%3Fv%3DDEMO_ab12_Ana"));
    }

    #[test]
    fn test_demo_watch_link() {
        assert_eq!(
            demo_watch_link("x1y2z3", "Maria"),
            "https://youtube.com/watch?v=DEMO_x1y2z3_Maria"
        );
        let token = demo_video_id();
        assert_eq!(token.len(), 6);
        assert!(token.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[tokio::test]
    async fn test_publish_generates_link() {
        let publisher = Publisher::with_latency(Duration::from_millis(1));
        let request = UploadRequest::from_session(&session_with_video()).unwrap();

        let link = publisher.publish(request).await.unwrap();
        assert!(link.url.starts_with("https://youtube.com/watch?v=DEMO_"));
        assert!(link.url.ends_with("_Maria"));
        assert!(link.qr_code_url.contains("size=150x150"));
        assert!(!publisher.is_uploading());
    }

    #[tokio::test]
    async fn test_concurrent_publish_rejected() {
        let publisher = Arc::new(Publisher::with_latency(Duration::from_millis(200)));
        let request = UploadRequest::from_session(&session_with_video()).unwrap();

        let first = {
            let publisher = publisher.clone();
            let request = request.clone();
            tokio::spawn(async move { publisher.publish(request).await })
        };
        tokio::task::yield_now().await;
        assert!(publisher.is_uploading());

        let err = publisher.publish(request).await.unwrap_err();
        assert_eq!(err.to_string(), UPLOAD_IN_PROGRESS_MESSAGE);

        assert!(first.await.unwrap().is_ok());
        assert!(!publisher.is_uploading());
    }
}
