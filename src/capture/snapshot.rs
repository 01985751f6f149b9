// Still image encoding for snapshots
use anyhow::{bail, Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};
use tauri::http::HeaderMap;

pub const JPEG_QUALITY: u8 = 90;
pub const FRAME_WIDTH_HEADER: &str = "x-frame-width";
pub const FRAME_HEIGHT_HEADER: &str = "x-frame-height";

/// Raw RGBA frame grabbed from the preview canvas
#[derive(Debug, Clone)]
pub struct SnapshotFrame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

fn dimension(headers: &HeaderMap, name: &str) -> Result<u32> {
    let value = headers
        .get(name)
        .with_context(|| format!("Missing {} header", name))?;
    value
        .to_str()
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .with_context(|| format!("Invalid {} header: {:?}", name, value))
}

impl SnapshotFrame {
    /// Frame from a binary IPC body with its dimensions in request headers
    pub fn from_ipc(headers: &HeaderMap, rgba: Vec<u8>) -> Result<Self> {
        let frame = Self {
            width: dimension(headers, FRAME_WIDTH_HEADER)?,
            height: dimension(headers, FRAME_HEIGHT_HEADER)?,
            rgba,
        };
        frame.validate()?;
        Ok(frame)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            bail!("Empty frame ({}x{})", self.width, self.height);
        }
        let expected = self.width as usize * self.height as usize * 4;
        if self.rgba.len() != expected {
            bail!(
                "Frame size mismatch: {} bytes for {}x{} (expected {})",
                self.rgba.len(),
                self.width,
                self.height,
                expected
            );
        }
        Ok(())
    }
}

pub fn encode_jpeg(frame: SnapshotFrame) -> Result<Vec<u8>> {
    frame.validate()?;
    let SnapshotFrame { width, height, rgba } = frame;

    let rgba = RgbaImage::from_raw(width, height, rgba)
        .context("Frame buffer does not match dimensions")?;
    let rgb = DynamicImage::ImageRgba8(rgba).to_rgb8();

    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
        .encode_image(&rgb)
        .context("Failed to encode JPEG")?;

    Ok(jpeg)
}

pub fn jpeg_data_url(jpeg: &[u8]) -> String {
    format!("data:image/jpeg;base64,{}", STANDARD.encode(jpeg))
}
