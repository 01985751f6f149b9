// Media storage - exam folders, snapshot and video files
use anyhow::{Context, Result};
use chrono::Local;
use std::path::{Path, PathBuf};

const UNNAMED_PATIENT: &str = "paciente";

/// Sanitize a filename to be safe for filesystem use
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Create `<base>/<patient>_<YYYY-MM-DD_HH-MM>` and return its path
pub fn create_exam_folder(base_path: &Path, patient_name: &str) -> Result<PathBuf> {
    let timestamp = Local::now().format("%Y-%m-%d_%H-%M").to_string();
    let mut sanitized_name = sanitize_filename(patient_name);
    if sanitized_name.is_empty() {
        sanitized_name = UNNAMED_PATIENT.to_string();
    }
    let exam_folder = base_path.join(format!("{}_{}", sanitized_name, timestamp));

    std::fs::create_dir_all(&exam_folder)
        .with_context(|| format!("Failed to create exam folder {}", exam_folder.display()))?;

    log::info!("Created exam folder: {}", exam_folder.display());

    Ok(exam_folder)
}

fn file_timestamp() -> String {
    Local::now().format("%Y%m%d_%H%M%S_%3f").to_string()
}

pub fn write_snapshot(folder: &Path, jpeg: &[u8]) -> Result<PathBuf> {
    let path = folder.join(format!("snapshot_{}.jpg", file_timestamp()));
    std::fs::write(&path, jpeg)
        .with_context(|| format!("Failed to write snapshot {}", path.display()))?;
    log::debug!("Snapshot written: {} ({} bytes)", path.display(), jpeg.len());
    Ok(path)
}

pub fn write_video(folder: &Path, webm: &[u8]) -> Result<PathBuf> {
    let path = folder.join(format!("video_{}.webm", file_timestamp()));
    std::fs::write(&path, webm)
        .with_context(|| format!("Failed to write video {}", path.display()))?;
    log::info!("Video written: {} ({} bytes)", path.display(), webm.len());
    Ok(path)
}

/// Remove a media file; a file that is already gone is not an error
pub fn remove_media_file(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("Maria/Silva: exame?"), "Maria_Silva_ exame_");
        assert_eq!(sanitize_filename("  João  "), "João");
    }

    #[test]
    fn test_create_exam_folder_naming() {
        let dir = tempdir().unwrap();
        let folder = create_exam_folder(dir.path(), "Ana Souza").unwrap();

        assert!(folder.is_dir());
        let name = folder.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("Ana Souza_"));
        // <name>_YYYY-MM-DD_HH-MM
        assert_eq!(name.len(), "Ana Souza_".len() + 16);
    }

    #[test]
    fn test_create_exam_folder_without_name() {
        let dir = tempdir().unwrap();
        let folder = create_exam_folder(dir.path(), "   ").unwrap();
        let name = folder.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("paciente_"));
    }

    #[test]
    fn test_write_and_remove_files() {
        let dir = tempdir().unwrap();

        let snapshot = write_snapshot(dir.path(), &[0xFF, 0xD8, 0xFF]).unwrap();
        assert!(snapshot.file_name().unwrap().to_string_lossy().starts_with("snapshot_"));
        assert_eq!(snapshot.extension().unwrap(), "jpg");

        let video = write_video(dir.path(), b"webm").unwrap();
        assert_eq!(video.extension().unwrap(), "webm");
        assert_eq!(std::fs::read(&video).unwrap(), b"webm");

        remove_media_file(&video).unwrap();
        assert!(!video.exists());
        remove_media_file(&video).unwrap();
    }
}
