// Report export: printable HTML and file output

pub mod commands;
pub mod html;

use anyhow::{Context, Result};
use std::path::Path;

use crate::report::ReportSession;

pub use html::{escape_html, render_report_html};

/// Render the report and write it to `path`, creating parent folders
pub fn export_report(session: &ReportSession, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }

    let html = render_report_html(session);
    std::fs::write(path, html)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;

    log::info!("Report exported to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::DoctorInfo;
    use tempfile::tempdir;

    #[test]
    fn test_export_report_writes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("laudos").join("laudo.html");
        let session = ReportSession::new(DoctorInfo::default());

        export_report(&session, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
        assert!(written.contains("VIDEO-ENDOSCOPIA NASOSSINUSAL"));
    }
}
