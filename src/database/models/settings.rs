// Database models - Settings
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::report::DoctorInfo;

pub const DEFAULT_DICTATION_LOCALE: &str = "pt-BR";
pub const DEFAULT_LLM_MODEL: &str = "gemini-2.5-flash";

/// Keys whose stored value never leaves the backend
pub const SECRET_SETTING_KEYS: &[&str] = &["gemini_api_key"];
pub const MASKED_VALUE: &str = "***";

/// A single setting stored in the database
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
    pub value_type: String,
    pub updated_at: String,
}

impl Setting {
    /// Same row with secret values replaced by `***`
    pub fn masked(mut self) -> Self {
        if SECRET_SETTING_KEYS.contains(&self.key.as_str()) && !self.value.is_empty() {
            self.value = MASKED_VALUE.to_string();
        }
        self
    }
}

/// All editor settings loaded at startup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorSettings {
    pub doctor: DoctorInfo,
    pub dictation_locale: String,
    pub media_folder: Option<String>,
    pub llm_model: String,
    /// Never sent back to the webview
    #[serde(skip_serializing, default)]
    pub gemini_api_key: Option<String>,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            doctor: DoctorInfo::default(),
            dictation_locale: DEFAULT_DICTATION_LOCALE.to_string(),
            media_folder: None,
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            gemini_api_key: None,
        }
    }
}

impl EditorSettings {
    /// Folder where exam media is written; falls back to `<videos>/EndoLaudo`
    pub fn media_root(&self) -> PathBuf {
        match &self.media_folder {
            Some(folder) if !folder.trim().is_empty() => PathBuf::from(folder),
            _ => default_media_folder(),
        }
    }
}

pub fn default_media_folder() -> PathBuf {
    dirs::video_dir()
        .or_else(dirs::data_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("EndoLaudo")
}
