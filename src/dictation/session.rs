//! Dictation session
//!
//! Recognition runs in the webview. Results are forwarded here and only
//! final ones are appended to the findings text.

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const UNSUPPORTED_MESSAGE: &str = "Seu navegador não suporta reconhecimento de fala.";

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("Invalid regex")
});

/// One entry of a recognition result list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognitionResult {
    pub transcript: String,
    pub is_final: bool,
}

/// Recognizer configuration and listening flag for the webview
#[derive(Debug, Clone, Serialize)]
pub struct DictationStatus {
    pub listening: bool,
    pub locale: String,
    pub continuous: bool,
    pub interim_results: bool,
}

#[derive(Debug, Clone)]
pub struct DictationSession {
    listening: bool,
    locale: String,
}

impl DictationSession {
    pub fn new(locale: &str) -> Self {
        Self {
            listening: false,
            locale: locale.to_string(),
        }
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn set_locale(&mut self, locale: &str) {
        self.locale = locale.to_string();
    }

    /// Flip listening on or off. Fails without changing state when the
    /// platform has no speech recognition.
    pub fn toggle(&mut self, supported: bool) -> Result<bool> {
        if !supported {
            bail!(UNSUPPORTED_MESSAGE);
        }
        self.listening = !self.listening;
        log::info!(
            "Dictation {} ({})",
            if self.listening { "started" } else { "stopped" },
            self.locale
        );
        Ok(self.listening)
    }

    pub fn on_end(&mut self) {
        self.listening = false;
    }

    pub fn on_error(&mut self, error: &str) {
        log::error!("Speech recognition error: {}", error);
        self.listening = false;
    }

    pub fn status(&self) -> DictationStatus {
        DictationStatus {
            listening: self.listening,
            locale: self.locale.clone(),
            continuous: true,
            interim_results: true,
        }
    }
}

/// Append final results from `result_index` onward to `findings`.
/// Interim results are dropped.
pub fn apply_results(findings: &str, results: &[RecognitionResult], result_index: usize) -> String {
    results
        .iter()
        .skip(result_index)
        .filter(|result| result.is_final)
        .fold(findings.to_string(), |text, result| {
            WHITESPACE_RUN
                .replace_all(&format!("{} {}", text, result.transcript), " ")
                .into_owned()
        })
}
