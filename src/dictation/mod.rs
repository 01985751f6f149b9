// Speech dictation into the findings field

pub mod commands;
pub mod session;

pub use session::{apply_results, DictationSession, DictationStatus, RecognitionResult};
