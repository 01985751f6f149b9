//! Keyboard shortcut classifier
//!
//! ArrowLeft takes a snapshot. ArrowRight is a hold gesture: a short press
//! starts or pauses/resumes recording, a long press stops it.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

pub const SNAPSHOT_KEY: &str = "ArrowLeft";
pub const VIDEO_KEY: &str = "ArrowRight";
pub const LONG_PRESS_THRESHOLD: Duration = Duration::from_millis(500);

/// Keyboard event forwarded by the webview
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: String,
    #[serde(default)]
    pub repeat: bool,
    /// The event target is a text input or textarea
    #[serde(default)]
    pub in_text_field: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ShortcutAction {
    None,
    Snapshot,
    StartRecording,
    TogglePause,
    StopRecording,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressKind {
    Short,
    Long,
}

impl PressKind {
    pub fn classify(held: Duration) -> Self {
        if held > LONG_PRESS_THRESHOLD {
            PressKind::Long
        } else {
            PressKind::Short
        }
    }
}

/// What the webview should do with the key event
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ShortcutOutcome {
    pub action: ShortcutAction,
    pub prevent_default: bool,
}

impl ShortcutOutcome {
    fn ignored() -> Self {
        Self { action: ShortcutAction::None, prevent_default: false }
    }

    fn handled(action: ShortcutAction) -> Self {
        Self { action, prevent_default: true }
    }
}

#[derive(Debug, Default)]
pub struct ShortcutClassifier {
    pressed_at: Option<Instant>,
}

impl ShortcutClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_armed(&self) -> bool {
        self.pressed_at.is_some()
    }

    pub fn key_down(&mut self, event: &KeyEvent, now: Instant) -> ShortcutOutcome {
        if event.in_text_field {
            return ShortcutOutcome::ignored();
        }

        match event.key.as_str() {
            SNAPSHOT_KEY => ShortcutOutcome::handled(ShortcutAction::Snapshot),
            VIDEO_KEY => {
                if !event.repeat {
                    self.pressed_at = Some(now);
                }
                ShortcutOutcome::handled(ShortcutAction::None)
            }
            _ => ShortcutOutcome::ignored(),
        }
    }

    /// `recording_active` is true while Recording or Paused
    pub fn key_up(
        &mut self,
        event: &KeyEvent,
        now: Instant,
        recording_active: bool,
    ) -> ShortcutOutcome {
        if event.in_text_field || event.key != VIDEO_KEY {
            return ShortcutOutcome::ignored();
        }
        let Some(pressed_at) = self.pressed_at.take() else {
            return ShortcutOutcome::ignored();
        };

        let held = now.saturating_duration_since(pressed_at);
        let action = match (PressKind::classify(held), recording_active) {
            (PressKind::Long, true) => ShortcutAction::StopRecording,
            (PressKind::Long, false) => ShortcutAction::None,
            (PressKind::Short, false) => ShortcutAction::StartRecording,
            (PressKind::Short, true) => ShortcutAction::TogglePause,
        };
        log::debug!("ArrowRight held {:?} -> {:?}", held, action);

        ShortcutOutcome::handled(action)
    }
}
