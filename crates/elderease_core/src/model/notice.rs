//! One-shot user-visible acknowledgments.
//!
//! The UI renders these as toasts; core only queues them.

use serde::{Deserialize, Serialize};

/// Short acknowledgment shown once and then discarded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub title: String,
    pub description: String,
}

impl Notice {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Emitted when a reminder moves from incomplete to complete.
    pub fn reminder_completed(title: &str) -> Self {
        Self::new("Well done! 💖", format!("You completed: {title}"))
    }

    /// Emitted when a dashboard listening window ends.
    pub fn voice_command_received() -> Self {
        Self::new("Voice command received 🎤", "Processing your request...")
    }

    /// Emitted after any profile or preference update.
    pub fn settings_saved() -> Self {
        Self::new("Settings updated 💖", "Your preferences have been saved.")
    }
}
