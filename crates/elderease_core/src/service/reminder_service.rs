//! Reminder board use-cases.
//!
//! # Responsibility
//! - Toggle reminder completion and produce the completion acknowledgment.
//! - Answer dashboard queries (counts, next pending).
//!
//! # Invariants
//! - An acknowledgment is produced iff a toggle goes incomplete -> complete.
//! - Unknown ids leave the board untouched and raise no error.

use crate::model::notice::Notice;
use crate::model::reminder::Reminder;
use log::{debug, info};

/// Result of one completion toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Reminder became complete; carries the acknowledgment to show.
    Completed(Notice),
    /// Reminder went back to incomplete.
    Reopened,
    /// No reminder with that id.
    Unknown,
}

impl ToggleOutcome {
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Self::Completed(notice) => Some(notice),
            Self::Reopened | Self::Unknown => None,
        }
    }
}

/// In-memory reminder collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderBoard {
    reminders: Vec<Reminder>,
}

impl ReminderBoard {
    pub fn new(reminders: Vec<Reminder>) -> Self {
        Self { reminders }
    }

    pub fn list(&self) -> &[Reminder] {
        &self.reminders
    }

    /// Flips completion for `id`.
    pub fn toggle(&mut self, id: &str) -> ToggleOutcome {
        let Some(reminder) = self.reminders.iter_mut().find(|reminder| reminder.id == id) else {
            debug!("event=reminder_toggle module=reminders status=skipped reason=unknown_id");
            return ToggleOutcome::Unknown;
        };

        let completed = reminder.toggle_completed();
        info!(
            "event=reminder_toggle module=reminders status=ok id={} completed={}",
            reminder.id, completed
        );
        if completed {
            ToggleOutcome::Completed(Notice::reminder_completed(&reminder.title))
        } else {
            ToggleOutcome::Reopened
        }
    }

    pub fn completed_count(&self) -> usize {
        self.reminders.iter().filter(|reminder| reminder.completed).count()
    }

    pub fn remaining_count(&self) -> usize {
        self.reminders.len() - self.completed_count()
    }

    /// First incomplete reminder in list order.
    pub fn next_pending(&self) -> Option<&Reminder> {
        self.reminders.iter().find(|reminder| !reminder.completed)
    }
}
