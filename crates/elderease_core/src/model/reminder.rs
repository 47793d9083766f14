//! Reminder domain model.
//!
//! # Responsibility
//! - Define the task/medication/event record shown on the dashboard.
//!
//! # Invariants
//! - `completed` is the only field mutated after seeding.

use serde::{Deserialize, Serialize};

/// Stable identifier for one reminder.
pub type ReminderId = String;

/// Reminder category used for grouping and iconography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderCategory {
    Medication,
    Appointment,
    Activity,
    Meal,
}

impl ReminderCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Medication => "medication",
            Self::Appointment => "appointment",
            Self::Activity => "activity",
            Self::Meal => "meal",
        }
    }
}

/// One scheduled item with a completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub title: String,
    /// Display string such as `8:00 AM`; never parsed.
    pub time: String,
    /// Serialized as `type` to match the UI schema naming.
    #[serde(rename = "type")]
    pub category: ReminderCategory,
    pub description: Option<String>,
    pub completed: bool,
    pub icon: Option<String>,
}

impl Reminder {
    /// Creates an incomplete reminder without description or icon.
    pub fn new(
        id: impl Into<ReminderId>,
        title: impl Into<String>,
        time: impl Into<String>,
        category: ReminderCategory,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            time: time.into(),
            category,
            description: None,
            completed: false,
            icon: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }

    /// Flips completion and returns the new state.
    pub fn toggle_completed(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::{Reminder, ReminderCategory};

    #[test]
    fn toggle_completed_flips_and_reports_new_state() {
        let mut reminder = Reminder::new("r1", "Lunch", "12:00 PM", ReminderCategory::Meal);
        assert!(reminder.toggle_completed());
        assert!(reminder.completed);
        assert!(!reminder.toggle_completed());
        assert!(!reminder.completed);
    }
}
