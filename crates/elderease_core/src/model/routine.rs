//! Recurring daily routine model.
//!
//! # Responsibility
//! - Define weekly recurring activities rendered by the schedule tab.
//! - Validate routine shape before it enters the routine store.
//!
//! # Invariants
//! - `time` is a zero-padded 24-hour `HH:MM` string, so lexicographic order
//!   equals chronological order.
//! - `days` is never empty.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

static TIME_OF_DAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[01]\d|2[0-3]):[0-5]\d$").expect("valid time-of-day regex"));

/// Stable identifier for one routine.
pub type RoutineId = String;

/// Day of week, indexed `0 = Sun .. 6 = Sat`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Sun,
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Self::Sun,
        Self::Mon,
        Self::Tue,
        Self::Wed,
        Self::Thu,
        Self::Fri,
        Self::Sat,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// Three-letter label (`Sun`, `Mon`, ...).
    pub fn label(self) -> &'static str {
        match self {
            Self::Sun => "Sun",
            Self::Mon => "Mon",
            Self::Tue => "Tue",
            Self::Wed => "Wed",
            Self::Thu => "Thu",
            Self::Fri => "Fri",
            Self::Sat => "Sat",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|day| day.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Sun => Self::Sun,
            chrono::Weekday::Mon => Self::Mon,
            chrono::Weekday::Tue => Self::Tue,
            chrono::Weekday::Wed => Self::Wed,
            chrono::Weekday::Thu => Self::Thu,
            chrono::Weekday::Fri => Self::Fri,
            chrono::Weekday::Sat => Self::Sat,
        }
    }
}

/// Routine category, a superset of reminder categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutineCategory {
    Medication,
    Exercise,
    Meal,
    Sleep,
    Social,
    Appointment,
    Activity,
    Other,
}

impl RoutineCategory {
    pub const ALL: [RoutineCategory; 8] = [
        Self::Medication,
        Self::Exercise,
        Self::Meal,
        Self::Sleep,
        Self::Social,
        Self::Appointment,
        Self::Activity,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Medication => "medication",
            Self::Exercise => "exercise",
            Self::Meal => "meal",
            Self::Sleep => "sleep",
            Self::Social => "social",
            Self::Appointment => "appointment",
            Self::Activity => "activity",
            Self::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|category| category.as_str().eq_ignore_ascii_case(value))
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Medication => "💊",
            Self::Exercise => "🚶",
            Self::Meal => "🍽️",
            Self::Sleep => "😴",
            Self::Social => "👨‍👩‍👧‍👦",
            Self::Appointment => "🏥",
            Self::Activity => "⭐",
            Self::Other => "📌",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyRoutine {
    pub id: RoutineId,
    pub title: String,
    pub time: String,
    pub days: BTreeSet<Weekday>,
    /// Serialized as `type` to match the UI schema naming.
    #[serde(rename = "type")]
    pub category: RoutineCategory,
    pub notes: Option<String>,
}

/// Validation errors for routine writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutineValidationError {
    EmptyTitle,
    InvalidTime(String),
    NoDays,
}

impl Display for RoutineValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "routine title must not be empty"),
            Self::InvalidTime(value) => {
                write!(f, "routine time `{value}` must be a 24-hour HH:MM value")
            }
            Self::NoDays => write!(f, "routine must recur on at least one weekday"),
        }
    }
}

impl Error for RoutineValidationError {}

impl DailyRoutine {
    pub fn new(
        id: impl Into<RoutineId>,
        title: impl Into<String>,
        time: impl Into<String>,
        days: impl IntoIterator<Item = Weekday>,
        category: RoutineCategory,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            time: time.into(),
            days: days.into_iter().collect(),
            category,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn recurs_on(&self, day: Weekday) -> bool {
        self.days.contains(&day)
    }

    /// Checks title, time format and recurrence set.
    pub fn validate(&self) -> Result<(), RoutineValidationError> {
        if self.title.trim().is_empty() {
            return Err(RoutineValidationError::EmptyTitle);
        }
        if !is_valid_time_of_day(&self.time) {
            return Err(RoutineValidationError::InvalidTime(self.time.clone()));
        }
        if self.days.is_empty() {
            return Err(RoutineValidationError::NoDays);
        }
        Ok(())
    }
}

/// Returns true for zero-padded 24-hour `HH:MM` values.
pub fn is_valid_time_of_day(value: &str) -> bool {
    TIME_OF_DAY_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::{is_valid_time_of_day, DailyRoutine, RoutineCategory, RoutineValidationError, Weekday};

    #[test]
    fn weekday_index_and_label_are_consistent() {
        for (index, day) in Weekday::ALL.iter().enumerate() {
            assert_eq!(usize::from(day.index()), index);
            assert_eq!(Weekday::from_label(day.label()), Some(*day));
        }
        assert_eq!(Weekday::from_index(7), None);
        assert_eq!(Weekday::from_label("mon"), Some(Weekday::Mon));
    }

    #[test]
    fn category_names_parse_back() {
        for category in RoutineCategory::ALL {
            assert_eq!(RoutineCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(RoutineCategory::parse(" Social "), Some(RoutineCategory::Social));
        assert_eq!(RoutineCategory::parse("hobby"), None);
    }

    #[test]
    fn calendar_weekday_maps_onto_sunday_first_index() {
        let mut day = chrono::Weekday::Sun;
        for _ in 0..7 {
            let mapped = Weekday::from(day);
            assert_eq!(u32::from(mapped.index()), day.num_days_from_sunday());
            day = day.succ();
        }
    }

    #[test]
    fn time_of_day_requires_zero_padded_24_hour_values() {
        assert!(is_valid_time_of_day("08:00"));
        assert!(is_valid_time_of_day("23:59"));
        assert!(!is_valid_time_of_day("8:00"));
        assert!(!is_valid_time_of_day("24:00"));
        assert!(!is_valid_time_of_day("08:60"));
        assert!(!is_valid_time_of_day("8:00 AM"));
    }

    #[test]
    fn validate_reports_first_violation() {
        let routine = DailyRoutine::new("x", "  ", "08:00", [Weekday::Mon], RoutineCategory::Meal);
        assert_eq!(routine.validate(), Err(RoutineValidationError::EmptyTitle));

        let routine = DailyRoutine::new("x", "Walk", "7:30", [Weekday::Mon], RoutineCategory::Exercise);
        assert_eq!(
            routine.validate(),
            Err(RoutineValidationError::InvalidTime("7:30".to_string()))
        );

        let routine = DailyRoutine::new("x", "Walk", "07:30", [], RoutineCategory::Exercise);
        assert_eq!(routine.validate(), Err(RoutineValidationError::NoDays));
    }
}
