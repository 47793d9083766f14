//! Weekly routine schedule use-cases.
//!
//! # Responsibility
//! - Filter routines by weekday in time order.
//! - Create, update and delete routines with validation.
//!
//! # Invariants
//! - Filter output is non-decreasing by `time`; equal times keep store order.
//! - Every stored routine passes `DailyRoutine::validate()`.

use crate::model::routine::{
    DailyRoutine, RoutineCategory, RoutineId, RoutineValidationError, Weekday,
};
use log::info;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type RoutineResult<T> = Result<T, RoutineError>;

/// Routine store errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutineError {
    Validation(RoutineValidationError),
    NotFound(RoutineId),
}

impl Display for RoutineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "routine not found: {id}"),
        }
    }
}

impl Error for RoutineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<RoutineValidationError> for RoutineError {
    fn from(value: RoutineValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Input for routine create/update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineDraft {
    pub title: String,
    pub time: String,
    pub days: BTreeSet<Weekday>,
    pub category: RoutineCategory,
    pub notes: Option<String>,
}

impl RoutineDraft {
    fn into_routine(self, id: RoutineId) -> RoutineResult<DailyRoutine> {
        let notes = self
            .notes
            .map(|notes| notes.trim().to_string())
            .filter(|notes| !notes.is_empty());
        let routine = DailyRoutine {
            id,
            title: self.title.trim().to_string(),
            time: self.time.trim().to_string(),
            days: self.days,
            category: self.category,
            notes,
        };
        routine.validate()?;
        Ok(routine)
    }
}

/// In-memory routine store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutineBook {
    routines: Vec<DailyRoutine>,
}

impl RoutineBook {
    pub fn new(routines: Vec<DailyRoutine>) -> Self {
        Self { routines }
    }

    pub fn list(&self) -> &[DailyRoutine] {
        &self.routines
    }

    pub fn for_weekday(&self, day: Weekday) -> Vec<&DailyRoutine> {
        routines_for_weekday(&self.routines, day)
    }

    /// Stores a new routine under a generated id.
    pub fn create(&mut self, draft: RoutineDraft) -> RoutineResult<RoutineId> {
        let routine = draft.into_routine(Uuid::new_v4().to_string())?;
        let id = routine.id.clone();
        self.routines.push(routine);
        info!("event=routine_create module=schedule status=ok id={id}");
        Ok(id)
    }

    /// Replaces every field of routine `id` except the id itself.
    pub fn update(&mut self, id: &str, draft: RoutineDraft) -> RoutineResult<()> {
        let slot = self
            .routines
            .iter_mut()
            .find(|routine| routine.id == id)
            .ok_or_else(|| RoutineError::NotFound(id.to_string()))?;
        *slot = draft.into_routine(id.to_string())?;
        info!("event=routine_update module=schedule status=ok id={id}");
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> RoutineResult<DailyRoutine> {
        let position = self
            .routines
            .iter()
            .position(|routine| routine.id == id)
            .ok_or_else(|| RoutineError::NotFound(id.to_string()))?;
        info!("event=routine_delete module=schedule status=ok id={id}");
        Ok(self.routines.remove(position))
    }
}

/// Routines recurring on `day`, sorted by time of day.
pub fn routines_for_weekday(routines: &[DailyRoutine], day: Weekday) -> Vec<&DailyRoutine> {
    let mut matching = routines
        .iter()
        .filter(|routine| routine.recurs_on(day))
        .collect::<Vec<_>>();
    matching.sort_by(|left, right| left.time.cmp(&right.time));
    matching
}

/// `"Today"` for the current weekday, otherwise its label.
pub fn day_heading(selected: Weekday, today: Weekday) -> &'static str {
    if selected == today {
        "Today"
    } else {
        selected.label()
    }
}
