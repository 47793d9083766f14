//! Core state and rules for the ElderEase companion app.
//! This crate is the single source of truth for UI-visible state.

pub mod app;
pub mod clock;
pub mod config;
pub mod logging;
pub mod model;
pub mod responder;
pub mod scheduler;
pub mod seed;
pub mod service;

pub use app::{AppState, CompanionApp, DashboardSummary, Greeting, Tab, SIMULATED_VOICE_PROMPT};
pub use clock::{Clock, LocalZone, ManualClock, SystemClock};
pub use config::{ConfigError, SimulationTimings};
pub use logging::{init_logging, logging_status, LogLevel, LoggingError, LoggingStatus};
pub use model::chat::{ChatMessage, ChatRole, MessageId};
pub use model::family::{FamilyMember, FamilyMemberId};
pub use model::notice::Notice;
pub use model::profile::{PreferenceKey, Preferences, PreferencesPatch, ProfilePatch, UserProfile};
pub use model::reminder::{Reminder, ReminderCategory, ReminderId};
pub use model::routine::{
    DailyRoutine, RoutineCategory, RoutineId, RoutineValidationError, Weekday,
};
pub use responder::{classify, select_response, ResponseIntent};
pub use scheduler::{TimerId, TimerQueue};
pub use service::alert_service::{notified_text, AlertError, AlertPhase, EmergencyAlert};
pub use service::chat_service::ChatError;
pub use service::reminder_service::ToggleOutcome;
pub use service::schedule_service::{
    day_heading, routines_for_weekday, RoutineDraft, RoutineError, RoutineResult,
};
pub use service::voice::{VoiceSession, VoiceSurface, VoiceTap};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
