//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose one process-wide companion session to Dart via FRB.
//! - Flatten core types into plain envelopes the UI can render directly.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call fires timers already due before reading or mutating state.
//! - Errors surface as `ok = false` plus a human-readable message.

use elderease_core::{
    core_version as core_version_inner, day_heading, init_logging as init_logging_inner,
    ping as ping_inner, ChatRole, CompanionApp, FamilyMember, LogLevel, Notice,
    PreferenceKey, ProfilePatch, RoutineCategory, RoutineDraft, SimulationTimings, SystemClock,
    Tab, ToggleOutcome, VoiceSurface, VoiceTap, Weekday,
};
use log::warn;
use std::collections::BTreeSet;
use std::sync::{Mutex, MutexGuard, OnceLock};

static SESSION: OnceLock<Mutex<CompanionApp<SystemClock>>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Returns the default log level for current build mode.
///
/// - `debug` builds -> `debug`
/// - `release` builds -> `info`
#[flutter_rust_bridge::frb(sync)]
pub fn default_log_level() -> String {
    LogLevel::build_default().as_str().to_owned()
}

/// Generic action envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Action envelope for routine writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineActionResponse {
    pub ok: bool,
    /// Id of the created, updated or deleted routine.
    pub routine_id: Option<String>,
    pub message: String,
}

impl RoutineActionResponse {
    fn success(message: impl Into<String>, routine_id: String) -> Self {
        Self {
            ok: true,
            routine_id: Some(routine_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            routine_id: None,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderItem {
    pub id: String,
    pub title: String,
    pub time: String,
    /// `medication|appointment|activity|meal`.
    pub category: String,
    pub description: Option<String>,
    pub completed: bool,
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatItem {
    pub id: i64,
    /// `user|assistant`.
    pub role: String,
    pub content: String,
    pub timestamp_ms: i64,
    pub is_voice: bool,
    /// True for the assistant message currently being "spoken".
    pub is_speaking: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceStateItem {
    pub ok: bool,
    /// `dashboard|chat`; empty when the surface name was not recognized.
    pub surface: String,
    pub listening: bool,
    pub speaking: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyMemberItem {
    pub id: String,
    pub name: String,
    pub relationship: String,
    pub phone: String,
    pub email: Option<String>,
    pub avatar: Option<String>,
    pub is_primary: bool,
    /// Whether the open alert dialog has this member selected.
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileItem {
    pub name: String,
    pub age: u32,
    pub avatar: Option<String>,
    pub voice_enabled: bool,
    pub large_text: bool,
    pub high_contrast: bool,
    pub reminder_sound: bool,
    pub emergency_contacts: Vec<FamilyMemberItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertStatusItem {
    /// `closed|selecting|sending|sent`.
    pub phase: String,
    pub selected_ids: Vec<String>,
    pub can_send: bool,
    pub confirmation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutineItem {
    pub id: String,
    pub title: String,
    pub time: String,
    /// `medication|exercise|meal|sleep|social|appointment|activity|other`.
    pub category: String,
    pub icon: String,
    /// Weekday indices, `0 = Sun .. 6 = Sat`, ascending.
    pub days: Vec<u8>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleResponse {
    pub ok: bool,
    /// `Today` or the three-letter weekday label.
    pub heading: String,
    pub items: Vec<RoutineItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardItem {
    pub greeting: String,
    pub first_name: String,
    pub remaining: u32,
    pub completed: u32,
    pub next_reminder: Option<ReminderItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeItem {
    pub title: String,
    pub description: String,
}

#[flutter_rust_bridge::frb(sync)]
pub fn tab_select(tab: String) -> ActionResponse {
    match Tab::parse(&tab) {
        Some(parsed) => with_session(|app| {
            app.select_tab(parsed);
            ActionResponse::success(format!("Tab `{}` selected.", parsed.as_str()))
        }),
        None => ActionResponse::failure(format!("tab_select failed: unknown tab `{tab}`")),
    }
}

/// Currently selected bottom tab (`home|chat|schedule|settings`).
#[flutter_rust_bridge::frb(sync)]
pub fn tab_active() -> String {
    with_session(|app| app.active_tab().as_str().to_string())
}

#[flutter_rust_bridge::frb(sync)]
pub fn dashboard_summary() -> DashboardItem {
    with_session(|app| {
        let summary = app.dashboard();
        DashboardItem {
            greeting: summary.greeting.text().to_string(),
            first_name: summary.first_name,
            remaining: summary.remaining as u32,
            completed: summary.completed as u32,
            next_reminder: summary.next_reminder.as_ref().map(to_reminder_item),
        }
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn reminders_list() -> Vec<ReminderItem> {
    with_session(|app| app.reminders().iter().map(to_reminder_item).collect())
}

/// Flips completion for one reminder.
///
/// # FFI contract
/// - Unknown ids succeed without changing state.
/// - The completion acknowledgment is also queued for `notices_drain`.
#[flutter_rust_bridge::frb(sync)]
pub fn reminder_toggle(id: String) -> ActionResponse {
    with_session(|app| match app.toggle_reminder(id.trim()) {
        ToggleOutcome::Completed(notice) => ActionResponse::success(notice.description),
        ToggleOutcome::Reopened => ActionResponse::success("Reminder reopened."),
        ToggleOutcome::Unknown => ActionResponse::success("No matching reminder."),
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn chat_messages() -> Vec<ChatItem> {
    with_session(|app| {
        let speaking_id = app.speaking_message_id();
        app.messages()
            .iter()
            .map(|message| ChatItem {
                id: message.id,
                role: role_label(message.role).to_string(),
                content: message.content.clone(),
                timestamp_ms: message.timestamp_ms,
                is_voice: message.is_voice,
                is_speaking: speaking_id == Some(message.id),
            })
            .collect()
    })
}

/// Sends typed text; the assistant reply arrives after the reply delay.
#[flutter_rust_bridge::frb(sync)]
pub fn chat_send(text: String) -> ActionResponse {
    with_session(|app| match app.send_message(&text, false) {
        Ok(id) => ActionResponse::success(format!("Message {id} sent.")),
        Err(err) => ActionResponse::failure(format!("chat_send failed: {err}")),
    })
}

/// Taps the voice button on `surface` (`dashboard|home|chat`).
#[flutter_rust_bridge::frb(sync)]
pub fn voice_tap(surface: String) -> VoiceStateItem {
    let Some(parsed) = VoiceSurface::parse(&surface) else {
        return unknown_surface(&surface);
    };
    with_session(|app| {
        let message = match app.tap_voice(parsed) {
            VoiceTap::Started => "Listening...",
            VoiceTap::Stopped => "Stopped listening.",
        };
        voice_state_item(app, parsed, message)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn voice_state(surface: String) -> VoiceStateItem {
    let Some(parsed) = VoiceSurface::parse(&surface) else {
        return unknown_surface(&surface);
    };
    with_session(|app| voice_state_item(app, parsed, ""))
}

/// Family list for the alert dialog, with the current selection.
#[flutter_rust_bridge::frb(sync)]
pub fn family_members_list() -> Vec<FamilyMemberItem> {
    with_session(|app| {
        let alert = app.alert();
        app.family_members()
            .iter()
            .map(|member| to_family_member_item(member, alert.is_selected(&member.id)))
            .collect()
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn alert_open() -> AlertStatusItem {
    with_session(|app| {
        app.open_alert();
        alert_status_item(app)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn alert_toggle_member(member_id: String) -> ActionResponse {
    with_session(|app| match app.toggle_alert_member(member_id.trim()) {
        Ok(true) => ActionResponse::success("Member selected."),
        Ok(false) => ActionResponse::success("Member deselected."),
        Err(err) => ActionResponse::failure(format!("alert_toggle_member failed: {err}")),
    })
}

/// Starts simulated delivery. Poll `alert_status` for the confirmation.
#[flutter_rust_bridge::frb(sync)]
pub fn alert_send() -> ActionResponse {
    with_session(|app| match app.send_alert() {
        Ok(count) => ActionResponse::success(format!("Sending alert to {count}...")),
        Err(err) => ActionResponse::failure(format!("alert_send failed: {err}")),
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn alert_close() -> AlertStatusItem {
    with_session(|app| {
        app.close_alert();
        alert_status_item(app)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn alert_status() -> AlertStatusItem {
    with_session(|app| alert_status_item(app))
}

/// Routines for `weekday_index` (`0 = Sun .. 6 = Sat`) in time order.
#[flutter_rust_bridge::frb(sync)]
pub fn schedule_for_day(weekday_index: u8) -> ScheduleResponse {
    let Some(day) = Weekday::from_index(weekday_index) else {
        return ScheduleResponse {
            ok: false,
            heading: String::new(),
            items: Vec::new(),
            message: format!("schedule_for_day failed: weekday index {weekday_index} is out of range"),
        };
    };

    with_session(|app| {
        let items = app
            .routines_for(day)
            .into_iter()
            .map(|routine| RoutineItem {
                id: routine.id.clone(),
                title: routine.title.clone(),
                time: routine.time.clone(),
                category: routine.category.as_str().to_string(),
                icon: routine.category.icon().to_string(),
                days: routine.days.iter().map(|day| day.index()).collect(),
                notes: routine.notes.clone(),
            })
            .collect::<Vec<_>>();
        let message = if items.is_empty() {
            "No routines for this day".to_string()
        } else {
            format!("{} routine(s).", items.len())
        };
        ScheduleResponse {
            ok: true,
            heading: day_heading(day, app.today()).to_string(),
            items,
            message,
        }
    })
}

/// Adds a routine.
///
/// Input semantics:
/// - `days`: weekday indices, `0 = Sun .. 6 = Sat`; at least one.
/// - `time`: zero-padded 24-hour `HH:MM`.
/// - `category`: one of the routine category names.
///
/// # FFI contract
/// - Returns the new routine id on success.
#[flutter_rust_bridge::frb(sync)]
pub fn routine_create(
    title: String,
    time: String,
    days: Vec<u8>,
    category: String,
    notes: Option<String>,
) -> RoutineActionResponse {
    let draft = match build_routine_draft(title, time, &days, &category, notes) {
        Ok(draft) => draft,
        Err(message) => {
            return RoutineActionResponse::failure(format!("routine_create failed: {message}"));
        }
    };
    with_session(|app| match app.create_routine(draft) {
        Ok(id) => RoutineActionResponse::success("Routine added.", id),
        Err(err) => RoutineActionResponse::failure(format!("routine_create failed: {err}")),
    })
}

/// Replaces every field of routine `id`; same input rules as `routine_create`.
#[flutter_rust_bridge::frb(sync)]
pub fn routine_update(
    id: String,
    title: String,
    time: String,
    days: Vec<u8>,
    category: String,
    notes: Option<String>,
) -> RoutineActionResponse {
    let draft = match build_routine_draft(title, time, &days, &category, notes) {
        Ok(draft) => draft,
        Err(message) => {
            return RoutineActionResponse::failure(format!("routine_update failed: {message}"));
        }
    };
    let id = id.trim().to_string();
    with_session(|app| match app.update_routine(&id, draft) {
        Ok(()) => RoutineActionResponse::success("Routine updated.", id.clone()),
        Err(err) => RoutineActionResponse::failure(format!("routine_update failed: {err}")),
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn routine_delete(id: String) -> RoutineActionResponse {
    with_session(|app| match app.delete_routine(id.trim()) {
        Ok(routine) => RoutineActionResponse::success("Routine deleted.", routine.id),
        Err(err) => RoutineActionResponse::failure(format!("routine_delete failed: {err}")),
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn profile_get() -> ProfileItem {
    with_session(|app| {
        let profile = app.profile();
        ProfileItem {
            name: profile.name.clone(),
            age: profile.age,
            avatar: profile.avatar.clone(),
            voice_enabled: profile.preferences.voice_enabled,
            large_text: profile.preferences.large_text,
            high_contrast: profile.preferences.high_contrast,
            reminder_sound: profile.preferences.reminder_sound,
            emergency_contacts: profile
                .emergency_contacts
                .iter()
                .map(|member| to_family_member_item(member, false))
                .collect(),
        }
    })
}

/// Patches profile fields; `None` keeps the current value.
///
/// # FFI contract
/// - `clear_avatar = true` removes the avatar and wins over `avatar`.
/// - A blank `name` is rejected without applying any field.
#[flutter_rust_bridge::frb(sync)]
pub fn profile_update(
    name: Option<String>,
    age: Option<u32>,
    avatar: Option<String>,
    clear_avatar: bool,
) -> ActionResponse {
    let name = name.map(|value| value.trim().to_string());
    if name.as_deref() == Some("") {
        return ActionResponse::failure("profile_update failed: name must not be empty");
    }
    let avatar = if clear_avatar { Some(None) } else { avatar.map(Some) };
    let patch = ProfilePatch {
        name,
        age,
        avatar,
        preferences: None,
    };
    with_session(|app| {
        app.update_profile(&patch);
        ActionResponse::success(Notice::settings_saved().description)
    })
}

/// Flips one preference (`voice_enabled|large_text|high_contrast|reminder_sound`).
#[flutter_rust_bridge::frb(sync)]
pub fn preference_toggle(key: String) -> ActionResponse {
    let Some(parsed) = PreferenceKey::parse(&key) else {
        return ActionResponse::failure(format!("preference_toggle failed: unknown key `{key}`"));
    };
    with_session(|app| {
        let value = app.toggle_preference(parsed);
        ActionResponse::success(format!("{}={value}", parsed.as_str()))
    })
}

/// Takes queued acknowledgments for toast display.
#[flutter_rust_bridge::frb(sync)]
pub fn notices_drain() -> Vec<NoticeItem> {
    with_session(|app| {
        app.drain_notices()
            .into_iter()
            .map(|notice| NoticeItem {
                title: notice.title,
                description: notice.description,
            })
            .collect()
    })
}

fn with_session<T>(f: impl FnOnce(&mut CompanionApp<SystemClock>) -> T) -> T {
    let mut guard = lock_session();
    guard.tick();
    f(&mut guard)
}

fn lock_session() -> MutexGuard<'static, CompanionApp<SystemClock>> {
    SESSION
        .get_or_init(|| Mutex::new(CompanionApp::new(SystemClock, resolve_timings())))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn resolve_timings() -> SimulationTimings {
    SimulationTimings::from_env().unwrap_or_else(|err| {
        warn!("event=session_config module=ffi status=fallback error={err}");
        SimulationTimings::default()
    })
}

fn voice_state_item(
    app: &CompanionApp<SystemClock>,
    surface: VoiceSurface,
    message: &str,
) -> VoiceStateItem {
    let session = app.voice(surface);
    VoiceStateItem {
        ok: true,
        surface: session.surface().as_str().to_string(),
        listening: session.is_listening(),
        speaking: session.is_speaking(),
        message: message.to_string(),
    }
}

fn unknown_surface(surface: &str) -> VoiceStateItem {
    VoiceStateItem {
        ok: false,
        surface: String::new(),
        listening: false,
        speaking: false,
        message: format!("unknown voice surface `{surface}`"),
    }
}

fn alert_status_item(app: &CompanionApp<SystemClock>) -> AlertStatusItem {
    let alert = app.alert();
    AlertStatusItem {
        phase: alert.phase().as_str().to_string(),
        selected_ids: alert.selected().to_vec(),
        can_send: alert.can_send(),
        confirmation: alert.confirmation_text(),
    }
}

fn role_label(role: ChatRole) -> &'static str {
    match role {
        ChatRole::User => "user",
        ChatRole::Assistant => "assistant",
    }
}

fn build_routine_draft(
    title: String,
    time: String,
    days: &[u8],
    category: &str,
    notes: Option<String>,
) -> Result<RoutineDraft, String> {
    let category = RoutineCategory::parse(category)
        .ok_or_else(|| format!("unknown routine category `{category}`"))?;
    let days = days
        .iter()
        .map(|index| {
            Weekday::from_index(*index)
                .ok_or_else(|| format!("weekday index {index} is out of range"))
        })
        .collect::<Result<BTreeSet<_>, _>>()?;
    Ok(RoutineDraft {
        title,
        time,
        days,
        category,
        notes,
    })
}

fn to_family_member_item(member: &FamilyMember, selected: bool) -> FamilyMemberItem {
    FamilyMemberItem {
        id: member.id.clone(),
        name: member.name.clone(),
        relationship: member.relationship.clone(),
        phone: member.phone.clone(),
        email: member.email.clone(),
        avatar: member.avatar.clone(),
        is_primary: member.is_primary,
        selected,
    }
}

fn to_reminder_item(reminder: &elderease_core::Reminder) -> ReminderItem {
    ReminderItem {
        id: reminder.id.clone(),
        title: reminder.title.clone(),
        time: reminder.time.clone(),
        category: reminder.category.as_str().to_string(),
        description: reminder.description.clone(),
        completed: reminder.completed,
        icon: reminder.icon.clone(),
    }
}
