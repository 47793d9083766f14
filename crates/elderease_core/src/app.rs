//! Application state container and event dispatch.
//!
//! # Responsibility
//! - Own every piece of UI-visible state behind one explicit struct.
//! - Turn user actions into state transitions and simulated-latency timers.
//! - Fire due timers against an injected `Clock` so time can be virtual.
//!
//! # Invariants
//! - All mutation goes through `&mut self`; callers serialize access.
//! - Timer handlers run with the timer deadline as their "now".
//! - Acknowledgments are queued, never delivered twice.

use crate::clock::{Clock, LocalZone};
use crate::config::SimulationTimings;
use crate::model::chat::{ChatMessage, ChatRole, MessageId};
use crate::model::family::FamilyMember;
use crate::model::notice::Notice;
use crate::model::profile::{PreferenceKey, ProfilePatch, UserProfile};
use crate::model::reminder::Reminder;
use crate::model::routine::{DailyRoutine, RoutineId, Weekday};
use crate::responder::{classify, ResponseIntent};
use crate::scheduler::{FiredTimer, TimerQueue};
use crate::seed;
use crate::service::alert_service::{AlertError, EmergencyAlert};
use crate::service::chat_service::{validate_outgoing, ChatError, Conversation};
use crate::service::profile_service::ProfileSettings;
use crate::service::reminder_service::{ReminderBoard, ToggleOutcome};
use crate::service::schedule_service::{RoutineBook, RoutineDraft, RoutineResult};
use crate::service::voice::{VoiceSession, VoiceSurface, VoiceTap};
use chrono::{Datelike, NaiveDateTime, Timelike};
use log::{debug, info};
use std::collections::VecDeque;

/// Text sent on behalf of the user when a chat listening window is closed by tap.
pub const SIMULATED_VOICE_PROMPT: &str = "What's on my schedule today?";

/// Bottom navigation tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Tab {
    #[default]
    Home,
    Chat,
    Schedule,
    Settings,
}

impl Tab {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Chat => "chat",
            Self::Schedule => "schedule",
            Self::Settings => "settings",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "home" => Some(Self::Home),
            "chat" => Some(Self::Chat),
            "schedule" => Some(Self::Schedule),
            "settings" => Some(Self::Settings),
            _ => None,
        }
    }
}

/// Time-of-day greeting on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Greeting {
    Morning,
    Afternoon,
    Evening,
}

impl Greeting {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=11 => Self::Morning,
            12..=16 => Self::Afternoon,
            _ => Self::Evening,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Self::Morning => "Good morning",
            Self::Afternoon => "Good afternoon",
            Self::Evening => "Good evening",
        }
    }
}

/// Home tab projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub greeting: Greeting,
    pub first_name: String,
    pub remaining: usize,
    pub completed: usize,
    pub next_reminder: Option<Reminder>,
}

/// Seedable application state, injected into `CompanionApp`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub reminders: Vec<Reminder>,
    pub family: Vec<FamilyMember>,
    pub messages: Vec<ChatMessage>,
    pub profile: UserProfile,
    pub routines: Vec<DailyRoutine>,
}

impl AppState {
    /// Built-in seed data with chat history relative to `now_ms`.
    pub fn seeded(now_ms: i64) -> Self {
        Self {
            reminders: seed::seed_reminders(),
            family: seed::seed_family_members(),
            messages: seed::seed_chat_history(now_ms),
            profile: seed::seed_profile(),
            routines: seed::seed_routines(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerEvent {
    ListenTimeout(VoiceSurface),
    AssistantReply(ResponseIntent),
    SpeakingStart(VoiceSurface),
    SpeakingEnd(VoiceSurface),
    AlertDelivered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct VoiceSessions {
    dashboard: VoiceSession,
    chat: VoiceSession,
}

impl VoiceSessions {
    fn get(&self, surface: VoiceSurface) -> &VoiceSession {
        match surface {
            VoiceSurface::Dashboard => &self.dashboard,
            VoiceSurface::Chat => &self.chat,
        }
    }

    fn get_mut(&mut self, surface: VoiceSurface) -> &mut VoiceSession {
        match surface {
            VoiceSurface::Dashboard => &mut self.dashboard,
            VoiceSurface::Chat => &mut self.chat,
        }
    }
}

/// Companion app controller: state, timers and use-case entry points.
pub struct CompanionApp<C: Clock> {
    clock: C,
    timings: SimulationTimings,
    zone: LocalZone,
    timers: TimerQueue<TimerEvent>,
    reminders: ReminderBoard,
    family: Vec<FamilyMember>,
    conversation: Conversation,
    settings: ProfileSettings,
    routines: RoutineBook,
    voices: VoiceSessions,
    alert: EmergencyAlert,
    active_tab: Tab,
    notices: VecDeque<Notice>,
}

impl<C: Clock> CompanionApp<C> {
    /// Creates an app over the built-in seed data.
    pub fn new(clock: C, timings: SimulationTimings) -> Self {
        let state = AppState::seeded(clock.now_ms());
        Self::from_state(clock, timings, state)
    }

    pub fn from_state(clock: C, timings: SimulationTimings, state: AppState) -> Self {
        info!(
            "event=app_session_start module=app status=ok reminders={} family={} messages={} routines={}",
            state.reminders.len(),
            state.family.len(),
            state.messages.len(),
            state.routines.len()
        );
        Self {
            clock,
            timings,
            zone: LocalZone::default(),
            timers: TimerQueue::new(),
            reminders: ReminderBoard::new(state.reminders),
            family: state.family,
            conversation: Conversation::new(state.messages),
            settings: ProfileSettings::new(state.profile),
            routines: RoutineBook::new(state.routines),
            voices: VoiceSessions {
                dashboard: VoiceSession::new(VoiceSurface::Dashboard),
                chat: VoiceSession::new(VoiceSurface::Chat),
            },
            alert: EmergencyAlert::new(),
            active_tab: Tab::default(),
            notices: VecDeque::new(),
        }
    }

    /// Sets the zone used for greeting and "today". Defaults to the device zone.
    pub fn with_zone(mut self, zone: LocalZone) -> Self {
        self.zone = zone;
        self
    }

    pub fn zone(&self) -> LocalZone {
        self.zone
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn timings(&self) -> &SimulationTimings {
        &self.timings
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn select_tab(&mut self, tab: Tab) {
        debug!("event=tab_select module=app status=ok tab={}", tab.as_str());
        self.active_tab = tab;
    }

    /// Fires every timer due at the clock's current instant.
    ///
    /// Timers scheduled by handlers fire in the same call when already due.
    /// Returns the number of timers fired.
    pub fn tick(&mut self) -> usize {
        let now_ms = self.clock.now_ms();
        let mut fired = 0;
        while let Some(timer) = self.timers.pop_due(now_ms) {
            fired += 1;
            self.handle_timer(timer);
        }
        fired
    }

    pub fn next_timer_due_ms(&self) -> Option<i64> {
        self.timers.next_due_ms()
    }

    pub fn pending_timer_count(&self) -> usize {
        self.timers.len()
    }

    fn handle_timer(&mut self, timer: FiredTimer<TimerEvent>) {
        let FiredTimer { id, due_ms, event } = timer;
        match event {
            TimerEvent::ListenTimeout(surface) => {
                if self.voices.get_mut(surface).expire_listening(id) {
                    debug!(
                        "event=voice_listen_end module=voice status=ok surface={} reason=timeout",
                        surface.as_str()
                    );
                    if surface == VoiceSurface::Dashboard {
                        self.notices.push_back(Notice::voice_command_received());
                    }
                }
            }
            TimerEvent::AssistantReply(intent) => {
                let message_id = self.conversation.append(
                    ChatRole::Assistant,
                    intent.response(),
                    false,
                    due_ms,
                );
                info!(
                    "event=chat_reply module=chat status=ok id={message_id} intent={}",
                    intent.as_str()
                );
            }
            TimerEvent::SpeakingStart(surface) => {
                if self.voices.get_mut(surface).take_pending_speech(id) {
                    let end = self.timers.schedule_after(
                        due_ms,
                        self.timings.speaking_duration_ms,
                        TimerEvent::SpeakingEnd(surface),
                    );
                    if let Some(superseded) = self.voices.get_mut(surface).begin_speaking(end) {
                        self.timers.cancel(superseded);
                    }
                }
            }
            TimerEvent::SpeakingEnd(surface) => {
                self.voices.get_mut(surface).end_speaking(id);
            }
            TimerEvent::AlertDelivered => {
                self.alert.complete_delivery(id);
            }
        }
    }

    /// Takes every queued acknowledgment, oldest first.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    pub fn reminders(&self) -> &[Reminder] {
        self.reminders.list()
    }

    /// Flips completion; queues the acknowledgment on incomplete -> complete.
    pub fn toggle_reminder(&mut self, id: &str) -> ToggleOutcome {
        let outcome = self.reminders.toggle(id);
        if let Some(notice) = outcome.notice() {
            self.notices.push_back(notice.clone());
        }
        outcome
    }

    pub fn dashboard(&self) -> DashboardSummary {
        DashboardSummary {
            greeting: Greeting::from_hour(self.local_now().hour()),
            first_name: self.settings.profile().first_name().to_string(),
            remaining: self.reminders.remaining_count(),
            completed: self.reminders.completed_count(),
            next_reminder: self.reminders.next_pending().cloned(),
        }
    }

    fn local_now(&self) -> NaiveDateTime {
        self.zone.local_datetime(self.clock.now_ms())
    }

    pub fn messages(&self) -> &[ChatMessage] {
        self.conversation.messages()
    }

    /// Appends the user message now and schedules the assistant reply.
    pub fn send_message(&mut self, text: &str, is_voice: bool) -> Result<MessageId, ChatError> {
        validate_outgoing(text)?;
        let now_ms = self.clock.now_ms();
        let id = self
            .conversation
            .append(ChatRole::User, text, is_voice, now_ms);
        let intent = classify(text);
        self.timers.schedule_after(
            now_ms,
            self.timings.reply_delay_ms,
            TimerEvent::AssistantReply(intent),
        );
        info!(
            "event=chat_send module=chat status=ok id={id} voice={is_voice} intent={}",
            intent.as_str()
        );
        Ok(id)
    }

    /// Assistant message currently being "spoken" on the chat surface.
    pub fn speaking_message_id(&self) -> Option<MessageId> {
        if !self.voices.chat.is_speaking() {
            return None;
        }
        self.conversation
            .last()
            .filter(|message| message.role == ChatRole::Assistant)
            .map(|message| message.id)
    }

    pub fn voice(&self, surface: VoiceSurface) -> &VoiceSession {
        self.voices.get(surface)
    }

    /// Handles one voice-button tap on `surface`.
    ///
    /// A tap while idle opens a listening window that closes by itself. A tap
    /// while listening closes it early and cancels the auto-stop; on chat it
    /// also sends the simulated voice prompt and arms a speaking pulse.
    pub fn tap_voice(&mut self, surface: VoiceSurface) -> VoiceTap {
        let now_ms = self.clock.now_ms();

        if !self.voices.get(surface).is_listening() {
            let window_ms = match surface {
                VoiceSurface::Dashboard => self.timings.dashboard_listen_window_ms,
                VoiceSurface::Chat => self.timings.chat_listen_window_ms,
            };
            let auto_stop =
                self.timers
                    .schedule_after(now_ms, window_ms, TimerEvent::ListenTimeout(surface));
            if let Some(stale) = self.voices.get_mut(surface).start_listening(auto_stop) {
                self.timers.cancel(stale);
            }
            debug!(
                "event=voice_listen_start module=voice status=ok surface={}",
                surface.as_str()
            );
            return VoiceTap::Started;
        }

        if let Some(auto_stop) = self.voices.get_mut(surface).stop_listening() {
            self.timers.cancel(auto_stop);
        }
        debug!(
            "event=voice_listen_end module=voice status=ok surface={} reason=tap",
            surface.as_str()
        );

        match surface {
            VoiceSurface::Dashboard => {
                self.notices.push_back(Notice::voice_command_received());
            }
            VoiceSurface::Chat => {
                if let Err(err) = self.send_message(SIMULATED_VOICE_PROMPT, true) {
                    debug!("event=voice_prompt module=voice status=error error={err}");
                }
                let start = self.timers.schedule_after(
                    now_ms,
                    self.timings.speaking_delay_ms,
                    TimerEvent::SpeakingStart(surface),
                );
                if let Some(superseded) = self.voices.chat.queue_speech(start) {
                    self.timers.cancel(superseded);
                }
            }
        }
        VoiceTap::Stopped
    }

    pub fn family_members(&self) -> &[FamilyMember] {
        &self.family
    }

    pub fn alert(&self) -> &EmergencyAlert {
        &self.alert
    }

    pub fn open_alert(&mut self) {
        self.alert.open();
    }

    pub fn toggle_alert_member(&mut self, member_id: &str) -> Result<bool, AlertError> {
        self.alert.toggle_member(member_id, &self.family)
    }

    /// Starts the simulated delivery; completes after the send delay.
    pub fn send_alert(&mut self) -> Result<usize, AlertError> {
        let now_ms = self.clock.now_ms();
        let delay_ms = self.timings.alert_send_delay_ms;
        let timers = &mut self.timers;
        self.alert
            .begin_send(|| timers.schedule_after(now_ms, delay_ms, TimerEvent::AlertDelivered))
    }

    /// Resets the dialog from any phase and drops a pending delivery.
    pub fn close_alert(&mut self) {
        if let Some(pending) = self.alert.close() {
            self.timers.cancel(pending);
            info!("event=alert_send module=alert status=cancelled");
        }
    }

    pub fn routines(&self) -> &[DailyRoutine] {
        self.routines.list()
    }

    pub fn routines_for(&self, day: Weekday) -> Vec<&DailyRoutine> {
        self.routines.for_weekday(day)
    }

    /// Local weekday at the clock's current instant.
    pub fn today(&self) -> Weekday {
        Weekday::from(self.local_now().weekday())
    }

    pub fn create_routine(&mut self, draft: RoutineDraft) -> RoutineResult<RoutineId> {
        self.routines.create(draft)
    }

    pub fn update_routine(&mut self, id: &str, draft: RoutineDraft) -> RoutineResult<()> {
        self.routines.update(id, draft)
    }

    pub fn delete_routine(&mut self, id: &str) -> RoutineResult<DailyRoutine> {
        self.routines.delete(id)
    }

    pub fn profile(&self) -> &UserProfile {
        self.settings.profile()
    }

    pub fn update_profile(&mut self, patch: &ProfilePatch) {
        let notice = self.settings.update(patch);
        self.notices.push_back(notice);
    }

    pub fn toggle_preference(&mut self, key: PreferenceKey) -> bool {
        let (value, notice) = self.settings.toggle_preference(key);
        self.notices.push_back(notice);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::{CompanionApp, Greeting, Tab};
    use crate::clock::{LocalZone, ManualClock};
    use crate::model::routine::Weekday;
    use crate::config::SimulationTimings;

    #[test]
    fn greeting_boundaries() {
        assert_eq!(Greeting::from_hour(0), Greeting::Morning);
        assert_eq!(Greeting::from_hour(11), Greeting::Morning);
        assert_eq!(Greeting::from_hour(12), Greeting::Afternoon);
        assert_eq!(Greeting::from_hour(16), Greeting::Afternoon);
        assert_eq!(Greeting::from_hour(17), Greeting::Evening);
        assert_eq!(Greeting::from_hour(23), Greeting::Evening);
    }

    #[test]
    fn tab_parse_round_trips_and_defaults_home() {
        for tab in [Tab::Home, Tab::Chat, Tab::Schedule, Tab::Settings] {
            assert_eq!(Tab::parse(tab.as_str()), Some(tab));
        }
        assert_eq!(Tab::parse("profile"), None);
        assert_eq!(Tab::default(), Tab::Home);
    }

    #[test]
    fn dashboard_uses_local_hour_and_first_name() {
        // 1970-01-01T09:00Z
        let clock = ManualClock::new(9 * 3_600_000);
        let app = CompanionApp::new(clock, SimulationTimings::default()).with_zone(LocalZone::utc());
        assert_eq!(app.dashboard().greeting, Greeting::Morning);
        assert_eq!(app.dashboard().first_name, "Margaret");

        let app = app.with_zone(LocalZone::from_utc_offset_minutes(8 * 60).expect("valid offset"));
        assert_eq!(app.dashboard().greeting, Greeting::Evening);
    }

    #[test]
    fn late_evening_west_of_utc_keeps_local_day_and_greeting() {
        // 2023-11-15T04:30Z is 23:30 on Tuesday at UTC-5.
        let clock = ManualClock::new(1_700_022_600_000);
        let zone = LocalZone::from_utc_offset_minutes(-5 * 60).expect("valid offset");
        let app = CompanionApp::new(clock, SimulationTimings::default()).with_zone(zone);

        assert_eq!(app.dashboard().greeting, Greeting::Evening);
        assert_eq!(app.today(), Weekday::Tue);
    }

    #[test]
    fn sessions_default_to_device_zone() {
        let app = CompanionApp::new(ManualClock::new(0), SimulationTimings::default());
        assert_eq!(app.zone(), LocalZone::System);
    }
}
