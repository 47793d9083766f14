//! Simulated voice interaction state.
//!
//! # Responsibility
//! - Track the listening and speaking flags of one voice surface.
//! - Bind every window to the timer that ends it.
//!
//! # Invariants
//! - `listening` and `speaking` are independent.
//! - A timer only changes state while it is the session's current token, so
//!   a stale or superseded timer is ignored.

use crate::scheduler::TimerId;

/// Screen hosting a voice button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VoiceSurface {
    Dashboard,
    Chat,
}

impl VoiceSurface {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Chat => "chat",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "dashboard" | "home" => Some(Self::Dashboard),
            "chat" => Some(Self::Chat),
            _ => None,
        }
    }
}

/// Effect of one voice-button tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceTap {
    Started,
    Stopped,
}

/// Listening/speaking state for one surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSession {
    surface: VoiceSurface,
    listen_timer: Option<TimerId>,
    pending_speech: Option<TimerId>,
    speaking_timer: Option<TimerId>,
}

impl VoiceSession {
    pub fn new(surface: VoiceSurface) -> Self {
        Self {
            surface,
            listen_timer: None,
            pending_speech: None,
            speaking_timer: None,
        }
    }

    pub fn surface(&self) -> VoiceSurface {
        self.surface
    }

    pub fn is_listening(&self) -> bool {
        self.listen_timer.is_some()
    }

    pub fn is_speaking(&self) -> bool {
        self.speaking_timer.is_some()
    }

    /// Opens a listening window that `auto_stop` will close.
    ///
    /// Returns the auto-stop timer of a window that was still open.
    pub fn start_listening(&mut self, auto_stop: TimerId) -> Option<TimerId> {
        self.listen_timer.replace(auto_stop)
    }

    /// Closes the window early; returns the auto-stop timer to cancel.
    pub fn stop_listening(&mut self) -> Option<TimerId> {
        self.listen_timer.take()
    }

    /// Closes the window when `timer` is its current auto-stop.
    pub fn expire_listening(&mut self, timer: TimerId) -> bool {
        if self.listen_timer == Some(timer) {
            self.listen_timer = None;
            return true;
        }
        false
    }

    /// Arms a delayed speaking pulse; returns a superseded start timer.
    pub fn queue_speech(&mut self, start: TimerId) -> Option<TimerId> {
        self.pending_speech.replace(start)
    }

    /// Consumes the pending pulse when `timer` is its start timer.
    pub fn take_pending_speech(&mut self, timer: TimerId) -> bool {
        if self.pending_speech == Some(timer) {
            self.pending_speech = None;
            return true;
        }
        false
    }

    /// Starts speaking until `end`; returns a superseded end timer.
    pub fn begin_speaking(&mut self, end: TimerId) -> Option<TimerId> {
        self.speaking_timer.replace(end)
    }

    /// Stops speaking when `timer` is the current end timer.
    pub fn end_speaking(&mut self, timer: TimerId) -> bool {
        if self.speaking_timer == Some(timer) {
            self.speaking_timer = None;
            return true;
        }
        false
    }
}
