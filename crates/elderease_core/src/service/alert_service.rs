//! Emergency alert dialog flow.
//!
//! # Responsibility
//! - Track recipient selection and the simulated delivery phases.
//!
//! # Invariants
//! - Send is only possible with a non-empty selection while selecting.
//! - Close resets selection and phase from any phase.
//! - Only the delivery timer recorded at send time can complete the send.

use crate::model::family::{FamilyMember, FamilyMemberId};
use crate::scheduler::TimerId;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Dialog phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertPhase {
    Closed,
    Selecting,
    Sending,
    Sent { notified: usize },
}

impl AlertPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Selecting => "selecting",
            Self::Sending => "sending",
            Self::Sent { .. } => "sent",
        }
    }
}

/// Alert flow errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlertError {
    /// Operation requires the selecting phase.
    NotSelecting(AlertPhase),
    /// Member id is not in the family list.
    UnknownMember(FamilyMemberId),
    /// Send requested with an empty selection.
    NoRecipients,
}

impl Display for AlertError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotSelecting(phase) => {
                write!(f, "alert dialog is not selecting recipients (phase: {})", phase.as_str())
            }
            Self::UnknownMember(id) => write!(f, "family member not found: {id}"),
            Self::NoRecipients => write!(f, "select at least one family member to alert"),
        }
    }
}

impl Error for AlertError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmergencyAlert {
    phase: AlertPhase,
    selected: Vec<FamilyMemberId>,
    delivery_timer: Option<TimerId>,
}

impl Default for EmergencyAlert {
    fn default() -> Self {
        Self::new()
    }
}

impl EmergencyAlert {
    pub fn new() -> Self {
        Self {
            phase: AlertPhase::Closed,
            selected: Vec::new(),
            delivery_timer: None,
        }
    }

    pub fn phase(&self) -> AlertPhase {
        self.phase
    }

    /// Selected member ids in tap order.
    pub fn selected(&self) -> &[FamilyMemberId] {
        &self.selected
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.iter().any(|selected| selected == id)
    }

    /// Opens the dialog. Re-opening an open dialog keeps its state.
    pub fn open(&mut self) {
        if self.phase == AlertPhase::Closed {
            self.phase = AlertPhase::Selecting;
        }
    }

    /// Adds or removes `id`; returns whether it is now selected.
    pub fn toggle_member(
        &mut self,
        id: &str,
        family: &[FamilyMember],
    ) -> Result<bool, AlertError> {
        if self.phase != AlertPhase::Selecting {
            return Err(AlertError::NotSelecting(self.phase));
        }
        if !family.iter().any(|member| member.id == id) {
            return Err(AlertError::UnknownMember(id.to_string()));
        }

        if let Some(position) = self.selected.iter().position(|selected| selected == id) {
            self.selected.remove(position);
            Ok(false)
        } else {
            self.selected.push(id.to_string());
            Ok(true)
        }
    }

    /// Whether the send control is enabled.
    pub fn can_send(&self) -> bool {
        self.phase == AlertPhase::Selecting && !self.selected.is_empty()
    }

    /// Moves to `Sending`; `schedule_delivery` arms the completion timer.
    ///
    /// Returns the number of recipients.
    pub fn begin_send(
        &mut self,
        schedule_delivery: impl FnOnce() -> TimerId,
    ) -> Result<usize, AlertError> {
        if self.phase != AlertPhase::Selecting {
            return Err(AlertError::NotSelecting(self.phase));
        }
        if self.selected.is_empty() {
            return Err(AlertError::NoRecipients);
        }

        self.delivery_timer = Some(schedule_delivery());
        self.phase = AlertPhase::Sending;
        info!(
            "event=alert_send module=alert status=sending recipients={}",
            self.selected.len()
        );
        Ok(self.selected.len())
    }

    /// Finishes delivery when `timer` is the pending delivery timer.
    pub fn complete_delivery(&mut self, timer: TimerId) -> Option<usize> {
        if self.phase != AlertPhase::Sending || self.delivery_timer != Some(timer) {
            return None;
        }
        self.delivery_timer = None;
        let notified = self.selected.len();
        self.phase = AlertPhase::Sent { notified };
        info!("event=alert_send module=alert status=ok notified={notified}");
        Some(notified)
    }

    /// Resets to `Closed`; returns a pending delivery timer to cancel.
    pub fn close(&mut self) -> Option<TimerId> {
        self.phase = AlertPhase::Closed;
        self.selected.clear();
        self.delivery_timer.take()
    }

    /// Confirmation line shown once the alert is sent.
    pub fn confirmation_text(&self) -> Option<String> {
        match self.phase {
            AlertPhase::Sent { notified } => Some(notified_text(notified)),
            _ => None,
        }
    }
}

/// `"1 family member notified"` / `"{n} family members notified"`.
pub fn notified_text(count: usize) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} family member{plural} notified")
}

#[cfg(test)]
mod tests {
    use super::{notified_text, AlertError, AlertPhase, EmergencyAlert};
    use crate::model::family::FamilyMember;
    use crate::scheduler::TimerQueue;

    fn family() -> Vec<FamilyMember> {
        vec![
            FamilyMember::new("1", "A", "Daughter", "1"),
            FamilyMember::new("2", "B", "Son", "2"),
        ]
    }

    #[test]
    fn toggle_requires_open_dialog() {
        let mut alert = EmergencyAlert::new();
        let err = alert.toggle_member("1", &family()).expect_err("closed dialog");
        assert_eq!(err, AlertError::NotSelecting(AlertPhase::Closed));
    }

    #[test]
    fn toggle_twice_deselects() {
        let mut alert = EmergencyAlert::new();
        alert.open();
        assert!(alert.toggle_member("2", &family()).expect("select"));
        assert!(!alert.toggle_member("2", &family()).expect("deselect"));
        assert!(alert.selected().is_empty());
        assert!(!alert.can_send());
    }

    #[test]
    fn stale_delivery_timer_is_ignored_after_close() {
        let mut timers = TimerQueue::new();
        let mut alert = EmergencyAlert::new();
        alert.open();
        alert.toggle_member("1", &family()).expect("select");
        alert
            .begin_send(|| timers.schedule_at(1_500, ()))
            .expect("send");
        let pending = alert.close().expect("pending delivery");

        assert_eq!(alert.complete_delivery(pending), None);
        assert_eq!(alert.phase(), AlertPhase::Closed);
    }

    #[test]
    fn notified_text_pluralizes() {
        assert_eq!(notified_text(1), "1 family member notified");
        assert_eq!(notified_text(2), "2 family members notified");
        assert_eq!(notified_text(3), "3 family members notified");
    }
}
