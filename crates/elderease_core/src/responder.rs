//! Keyword-priority assistant reply selection.
//!
//! # Responsibility
//! - Map free-text user input to one canned assistant reply.
//!
//! # Invariants
//! - Matching is a case-insensitive substring test.
//! - Rules are evaluated in table order and the first match wins.
//! - Selection is a pure function of the input text.

use serde::{Deserialize, Serialize};

/// Reply category chosen for one user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseIntent {
    ScheduleSummary,
    MedicationStatus,
    EmergencyContacts,
    Reassurance,
    Fallback,
}

impl ResponseIntent {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ScheduleSummary => "schedule_summary",
            Self::MedicationStatus => "medication_status",
            Self::EmergencyContacts => "emergency_contacts",
            Self::Reassurance => "reassurance",
            Self::Fallback => "fallback",
        }
    }

    /// Canned reply text for this intent.
    pub fn response(self) -> &'static str {
        match self {
            Self::ScheduleSummary => SCHEDULE_SUMMARY_RESPONSE,
            Self::MedicationStatus => MEDICATION_STATUS_RESPONSE,
            Self::EmergencyContacts => EMERGENCY_CONTACTS_RESPONSE,
            Self::Reassurance => REASSURANCE_RESPONSE,
            Self::Fallback => FALLBACK_RESPONSE,
        }
    }
}

pub const SCHEDULE_SUMMARY_RESPONSE: &str = "Today you have 5 items on your schedule: Morning medication at 8 AM ✅, Doctor's appointment at 10:30 AM, Lunch at noon, Afternoon walk at 3 PM, and Evening medication at 6 PM. Would you like me to remind you about any of these? 💖";
pub const MEDICATION_STATUS_RESPONSE: &str = "Your next medication is your Evening Medication at 6 PM - that's your vitamins and heart medication with dinner. Your morning medication has already been completed. Great job staying on track! 💊💖";
pub const EMERGENCY_CONTACTS_RESPONSE: &str = "Your emergency contacts are: Sarah (Daughter) - your primary contact, Michael (Son), and Emily (Granddaughter). Would you like me to call any of them for you? 👨‍👩‍👧‍👦";
pub const REASSURANCE_RESPONSE: &str = "I'm here to help! If you're having an emergency, please tap the red 'Send Alert to Family' button on the home screen. Your family will be notified immediately. Are you okay? 💖";
pub const FALLBACK_RESPONSE: &str = "I'm here to help you, dear! You can ask me about your schedule, medications, or family contacts. Is there anything specific you'd like to know? 💖";

/// One `(keywords, intent)` row of the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseRule {
    /// Lowercase keywords; any one matching selects `intent`.
    pub keywords: &'static [&'static str],
    pub intent: ResponseIntent,
}

impl ResponseRule {
    fn matches(&self, lowered_input: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| lowered_input.contains(keyword))
    }
}

/// Rules in evaluation order. `Fallback` applies when none match.
pub const RESPONSE_RULES: &[ResponseRule] = &[
    ResponseRule {
        keywords: &["schedule", "today"],
        intent: ResponseIntent::ScheduleSummary,
    },
    ResponseRule {
        keywords: &["medication", "medicine"],
        intent: ResponseIntent::MedicationStatus,
    },
    ResponseRule {
        keywords: &["family", "contact"],
        intent: ResponseIntent::EmergencyContacts,
    },
    ResponseRule {
        keywords: &["help", "emergency"],
        intent: ResponseIntent::Reassurance,
    },
];

/// Picks the reply intent for `input`.
pub fn classify(input: &str) -> ResponseIntent {
    let lowered = input.to_lowercase();
    RESPONSE_RULES
        .iter()
        .find(|rule| rule.matches(&lowered))
        .map(|rule| rule.intent)
        .unwrap_or(ResponseIntent::Fallback)
}

/// Picks the canned reply text for `input`.
pub fn select_response(input: &str) -> &'static str {
    classify(input).response()
}
