//! In-memory seed collections standing in for a backend.
//!
//! # Invariants
//! - Ids are unique within each collection.
//! - Seed chat timestamps are relative to the caller-provided `now_ms`.

use crate::model::chat::{ChatMessage, ChatRole};
use crate::model::family::FamilyMember;
use crate::model::profile::{Preferences, UserProfile};
use crate::model::reminder::{Reminder, ReminderCategory};
use crate::model::routine::{DailyRoutine, RoutineCategory, Weekday};

const EVERY_DAY: [Weekday; 7] = Weekday::ALL;

pub fn seed_reminders() -> Vec<Reminder> {
    vec![
        Reminder::new("1", "Morning Medication", "8:00 AM", ReminderCategory::Medication)
            .with_description("Take blood pressure pill with water")
            .with_icon("💊")
            .completed(),
        Reminder::new("2", "Doctor Appointment", "10:30 AM", ReminderCategory::Appointment)
            .with_description("Dr. Smith - Annual checkup")
            .with_icon("🏥"),
        Reminder::new("3", "Lunch Time", "12:00 PM", ReminderCategory::Meal)
            .with_description("Remember to eat a healthy lunch")
            .with_icon("🍽️"),
        Reminder::new("4", "Afternoon Walk", "3:00 PM", ReminderCategory::Activity)
            .with_description("15 minute walk in the garden")
            .with_icon("🚶"),
        Reminder::new("5", "Evening Medication", "6:00 PM", ReminderCategory::Medication)
            .with_description("Take vitamins and heart medication")
            .with_icon("💊"),
    ]
}

pub fn seed_family_members() -> Vec<FamilyMember> {
    vec![
        FamilyMember::new("1", "Sarah Johnson", "Daughter", "+1 (555) 123-4567")
            .with_email("sarah@email.com")
            .with_avatar("👩")
            .primary(),
        FamilyMember::new("2", "Michael Johnson", "Son", "+1 (555) 987-6543")
            .with_email("michael@email.com")
            .with_avatar("👨"),
        FamilyMember::new("3", "Emily Davis", "Granddaughter", "+1 (555) 456-7890")
            .with_email("emily@email.com")
            .with_avatar("👧"),
    ]
}

/// Opening conversation, stamped one hour back from `now_ms`.
pub fn seed_chat_history(now_ms: i64) -> Vec<ChatMessage> {
    vec![
        ChatMessage::new(
            1,
            ChatRole::Assistant,
            "Good morning, dear! 💖 I hope you slept well. Your first medication reminder is at 8 AM. Is there anything I can help you with today?",
            now_ms - 3_600_000,
        ),
        ChatMessage::new(
            2,
            ChatRole::User,
            "What's on my schedule today?",
            now_ms - 3_500_000,
        )
        .voice(),
        ChatMessage::new(
            3,
            ChatRole::Assistant,
            "Today you have: 💊 Morning medication at 8 AM (completed!), 🏥 Doctor's appointment at 10:30 AM, 🍽️ Lunch at noon, 🚶 Afternoon walk at 3 PM, and 💊 Evening medication at 6 PM. Would you like me to remind you about anything specific?",
            now_ms - 3_400_000,
        ),
    ]
}

pub fn seed_profile() -> UserProfile {
    UserProfile {
        name: "Margaret Wilson".to_string(),
        age: 78,
        avatar: Some("👵".to_string()),
        emergency_contacts: seed_family_members(),
        preferences: Preferences {
            voice_enabled: true,
            large_text: true,
            high_contrast: false,
            reminder_sound: true,
        },
    }
}

pub fn seed_routines() -> Vec<DailyRoutine> {
    use Weekday::{Fri, Mon, Sat, Sun, Wed};

    vec![
        DailyRoutine::new("1", "Morning Medication", "08:00", EVERY_DAY, RoutineCategory::Medication)
            .with_notes("Blood pressure medication with breakfast"),
        DailyRoutine::new("2", "Morning Exercise", "09:00", [Mon, Wed, Fri], RoutineCategory::Exercise)
            .with_notes("Light stretching and walking"),
        DailyRoutine::new("3", "Lunch", "12:00", EVERY_DAY, RoutineCategory::Meal),
        DailyRoutine::new("4", "Afternoon Walk", "15:00", EVERY_DAY, RoutineCategory::Exercise)
            .with_notes("15-20 minute walk"),
        DailyRoutine::new("5", "Video Call with Family", "17:00", [Sat, Sun], RoutineCategory::Social)
            .with_notes("Weekly family catch-up"),
        DailyRoutine::new("6", "Evening Medication", "18:00", EVERY_DAY, RoutineCategory::Medication)
            .with_notes("Vitamins and heart medication with dinner"),
        DailyRoutine::new("7", "Bedtime", "21:00", EVERY_DAY, RoutineCategory::Sleep),
    ]
}

#[cfg(test)]
mod tests {
    use super::{
        seed_chat_history, seed_family_members, seed_profile, seed_reminders, seed_routines,
    };
    use std::collections::HashSet;

    #[test]
    fn seed_collections_have_expected_sizes() {
        assert_eq!(seed_reminders().len(), 5);
        assert_eq!(seed_family_members().len(), 3);
        assert_eq!(seed_chat_history(10_000_000).len(), 3);
        assert_eq!(seed_routines().len(), 7);
        assert_eq!(seed_profile().emergency_contacts.len(), 3);
    }

    #[test]
    fn seed_ids_are_unique_per_collection() {
        let reminder_ids: HashSet<_> = seed_reminders().into_iter().map(|r| r.id).collect();
        assert_eq!(reminder_ids.len(), 5);
        let member_ids: HashSet<_> = seed_family_members().into_iter().map(|m| m.id).collect();
        assert_eq!(member_ids.len(), 3);
        let routine_ids: HashSet<_> = seed_routines().into_iter().map(|r| r.id).collect();
        assert_eq!(routine_ids.len(), 7);
    }

    #[test]
    fn seed_routines_pass_validation() {
        for routine in seed_routines() {
            routine.validate().expect("seed routine should be valid");
        }
    }

    #[test]
    fn seed_chat_history_is_chronological() {
        let history = seed_chat_history(10_000_000);
        assert!(history.windows(2).all(|pair| pair[0].id < pair[1].id));
        assert!(history
            .windows(2)
            .all(|pair| pair[0].timestamp_ms < pair[1].timestamp_ms));
    }
}
