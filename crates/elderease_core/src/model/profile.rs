//! User profile and accessibility preferences.
//!
//! # Invariants
//! - Preferences are only ever patched field by field.
//! - A patch field set to `None` keeps the current value.

use crate::model::family::FamilyMember;
use serde::{Deserialize, Serialize};

/// Four independent accessibility toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub voice_enabled: bool,
    pub large_text: bool,
    pub high_contrast: bool,
    pub reminder_sound: bool,
}

/// Addressable preference key for single-toggle updates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    VoiceEnabled,
    LargeText,
    HighContrast,
    ReminderSound,
}

impl PreferenceKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::VoiceEnabled => "voice_enabled",
            Self::LargeText => "large_text",
            Self::HighContrast => "high_contrast",
            Self::ReminderSound => "reminder_sound",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "voice_enabled" => Some(Self::VoiceEnabled),
            "large_text" => Some(Self::LargeText),
            "high_contrast" => Some(Self::HighContrast),
            "reminder_sound" => Some(Self::ReminderSound),
            _ => None,
        }
    }
}

/// Partial preferences update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesPatch {
    pub voice_enabled: Option<bool>,
    pub large_text: Option<bool>,
    pub high_contrast: Option<bool>,
    pub reminder_sound: Option<bool>,
}

impl Preferences {
    pub fn get(&self, key: PreferenceKey) -> bool {
        match key {
            PreferenceKey::VoiceEnabled => self.voice_enabled,
            PreferenceKey::LargeText => self.large_text,
            PreferenceKey::HighContrast => self.high_contrast,
            PreferenceKey::ReminderSound => self.reminder_sound,
        }
    }

    /// Merges `patch` into the current values.
    pub fn apply(&mut self, patch: &PreferencesPatch) {
        if let Some(value) = patch.voice_enabled {
            self.voice_enabled = value;
        }
        if let Some(value) = patch.large_text {
            self.large_text = value;
        }
        if let Some(value) = patch.high_contrast {
            self.high_contrast = value;
        }
        if let Some(value) = patch.reminder_sound {
            self.reminder_sound = value;
        }
    }

    /// Flips one toggle and returns its new value.
    pub fn toggle(&mut self, key: PreferenceKey) -> bool {
        let slot = match key {
            PreferenceKey::VoiceEnabled => &mut self.voice_enabled,
            PreferenceKey::LargeText => &mut self.large_text,
            PreferenceKey::HighContrast => &mut self.high_contrast,
            PreferenceKey::ReminderSound => &mut self.reminder_sound,
        };
        *slot = !*slot;
        *slot
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub age: u32,
    pub avatar: Option<String>,
    pub emergency_contacts: Vec<FamilyMember>,
    pub preferences: Preferences,
}

/// Partial profile update. `avatar: Some(None)` clears the avatar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub avatar: Option<Option<String>>,
    pub preferences: Option<PreferencesPatch>,
}

impl UserProfile {
    /// First whitespace-separated token of `name`, used by the greeting.
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or("")
    }

    pub fn apply(&mut self, patch: &ProfilePatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(avatar) = &patch.avatar {
            self.avatar = avatar.clone();
        }
        if let Some(preferences) = &patch.preferences {
            self.preferences.apply(preferences);
        }
    }
}
