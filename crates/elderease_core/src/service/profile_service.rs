//! Settings tab use-cases.
//!
//! # Invariants
//! - Updates merge into the profile; nothing is replaced wholesale.
//! - Every applied update yields the settings-saved acknowledgment.

use crate::model::notice::Notice;
use crate::model::profile::{PreferenceKey, ProfilePatch, UserProfile};
use log::info;

/// Owner of the single user profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSettings {
    profile: UserProfile,
}

impl ProfileSettings {
    pub fn new(profile: UserProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    /// Merges `patch` into the profile.
    pub fn update(&mut self, patch: &ProfilePatch) -> Notice {
        self.profile.apply(patch);
        info!(
            "event=profile_update module=settings status=ok name_changed={} preferences_changed={}",
            patch.name.is_some(),
            patch.preferences.is_some()
        );
        Notice::settings_saved()
    }

    /// Flips one preference; returns its new value and the acknowledgment.
    pub fn toggle_preference(&mut self, key: PreferenceKey) -> (bool, Notice) {
        let value = self.profile.preferences.toggle(key);
        info!(
            "event=preference_toggle module=settings status=ok key={} value={value}",
            key.as_str()
        );
        (value, Notice::settings_saved())
    }
}
