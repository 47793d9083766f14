use elderease_core::{
    CompanionApp, ManualClock, Notice, PreferenceKey, PreferencesPatch, ProfilePatch,
    SimulationTimings, Tab,
};

fn new_app() -> CompanionApp<ManualClock> {
    CompanionApp::new(ManualClock::new(0), SimulationTimings::default())
}

#[test]
fn seeded_profile_is_margaret() {
    let app = new_app();
    let profile = app.profile();
    assert_eq!(profile.name, "Margaret Wilson");
    assert_eq!(profile.age, 78);
    assert_eq!(profile.emergency_contacts.len(), 3);
    assert!(profile.preferences.voice_enabled);
    assert!(profile.preferences.large_text);
    assert!(!profile.preferences.high_contrast);
    assert!(profile.preferences.reminder_sound);
}

#[test]
fn toggle_preference_flips_only_that_key() {
    let mut app = new_app();
    let before = app.profile().preferences;

    assert!(app.toggle_preference(PreferenceKey::HighContrast));
    let after = app.profile().preferences;
    assert!(after.high_contrast);
    assert_eq!(after.voice_enabled, before.voice_enabled);
    assert_eq!(after.large_text, before.large_text);
    assert_eq!(after.reminder_sound, before.reminder_sound);
    assert_eq!(app.drain_notices(), vec![Notice::settings_saved()]);

    assert!(!app.toggle_preference(PreferenceKey::HighContrast));
    assert_eq!(app.profile().preferences, before);
}

#[test]
fn preference_patch_merges_instead_of_replacing() {
    let mut app = new_app();

    app.update_profile(&ProfilePatch {
        preferences: Some(PreferencesPatch {
            large_text: Some(false),
            ..PreferencesPatch::default()
        }),
        ..ProfilePatch::default()
    });

    let prefs = app.profile().preferences;
    assert!(!prefs.large_text);
    assert!(prefs.voice_enabled);
    assert!(prefs.reminder_sound);
    assert_eq!(app.profile().name, "Margaret Wilson");
    assert_eq!(app.drain_notices().len(), 1);
}

#[test]
fn profile_patch_updates_greeting_name_and_can_clear_avatar() {
    let mut app = new_app();

    app.update_profile(&ProfilePatch {
        name: Some("Maggie Wilson".to_string()),
        avatar: Some(None),
        ..ProfilePatch::default()
    });

    assert_eq!(app.dashboard().first_name, "Maggie");
    assert_eq!(app.profile().avatar, None);
    assert_eq!(app.profile().age, 78);
}

#[test]
fn navigation_starts_home_and_switches_tabs() {
    let mut app = new_app();
    assert_eq!(app.active_tab(), Tab::Home);
    app.select_tab(Tab::Settings);
    assert_eq!(app.active_tab(), Tab::Settings);
}
