use elderease_core::{CompanionApp, ManualClock, Notice, SimulationTimings, ToggleOutcome};

const START_MS: i64 = 1_700_000_000_000;

fn new_app() -> CompanionApp<ManualClock> {
    CompanionApp::new(ManualClock::new(START_MS), SimulationTimings::default())
}

#[test]
fn toggling_twice_restores_every_reminder() {
    let mut app = new_app();
    let ids = app
        .reminders()
        .iter()
        .map(|reminder| reminder.id.clone())
        .collect::<Vec<_>>();

    for id in ids {
        let before = app.reminders().to_vec();
        app.toggle_reminder(&id);
        app.toggle_reminder(&id);
        assert_eq!(app.reminders(), before.as_slice(), "reminder {id}");
    }
}

#[test]
fn acknowledgment_is_emitted_only_on_completion() {
    let mut app = new_app();
    let snapshot = app.reminders().to_vec();

    for reminder in snapshot {
        let outcome = app.toggle_reminder(&reminder.id);
        let notices = app.drain_notices();
        if reminder.completed {
            assert_eq!(outcome, ToggleOutcome::Reopened);
            assert!(notices.is_empty(), "reopening {} must stay silent", reminder.id);
        } else {
            assert_eq!(
                outcome,
                ToggleOutcome::Completed(Notice::reminder_completed(&reminder.title))
            );
            assert_eq!(notices, vec![Notice::reminder_completed(&reminder.title)]);
        }
    }
}

#[test]
fn completion_notice_names_the_reminder() {
    let mut app = new_app();
    app.toggle_reminder("2");

    let notices = app.drain_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].title, "Well done! 💖");
    assert_eq!(notices[0].description, "You completed: Doctor Appointment");
    assert!(app.drain_notices().is_empty());
}

#[test]
fn unknown_reminder_is_a_silent_no_op() {
    let mut app = new_app();
    let before = app.reminders().to_vec();

    assert_eq!(app.toggle_reminder("missing"), ToggleOutcome::Unknown);
    assert_eq!(app.reminders(), before.as_slice());
    assert!(app.drain_notices().is_empty());
}

#[test]
fn dashboard_tracks_progress() {
    let mut app = new_app();
    let summary = app.dashboard();
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.remaining, 4);
    assert_eq!(
        summary.next_reminder.map(|reminder| reminder.id),
        Some("2".to_string())
    );

    app.toggle_reminder("2");
    app.toggle_reminder("3");
    let summary = app.dashboard();
    assert_eq!(summary.completed, 3);
    assert_eq!(summary.remaining, 2);
    assert_eq!(
        summary.next_reminder.map(|reminder| reminder.title),
        Some("Afternoon Walk".to_string())
    );
}
