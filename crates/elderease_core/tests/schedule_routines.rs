use elderease_core::{
    day_heading, CompanionApp, LocalZone, ManualClock, RoutineCategory, RoutineDraft, RoutineError,
    RoutineValidationError, SimulationTimings, Weekday,
};
use std::collections::BTreeSet;
use uuid::Uuid;

/// 2023-11-14T22:13:20Z, a Tuesday.
const START_MS: i64 = 1_700_000_000_000;

fn new_app() -> CompanionApp<ManualClock> {
    CompanionApp::new(ManualClock::new(START_MS), SimulationTimings::default())
        .with_zone(LocalZone::utc())
}

fn draft(title: &str, time: &str, days: &[Weekday]) -> RoutineDraft {
    RoutineDraft {
        title: title.to_string(),
        time: time.to_string(),
        days: days.iter().copied().collect::<BTreeSet<_>>(),
        category: RoutineCategory::Activity,
        notes: None,
    }
}

fn titles_for(app: &CompanionApp<ManualClock>, day: Weekday) -> Vec<String> {
    app.routines_for(day)
        .into_iter()
        .map(|routine| routine.title.clone())
        .collect()
}

#[test]
fn every_weekday_is_sorted_by_time_and_complete() {
    let app = new_app();
    for day in Weekday::ALL {
        let filtered = app.routines_for(day);
        assert!(
            filtered.windows(2).all(|pair| pair[0].time <= pair[1].time),
            "{day:?} is not sorted"
        );
        assert!(filtered.iter().all(|routine| routine.days.contains(&day)));

        let expected = app
            .routines()
            .iter()
            .filter(|routine| routine.days.contains(&day))
            .count();
        assert_eq!(filtered.len(), expected, "{day:?}");
    }
}

#[test]
fn weekday_filter_matches_seed_recurrence() {
    let app = new_app();
    assert_eq!(
        titles_for(&app, Weekday::Mon),
        vec![
            "Morning Medication",
            "Morning Exercise",
            "Lunch",
            "Afternoon Walk",
            "Evening Medication",
            "Bedtime",
        ]
    );
    assert_eq!(app.routines_for(Weekday::Tue).len(), 5);
    assert!(titles_for(&app, Weekday::Sun).contains(&"Video Call with Family".to_string()));
    assert!(!titles_for(&app, Weekday::Thu).contains(&"Morning Exercise".to_string()));
}

#[test]
fn index_lookup_uses_sunday_first() {
    let app = new_app();
    let saturday = Weekday::from_index(6).expect("valid index");
    assert_eq!(saturday, Weekday::Sat);
    assert!(titles_for(&app, saturday).contains(&"Video Call with Family".to_string()));
    assert_eq!(Weekday::from_index(0), Some(Weekday::Sun));
}

#[test]
fn today_heading_follows_clock_and_zone() {
    let app = new_app();
    assert_eq!(app.today(), Weekday::Tue);
    assert_eq!(day_heading(Weekday::Tue, app.today()), "Today");
    assert_eq!(day_heading(Weekday::Fri, app.today()), "Fri");

    let app = app.with_zone(LocalZone::from_utc_offset_minutes(120).expect("valid offset"));
    assert_eq!(app.today(), Weekday::Wed);
}

#[test]
fn created_routine_lands_in_time_order() {
    let mut app = new_app();

    let id = app
        .create_routine(draft("  Tea with neighbor ", "10:30", &[Weekday::Tue]))
        .expect("create routine");
    assert!(Uuid::parse_str(&id).is_ok());

    assert_eq!(
        titles_for(&app, Weekday::Tue),
        vec![
            "Morning Medication",
            "Tea with neighbor",
            "Lunch",
            "Afternoon Walk",
            "Evening Medication",
            "Bedtime",
        ]
    );
    assert!(!titles_for(&app, Weekday::Wed).contains(&"Tea with neighbor".to_string()));
}

#[test]
fn invalid_drafts_are_rejected() {
    let mut app = new_app();
    let before = app.routines().len();

    assert_eq!(
        app.create_routine(draft("Walk", "9:00", &[Weekday::Mon])),
        Err(RoutineError::Validation(RoutineValidationError::InvalidTime(
            "9:00".to_string()
        )))
    );
    assert_eq!(
        app.create_routine(draft(" ", "09:00", &[Weekday::Mon])),
        Err(RoutineError::Validation(RoutineValidationError::EmptyTitle))
    );
    assert_eq!(
        app.create_routine(draft("Walk", "09:00", &[])),
        Err(RoutineError::Validation(RoutineValidationError::NoDays))
    );
    assert_eq!(app.routines().len(), before);
}

#[test]
fn update_and_delete_by_id() {
    let mut app = new_app();

    let mut changed = draft("Bedtime", "22:00", &[Weekday::Sat]);
    changed.category = RoutineCategory::Sleep;
    changed.notes = Some("  Read a chapter first ".to_string());
    app.update_routine("7", changed).expect("update");

    let updated = app
        .routines()
        .iter()
        .find(|routine| routine.id == "7")
        .expect("routine 7");
    assert_eq!(updated.time, "22:00");
    assert_eq!(updated.notes.as_deref(), Some("Read a chapter first"));
    assert!(!titles_for(&app, Weekday::Mon).contains(&"Bedtime".to_string()));

    let removed = app.delete_routine("2").expect("delete");
    assert_eq!(removed.title, "Morning Exercise");
    assert_eq!(
        app.delete_routine("2"),
        Err(RoutineError::NotFound("2".to_string()))
    );
    assert_eq!(
        app.update_routine("missing", draft("X", "10:00", &[Weekday::Mon])),
        Err(RoutineError::NotFound("missing".to_string()))
    );
}
