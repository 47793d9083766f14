//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `elderease_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use elderease_core::{CompanionApp, LocalZone, ManualClock, SimulationTimings};

/// 2023-11-14 09:00:00 UTC, a Tuesday morning.
const PROBE_NOW_MS: i64 = 1_699_952_400_000;

fn main() {
    println!("elderease_core ping={}", elderease_core::ping());
    println!("elderease_core version={}", elderease_core::core_version());

    let app = CompanionApp::new(ManualClock::new(PROBE_NOW_MS), SimulationTimings::default())
        .with_zone(LocalZone::utc());
    let summary = app.dashboard();
    println!(
        "dashboard greeting=\"{}, {}\" remaining={} completed={}",
        summary.greeting.text(),
        summary.first_name,
        summary.remaining,
        summary.completed
    );
    match summary.next_reminder {
        Some(reminder) => println!("next_reminder=\"{}\" at={}", reminder.title, reminder.time),
        None => println!("next_reminder=none"),
    }
    println!(
        "today={} routines={}",
        app.today().label(),
        app.routines_for(app.today()).len()
    );
}
