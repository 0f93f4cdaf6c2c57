//! `auraplan today` command implementation

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDateTime};
use clap::Args;
use serde::Serialize;

use crate::planner::{day_label, is_current, is_past, ClassSession, Config, PlannerState, Storage, Task};

#[derive(Args)]
pub struct TodayArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
enum ClassStatus {
    Past,
    Current,
    Upcoming,
}

#[derive(Serialize)]
struct ClassJson<'a> {
    #[serde(flatten)]
    session: &'a ClassSession,
    status: ClassStatus,
}

#[derive(Serialize)]
struct TodayJson<'a> {
    day: &'static str,
    date: String,
    classes: Vec<ClassJson<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pending_tasks: Option<Vec<&'a Task>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed_tasks: Option<usize>,
}

fn class_status(session: &ClassSession, now: NaiveDateTime) -> ClassStatus {
    if is_past(&session.end_time, now) {
        ClassStatus::Past
    } else if is_current(session, now) {
        ClassStatus::Current
    } else {
        ClassStatus::Upcoming
    }
}

pub async fn run(profile: &str, args: TodayArgs) -> Result<()> {
    let config = Config::load()?;
    let state = PlannerState::load(Storage::new(profile)?, &config)?;
    let now = Local::now().naive_local();
    let day = day_label(now.weekday());

    let classes: Vec<ClassJson> = state
        .timetable()
        .for_day(day)
        .into_iter()
        .map(|session| ClassJson {
            session,
            status: class_status(session, now),
        })
        .collect();
    // Without persistence the list only holds the seeded placeholders
    let pending: Option<Vec<&Task>> = state
        .persists_tasks()
        .then(|| state.tasks().pending().collect());

    if args.json {
        let out = TodayJson {
            day,
            date: now.format("%Y-%m-%d").to_string(),
            classes,
            completed_tasks: pending
                .is_some()
                .then(|| state.tasks().completed_count()),
            pending_tasks: pending,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{}\n", crate::tui::long_date(now));

    println!("Schedule");
    if classes.is_empty() {
        println!("  No classes scheduled. Enjoy your day!");
    }
    for class in &classes {
        let marker = match class.status {
            ClassStatus::Past => "✓",
            ClassStatus::Current => "▶",
            ClassStatus::Upcoming => " ",
        };
        let room = class
            .session
            .room
            .as_deref()
            .map(|r| format!(" ({})", r))
            .unwrap_or_default();
        println!(
            "  {} {:<13} {}{}",
            marker,
            class.session.time_range(),
            class.session.subject,
            room
        );
    }

    let Some(pending) = pending else {
        println!("\nTasks are kept in memory only; set `persist = true` under [tasks] to list them here.");
        return Ok(());
    };
    println!("\nTasks: {} pending", pending.len());
    if pending.is_empty() {
        println!("  All caught up!");
    }
    for task in &pending {
        println!("  [{}] {}", task.category, task.text);
    }

    Ok(())
}
