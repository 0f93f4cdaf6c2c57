//! `auraplan class` subcommands implementation

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use std::io::{self, Write};

use crate::planner::{
    normalize_day, ClassForm, ClassSession, Config, PlannerState, Storage, DEFAULT_CLASS_COLOR,
    WEEKDAYS,
};

const TABLE_COL_DAY: usize = 10;
const TABLE_COL_TIME: usize = 13;
const TABLE_COL_SUBJECT: usize = 24;
const TABLE_COL_ROOM: usize = 12;
const TABLE_COL_ID_DISPLAY: usize = 8;

#[derive(Subcommand)]
pub enum ClassCommands {
    /// List classes, grouped by day
    #[command(alias = "ls")]
    List(ClassListArgs),

    /// Add a class to the timetable
    #[command(alias = "new")]
    Add(ClassArgs),

    /// Remove a class
    #[command(alias = "rm")]
    Remove(ClassRemoveArgs),
}

#[derive(Args)]
pub struct ClassListArgs {
    /// Only show classes on this day (e.g. "mon", "Tuesday")
    #[arg(short, long)]
    day: Option<String>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct ClassArgs {
    /// Subject name
    subject: String,

    /// Day of the week
    #[arg(short, long)]
    day: String,

    /// Start time (HH:MM)
    #[arg(short, long)]
    start: String,

    /// End time (HH:MM)
    #[arg(short, long)]
    end: String,

    /// Room or location
    #[arg(short, long)]
    room: Option<String>,

    /// Color name or hex value (defaults to the theme accent)
    #[arg(long)]
    color: Option<String>,
}

#[derive(Args)]
pub struct ClassRemoveArgs {
    /// Class ID or ID prefix
    identifier: String,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,
}

pub async fn run(profile: &str, command: ClassCommands) -> Result<()> {
    match command {
        ClassCommands::List(args) => list_classes(profile, args).await,
        ClassCommands::Add(args) => add_class(profile, args).await,
        ClassCommands::Remove(args) => remove_class(profile, args).await,
    }
}

/// Sessions in week order, then by start time.
fn in_week_order<'a>(sessions: impl IntoIterator<Item = &'a ClassSession>) -> Vec<&'a ClassSession> {
    let mut sorted: Vec<&ClassSession> = sessions.into_iter().collect();
    sorted.sort_by_key(|s| {
        let day_idx = WEEKDAYS
            .iter()
            .position(|d| *d == s.day)
            .unwrap_or(WEEKDAYS.len());
        (day_idx, s.start_minutes().unwrap_or(u32::MAX))
    });
    sorted
}

fn print_table_header() {
    println!(
        "{:<width_day$} {:<width_time$} {:<width_subject$} {:<width_room$} ID",
        "DAY",
        "TIME",
        "SUBJECT",
        "ROOM",
        width_day = TABLE_COL_DAY,
        width_time = TABLE_COL_TIME,
        width_subject = TABLE_COL_SUBJECT,
        width_room = TABLE_COL_ROOM,
    );
    println!(
        "{}",
        "-".repeat(
            TABLE_COL_DAY
                + TABLE_COL_TIME
                + TABLE_COL_SUBJECT
                + TABLE_COL_ROOM
                + TABLE_COL_ID_DISPLAY
                + 4
        )
    );
}

fn print_table_row(session: &ClassSession) {
    let subject = super::truncate(&session.subject, TABLE_COL_SUBJECT);
    let room = super::truncate(session.room.as_deref().unwrap_or("-"), TABLE_COL_ROOM);
    println!(
        "{:<width_day$} {:<width_time$} {:<width_subject$} {:<width_room$} {}",
        session.day,
        session.time_range(),
        subject,
        room,
        super::truncate_id(&session.id, TABLE_COL_ID_DISPLAY),
        width_day = TABLE_COL_DAY,
        width_time = TABLE_COL_TIME,
        width_subject = TABLE_COL_SUBJECT,
        width_room = TABLE_COL_ROOM,
    );
}

async fn list_classes(profile: &str, args: ClassListArgs) -> Result<()> {
    let config = Config::load()?;
    let state = PlannerState::load(Storage::new(profile)?, &config)?;
    let timetable = state.timetable();

    let sessions = match args.day.as_deref() {
        Some(raw) => {
            let day = normalize_day(raw).ok_or_else(|| anyhow::anyhow!("Unknown day: {}", raw))?;
            in_week_order(timetable.for_day(day))
        }
        None => in_week_order(timetable.all()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&sessions)?);
        return Ok(());
    }

    if sessions.is_empty() {
        println!("No classes found in profile '{}'.", state.profile());
        return Ok(());
    }

    println!("Profile: {}\n", state.profile());
    print_table_header();
    for session in &sessions {
        print_table_row(session);
    }
    println!("\nTotal: {} classes", sessions.len());

    Ok(())
}

async fn add_class(profile: &str, args: ClassArgs) -> Result<()> {
    let form = ClassForm {
        subject: args.subject,
        day: args.day,
        start_time: args.start,
        end_time: args.end,
        room: args.room.unwrap_or_default(),
        color: args
            .color
            .unwrap_or_else(|| DEFAULT_CLASS_COLOR.to_string()),
    };
    let session = match form.validate(None) {
        Ok(session) => session,
        Err(message) => bail!(message),
    };

    let config = Config::load()?;
    let mut state = PlannerState::load(Storage::new(profile)?, &config)?;
    let id = session.id.clone();
    let summary = format!("{} on {} {}", session.subject, session.day, session.time_range());
    state.save_class(session)?;

    println!("✓ Added class: {}", summary);
    println!("  ID: {}", id);
    Ok(())
}

async fn remove_class(profile: &str, args: ClassRemoveArgs) -> Result<()> {
    let config = Config::load()?;
    let mut state = PlannerState::load(Storage::new(profile)?, &config)?;

    let session = super::resolve_class(&args.identifier, state.timetable().all())?;
    let id = session.id.clone();
    let subject = session.subject.clone();

    if !args.yes {
        print!("Delete class '{}' ({})? [y/N] ", subject, session.time_range());
        io::stdout().flush()?;

        let mut response = String::new();
        io::stdin().read_line(&mut response)?;

        if response.trim().to_lowercase() != "y" {
            println!("Cancelled.");
            return Ok(());
        }
    }

    state.remove_class(&id)?;
    println!("✓ Removed class: {}", subject);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_order_sorts_by_day_then_start() {
        let sessions = vec![
            ClassSession::new("Chem", "Wednesday", "09:00", "10:00"),
            ClassSession::new("Art", "Monday", "14:00", "15:00"),
            ClassSession::new("Math", "Monday", "08:30", "09:30"),
            ClassSession::new("Odd", "Funday", "08:00", "09:00"),
        ];
        let subjects: Vec<&str> = in_week_order(&sessions)
            .iter()
            .map(|s| s.subject.as_str())
            .collect();
        assert_eq!(subjects, vec!["Math", "Art", "Chem", "Odd"]);
    }
}
