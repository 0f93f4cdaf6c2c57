//! `auraplan import` command implementation

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::ai::{ExtractError, Extractor};
use crate::planner::{ClassSession, Config, PlannerState, Storage};

#[derive(Args)]
pub struct ImportArgs {
    /// Timetable image or PDF
    file: PathBuf,

    /// Print the extracted classes without saving them
    #[arg(long)]
    dry_run: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct ImportJson<'a> {
    added: usize,
    dry_run: bool,
    classes: &'a [ClassSession],
}

pub async fn run(profile: &str, args: ImportArgs) -> Result<()> {
    let config = Config::load()?;
    let extractor = Extractor::from_config(&config.ai).map_err(into_user_error)?;

    if !args.json {
        println!("Analyzing {}...", args.file.display());
    }
    let response = extractor
        .extract_file(&args.file)
        .await
        .map_err(into_user_error)?;
    let sessions = response.into_sessions();
    info!("Extracted {} classes from {}", sessions.len(), args.file.display());

    let added = if args.dry_run {
        0
    } else {
        let mut state = PlannerState::load(Storage::new(profile)?, &config)?;
        state.import_classes(sessions.clone())?
    };

    if args.json {
        let out = ImportJson {
            added,
            dry_run: args.dry_run,
            classes: &sessions,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if sessions.is_empty() {
        println!("No classes found in {}.", args.file.display());
        return Ok(());
    }

    for session in &sessions {
        let room = session
            .room
            .as_deref()
            .map(|r| format!(" ({})", r))
            .unwrap_or_default();
        println!(
            "  {:<10} {:<13} {}{}",
            session.day,
            session.time_range(),
            session.subject,
            room
        );
    }

    if args.dry_run {
        println!("\nDry run: {} classes found, nothing saved.", sessions.len());
    } else {
        println!("\n✓ Success! Schedule updated with {} classes.", added);
    }
    Ok(())
}

/// Keeps the detailed error for the debug log and shows the short message.
fn into_user_error(e: ExtractError) -> anyhow::Error {
    tracing::debug!("Extraction failed: {}", e);
    anyhow::anyhow!("{}", e.user_message())
}
