//! Task management CLI commands

use anyhow::{bail, Result};
use clap::{Args, Subcommand};
use std::io::{self, Write};

use crate::planner::{Category, Config, PlannerState, SortMode, Storage, Task};

const TABLE_COL_STATUS: usize = 4;
const TABLE_COL_CATEGORY: usize = 10;
const TABLE_COL_TEXT: usize = 40;
const TABLE_COL_ID_DISPLAY: usize = 8;

#[derive(Subcommand)]
pub enum TaskCommands {
    /// List tasks
    #[command(alias = "ls")]
    List(TaskListArgs),

    /// Add a new task
    Add(TaskAddArgs),

    /// Toggle a task between pending and completed
    Done(TaskRefArgs),

    /// Remove a task
    #[command(alias = "rm")]
    Remove(TaskRemoveArgs),
}

#[derive(Args)]
pub struct TaskListArgs {
    /// Pending tasks first, ordered by due time
    #[arg(long)]
    by_due: bool,

    /// Only show pending tasks
    #[arg(long)]
    pending: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
pub struct TaskAddArgs {
    /// Task text
    text: String,

    /// Category (personal, study, urgent)
    #[arg(short, long, default_value = "personal")]
    category: String,
}

#[derive(Args)]
pub struct TaskRefArgs {
    /// Task ID, ID prefix, or exact text
    identifier: String,
}

#[derive(Args)]
pub struct TaskRemoveArgs {
    /// Task ID, ID prefix, or exact text
    identifier: String,

    /// Skip the confirmation prompt
    #[arg(short = 'y', long)]
    yes: bool,
}

pub async fn run(profile: &str, command: TaskCommands) -> Result<()> {
    let config = Config::load()?;
    if !config.tasks.persist {
        bail!(
            "Tasks are kept in memory only. Set `persist = true` under [tasks] in {} to manage them from the command line.",
            crate::planner::config_path()?.display()
        );
    }
    let mut state = PlannerState::load(Storage::new(profile)?, &config)?;

    match command {
        TaskCommands::List(args) => list_tasks(&state, args),
        TaskCommands::Add(args) => add_task(&mut state, args),
        TaskCommands::Done(args) => toggle_task(&mut state, args),
        TaskCommands::Remove(args) => remove_task(&mut state, args),
    }
}

fn list_tasks(state: &PlannerState, args: TaskListArgs) -> Result<()> {
    let mode = if args.by_due {
        SortMode::DueDate
    } else {
        SortMode::Default
    };
    let tasks: Vec<&Task> = state
        .tasks()
        .sorted(mode)
        .into_iter()
        .filter(|t| !args.pending || !t.completed)
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
        return Ok(());
    }

    if tasks.is_empty() {
        println!("Your list is empty.");
        return Ok(());
    }

    println!(
        "{:<width_status$} {:<width_category$} {:<width_text$} ID",
        "",
        "CATEGORY",
        "TASK",
        width_status = TABLE_COL_STATUS,
        width_category = TABLE_COL_CATEGORY,
        width_text = TABLE_COL_TEXT,
    );
    println!(
        "{}",
        "-".repeat(TABLE_COL_STATUS + TABLE_COL_CATEGORY + TABLE_COL_TEXT + TABLE_COL_ID_DISPLAY + 3)
    );
    for task in &tasks {
        let status = if task.completed { "[x]" } else { "[ ]" };
        println!(
            "{:<width_status$} {:<width_category$} {:<width_text$} {}",
            status,
            task.category.label(),
            super::truncate(&task.text, TABLE_COL_TEXT),
            super::truncate_id(&task.id, TABLE_COL_ID_DISPLAY),
            width_status = TABLE_COL_STATUS,
            width_category = TABLE_COL_CATEGORY,
            width_text = TABLE_COL_TEXT,
        );
    }
    println!(
        "\n{} pending, {} completed",
        state.tasks().pending_count(),
        state.tasks().completed_count()
    );

    Ok(())
}

fn add_task(state: &mut PlannerState, args: TaskAddArgs) -> Result<()> {
    let category = Category::parse(&args.category).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown category '{}'. Use personal, study, or urgent.",
            args.category
        )
    })?;

    match state.add_task(&args.text, category)? {
        Some(id) => {
            println!("✓ Added task: {}", args.text.trim());
            println!("  ID: {}", id);
            Ok(())
        }
        None => bail!("Task text cannot be empty"),
    }
}

fn toggle_task(state: &mut PlannerState, args: TaskRefArgs) -> Result<()> {
    let task = super::resolve_task(&args.identifier, state.tasks().all())?;
    let (id, text) = (task.id.clone(), task.text.clone());

    state.toggle_task(&id)?;
    let completed = state.tasks().get(&id).is_some_and(|t| t.completed);
    if completed {
        println!("✓ Completed: {}", text);
    } else {
        println!("✓ Reopened: {}", text);
    }
    Ok(())
}

fn remove_task(state: &mut PlannerState, args: TaskRemoveArgs) -> Result<()> {
    let task = super::resolve_task(&args.identifier, state.tasks().all())?;
    let (id, text) = (task.id.clone(), task.text.clone());

    if !args.yes {
        print!("Delete task '{}'? [y/N] ", text);
        io::stdout().flush()?;

        let mut response = String::new();
        io::stdin().read_line(&mut response)?;

        if response.trim().to_lowercase() != "y" {
            println!("Cancelled.");
            return Ok(());
        }
    }

    state.remove_task(&id)?;
    println!("✓ Removed task: {}", text);
    Ok(())
}
