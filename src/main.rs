//! AuraPlan - Terminal student planner

use anyhow::Result;
use auraplan::cli::{self, Cli, Commands};
use auraplan::planner::{get_app_dir, Config};
use auraplan::tui;
use clap::{CommandFactory, Parser};
use clap_complete::generate;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if std::env::var("AURAPLAN_DEBUG").is_ok() {
        init_tracing(cli.command.is_none())?;
    }

    // Handle commands that don't need app data
    match cli.command {
        Some(Commands::Completion { shell }) => {
            generate(shell, &mut Cli::command(), "auraplan", &mut std::io::stdout());
            return Ok(());
        }
        Some(Commands::Config { command }) => return cli::config::run(command).await,
        Some(Commands::Profile { command }) => return cli::profile::run(command).await,
        _ => {}
    }

    let profile = match cli.profile {
        Some(p) => p,
        None => Config::load()?.default_profile,
    };

    match cli.command {
        Some(Commands::Class { command }) => cli::class::run(&profile, command).await,
        Some(Commands::Import(args)) => cli::import::run(&profile, args).await,
        Some(Commands::Today(args)) => cli::today::run(&profile, args).await,
        Some(Commands::Task { command }) => cli::task::run(&profile, command).await,
        None => tui::run(&profile).await,
        _ => unreachable!(),
    }
}

/// The TUI owns the terminal, so its logs go to `debug.log` in the app dir.
fn init_tracing(to_file: bool) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_env_filter("auraplan=debug");
    if to_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(get_app_dir()?.join("debug.log"))?;
        builder
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init();
    } else {
        builder.with_writer(std::io::stderr).init();
    }
    Ok(())
}
