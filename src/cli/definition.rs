//! Command-line interface definition

use clap::{Parser, Subcommand};

use super::class::ClassCommands;
use super::config::ConfigCommands;
use super::import::ImportArgs;
use super::profile::ProfileCommands;
use super::task::TaskCommands;
use super::today::TodayArgs;

#[derive(Parser)]
#[command(name = "auraplan")]
#[command(about = "Student planner: tasks, weekly classes, and AI timetable import")]
#[command(version)]
#[command(
    long_about = "AuraPlan keeps a todo list and a weekly class timetable in the terminal.\n\nRun without a subcommand to open the TUI."
)]
pub struct Cli {
    /// Profile to use (separate classes and tasks per profile)
    #[arg(short, long, global = true, env = "AURAPLAN_PROFILE")]
    pub profile: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage the weekly class timetable
    Class {
        #[command(subcommand)]
        command: ClassCommands,
    },

    /// Extract classes from a timetable image or PDF
    Import(ImportArgs),

    /// Show today's classes and pending tasks
    Today(TodayArgs),

    /// Manage persisted tasks
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },

    /// Show or change configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Manage profiles
    Profile {
        #[command(subcommand)]
        command: Option<ProfileCommands>,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_launches_tui() {
        let cli = Cli::try_parse_from(["auraplan"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.profile.is_none());
    }

    #[test]
    fn test_global_profile_flag() {
        let cli = Cli::try_parse_from(["auraplan", "today", "-p", "work"]).unwrap();
        assert_eq!(cli.profile.as_deref(), Some("work"));
        assert!(matches!(cli.command, Some(Commands::Today(_))));
    }

    #[test]
    fn test_class_add_requires_times() {
        let result = Cli::try_parse_from(["auraplan", "class", "add", "Math", "--day", "Monday"]);
        assert!(result.is_err());
    }
}
