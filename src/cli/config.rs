//! `auraplan config` subcommands implementation

use anyhow::{bail, Result};
use clap::Subcommand;

use crate::planner::{config_path, load_config, save_config};

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,

    /// Print the configuration file path
    Path,

    /// Set the default theme (light or dark)
    SetTheme {
        /// Theme name
        name: String,
    },
}

pub async fn run(command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show_config(),
        ConfigCommands::Path => {
            println!("{}", config_path()?.display());
            Ok(())
        }
        ConfigCommands::SetTheme { name } => set_theme(&name),
    }
}

fn show_config() -> Result<()> {
    let mut config = load_config()?.unwrap_or_default();
    if config.ai.api_key.is_some() {
        config.ai.api_key = Some("********".to_string());
    }
    print!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

fn set_theme(name: &str) -> Result<()> {
    let name = name.trim().to_lowercase();
    if name != "light" && name != "dark" {
        bail!("Unknown theme '{}'. Use light or dark.", name);
    }

    let mut config = load_config()?.unwrap_or_default();
    config.theme.name = name;
    save_config(&config)?;
    println!("✓ Theme set to: {}", config.theme.name);
    Ok(())
}
