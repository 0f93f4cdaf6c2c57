//! `auraplan profile` subcommands implementation

use anyhow::{bail, Result};
use clap::Subcommand;
use std::io::{self, Write};

use crate::planner::{self, load_config, save_config, DEFAULT_PROFILE};

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// List all profiles
    #[command(alias = "ls")]
    List,

    /// Create a new profile
    #[command(alias = "new")]
    Create {
        /// Profile name
        name: String,
    },

    /// Delete a profile
    #[command(alias = "rm")]
    Delete {
        /// Profile name
        name: String,
    },

    /// Show or set default profile
    Default {
        /// Profile name (optional, shows current if not provided)
        name: Option<String>,
    },
}

pub async fn run(command: Option<ProfileCommands>) -> Result<()> {
    match command {
        Some(ProfileCommands::List) | None => list_profiles(),
        Some(ProfileCommands::Create { name }) => create_profile(&name),
        Some(ProfileCommands::Delete { name }) => delete_profile(&name),
        Some(ProfileCommands::Default { name }) => {
            if let Some(n) = name {
                set_default_profile(&n)
            } else {
                show_default_profile()
            }
        }
    }
}

fn default_profile() -> Result<String> {
    Ok(load_config()?
        .map(|c| c.default_profile)
        .unwrap_or_else(|| DEFAULT_PROFILE.to_string()))
}

fn list_profiles() -> Result<()> {
    let profiles = planner::list_profiles()?;
    let default_profile = default_profile()?;

    if profiles.is_empty() {
        println!("No profiles found.");
        println!("Run 'auraplan' to create the default profile automatically.");
        return Ok(());
    }

    println!("Profiles:");
    for p in &profiles {
        if *p == default_profile {
            println!("  * {} (default)", p);
        } else {
            println!("    {}", p);
        }
    }
    println!("\nTotal: {} profiles", profiles.len());

    Ok(())
}

fn create_profile(name: &str) -> Result<()> {
    if planner::list_profiles()?.iter().any(|p| p == name) {
        bail!("Profile '{}' already exists", name);
    }
    planner::get_profile_dir(name)?;
    println!("✓ Created profile: {}", name);
    println!("  Use with: auraplan -p {}", name);
    Ok(())
}

fn delete_profile(name: &str) -> Result<()> {
    planner::validate_profile_name(name)?;
    print!(
        "Are you sure you want to delete profile '{}'? This will remove its classes and tasks. [y/N] ",
        name
    );
    io::stdout().flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;

    if response.trim().to_lowercase() != "y" {
        println!("Cancelled.");
        return Ok(());
    }

    planner::delete_profile(name)?;
    println!("✓ Deleted profile: {}", name);
    Ok(())
}

fn show_default_profile() -> Result<()> {
    println!("Default profile: {}", default_profile()?);
    Ok(())
}

fn set_default_profile(name: &str) -> Result<()> {
    // Verify profile exists
    let profiles = planner::list_profiles()?;
    if !profiles.contains(&name.to_string()) {
        bail!("Profile '{}' does not exist", name);
    }

    let mut config = load_config()?.unwrap_or_default();
    config.default_profile = name.to_string();
    save_config(&config)?;
    println!("✓ Default profile set to: {}", name);
    Ok(())
}
