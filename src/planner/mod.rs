//! Planner data: tasks, class sessions, configuration and storage

mod class;
mod config;
mod state;
mod storage;
mod task;

pub use class::*;
pub use config::*;
pub use state::PlannerState;
pub use storage::Storage;
pub use task::*;

use anyhow::Result;
use std::fs;
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_PROFILE: &str = "default";

/// Returns the application directory, creating it on first use.
///
/// Linux follows XDG (`$XDG_CONFIG_HOME/auraplan`), other platforms use
/// `~/.auraplan`.
pub fn get_app_dir() -> Result<PathBuf> {
    let dir = app_dir_path()?;
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

#[cfg(target_os = "linux")]
fn app_dir_path() -> Result<PathBuf> {
    let config_dir =
        dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Cannot find config directory"))?;
    Ok(config_dir.join("auraplan"))
}

#[cfg(not(target_os = "linux"))]
fn app_dir_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?;
    Ok(home.join(".auraplan"))
}

/// Rejects names that would resolve outside `profiles/`.
pub fn validate_profile_name(profile: &str) -> Result<()> {
    let mut components = Path::new(profile).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if profile.trim().is_empty()
        || profile.contains(['/', '\\'])
        || profile.contains("..")
        || !single_normal
    {
        anyhow::bail!("Invalid profile name: '{}'", profile);
    }
    Ok(())
}

pub fn get_profile_dir(profile: &str) -> Result<PathBuf> {
    validate_profile_name(profile)?;
    let dir = get_app_dir()?.join("profiles").join(profile);
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    Ok(dir)
}

pub fn list_profiles() -> Result<Vec<String>> {
    let profiles_dir = get_app_dir()?.join("profiles");
    if !profiles_dir.exists() {
        return Ok(Vec::new());
    }

    let mut profiles: Vec<String> = fs::read_dir(&profiles_dir)?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .collect();
    profiles.sort();
    Ok(profiles)
}

/// Removes a profile directory and everything in it.
pub fn delete_profile(profile: &str) -> Result<()> {
    validate_profile_name(profile)?;
    if profile == DEFAULT_PROFILE {
        anyhow::bail!("Cannot delete the default profile");
    }
    if !list_profiles()?.iter().any(|p| p == profile) {
        anyhow::bail!("Profile '{}' does not exist", profile);
    }
    let dir = get_app_dir()?.join("profiles").join(profile);
    fs::remove_dir_all(&dir)?;
    Ok(())
}
