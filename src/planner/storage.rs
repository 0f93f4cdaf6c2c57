//! Planner storage - JSON file persistence

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{get_profile_dir, ClassSession, Task, DEFAULT_PROFILE};

const CLASSES_FILE: &str = "classes.json";
const TASKS_FILE: &str = "tasks.json";

pub struct Storage {
    profile: String,
    classes_path: PathBuf,
    tasks_path: PathBuf,
}

impl Storage {
    pub fn new(profile: &str) -> Result<Self> {
        let profile_name = if profile.is_empty() {
            DEFAULT_PROFILE.to_string()
        } else {
            profile.to_string()
        };

        let profile_dir = get_profile_dir(&profile_name)?;

        Ok(Self {
            profile: profile_name,
            classes_path: profile_dir.join(CLASSES_FILE),
            tasks_path: profile_dir.join(TASKS_FILE),
        })
    }

    pub fn profile(&self) -> &str {
        &self.profile
    }

    pub fn classes_path(&self) -> &Path {
        &self.classes_path
    }

    pub fn load_classes(&self) -> Result<Vec<ClassSession>> {
        load_list(&self.classes_path)
    }

    /// Writes the full class list; called on every change.
    pub fn save_classes(&self, classes: &[ClassSession]) -> Result<()> {
        debug!("Saving {} classes to {}", classes.len(), self.profile);
        save_list(&self.classes_path, classes)
    }

    pub fn load_tasks(&self) -> Result<Vec<Task>> {
        load_list(&self.tasks_path)
    }

    pub fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        debug!("Saving {} tasks to {}", tasks.len(), self.profile);
        save_list(&self.tasks_path, tasks)
    }
}

fn load_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let items: Vec<T> = serde_json::from_str(&content)?;
    Ok(items)
}

fn save_list<T: Serialize>(path: &Path, items: &[T]) -> Result<()> {
    if path.exists() {
        let backup_path = path.with_extension("json.bak");
        if let Err(e) = fs::copy(path, &backup_path) {
            warn!("Failed to create backup: {}", e);
        }
    }

    let content = serde_json::to_string_pretty(items)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::Category;
    use serial_test::serial;
    use tempfile::tempdir;

    fn setup_home(temp: &tempfile::TempDir) {
        std::env::set_var("HOME", temp.path());
        std::env::set_var("XDG_CONFIG_HOME", temp.path().join(".config"));
    }

    #[test]
    #[serial]
    fn test_classes_roundtrip() -> Result<()> {
        let temp = tempdir()?;
        setup_home(&temp);

        let storage = Storage::new("test-profile")?;
        let classes = vec![
            ClassSession::new("Maths", "Monday", "09:00", "10:00"),
            ClassSession::new("Physics", "Tuesday", "11:00", "12:00")
                .with_room(Some("B12".to_string())),
        ];

        storage.save_classes(&classes)?;
        let loaded = storage.load_classes()?;

        assert_eq!(loaded, classes);
        assert_eq!(loaded[1].room.as_deref(), Some("B12"));
        Ok(())
    }

    #[test]
    #[serial]
    fn test_new_with_empty_profile() -> Result<()> {
        let temp = tempdir()?;
        setup_home(&temp);

        let storage = Storage::new("")?;
        assert_eq!(storage.profile(), "default");
        Ok(())
    }

    #[test]
    #[serial]
    fn test_load_nonexistent_file() -> Result<()> {
        let temp = tempdir()?;
        setup_home(&temp);

        let storage = Storage::new("test-empty")?;
        assert!(storage.load_classes()?.is_empty());
        assert!(storage.load_tasks()?.is_empty());
        Ok(())
    }

    #[test]
    #[serial]
    fn test_load_whitespace_only_file() -> Result<()> {
        let temp = tempdir()?;
        setup_home(&temp);

        let storage = Storage::new("test-whitespace")?;
        fs::write(&storage.classes_path, "   \n  \t  ")?;

        assert!(storage.load_classes()?.is_empty());
        Ok(())
    }

    #[test]
    #[serial]
    fn test_load_invalid_json() -> Result<()> {
        let temp = tempdir()?;
        setup_home(&temp);

        let storage = Storage::new("test-invalid")?;
        fs::write(&storage.classes_path, "{ invalid json }")?;

        assert!(storage.load_classes().is_err());
        Ok(())
    }

    #[test]
    #[serial]
    fn test_save_creates_backup() -> Result<()> {
        let temp = tempdir()?;
        setup_home(&temp);

        let storage = Storage::new("test-backup")?;
        storage.save_classes(&[ClassSession::new("Maths", "Monday", "09:00", "10:00")])?;
        storage.save_classes(&[ClassSession::new("Art", "Friday", "14:00", "15:00")])?;

        let backup_path = storage.classes_path.with_extension("json.bak");
        assert!(backup_path.exists());
        assert!(fs::read_to_string(&backup_path)?.contains("Maths"));
        Ok(())
    }

    #[test]
    #[serial]
    fn test_save_empty_array() -> Result<()> {
        let temp = tempdir()?;
        setup_home(&temp);

        let storage = Storage::new("test-empty-save")?;
        storage.save_classes(&[])?;

        let content = fs::read_to_string(&storage.classes_path)?;
        assert_eq!(content.trim(), "[]");
        Ok(())
    }

    #[test]
    #[serial]
    fn test_loads_original_slot_layout() -> Result<()> {
        let temp = tempdir()?;
        setup_home(&temp);

        let storage = Storage::new("test-layout")?;
        fs::write(
            &storage.classes_path,
            r#"[{"id":"1","subject":"Chem","day":"Wednesday","startTime":"10:00","endTime":"11:00","room":"Lab 2"}]"#,
        )?;

        let loaded = storage.load_classes()?;
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].start_time, "10:00");
        assert!(loaded[0].color.is_none());
        Ok(())
    }

    #[test]
    #[serial]
    fn test_tasks_roundtrip() -> Result<()> {
        let temp = tempdir()?;
        setup_home(&temp);

        let storage = Storage::new("test-tasks")?;
        let tasks = vec![Task::new("Essay draft", Category::Study)];
        storage.save_tasks(&tasks)?;

        let loaded = storage.load_tasks()?;
        assert_eq!(loaded, tasks);
        Ok(())
    }

    #[test]
    #[serial]
    fn test_profiles_are_isolated() -> Result<()> {
        let temp = tempdir()?;
        setup_home(&temp);

        let alpha = Storage::new("alpha")?;
        let beta = Storage::new("beta")?;
        alpha.save_classes(&[ClassSession::new("Maths", "Monday", "09:00", "10:00")])?;

        assert_ne!(alpha.classes_path, beta.classes_path);
        assert!(beta.load_classes()?.is_empty());
        Ok(())
    }
}
