//! Loaded planner state with persist-on-change mutations

use anyhow::Result;
use chrono::Local;
use tracing::info;

use super::{Category, ClassSession, Config, Storage, TaskList, Timetable};

pub struct PlannerState {
    storage: Storage,
    timetable: Timetable,
    tasks: TaskList,
    persist_tasks: bool,
}

impl PlannerState {
    /// Rehydrates classes from storage. Tasks come from `tasks.json` when
    /// persistence is enabled, otherwise from the placeholder seed.
    pub fn load(storage: Storage, config: &Config) -> Result<Self> {
        let timetable = Timetable::new(storage.load_classes()?);
        let tasks = if config.tasks.persist {
            TaskList::new(storage.load_tasks()?)
        } else if config.tasks.seed_placeholders {
            TaskList::seeded(Local::now())
        } else {
            TaskList::default()
        };

        info!(
            "Loaded profile '{}': {} classes, {} tasks",
            storage.profile(),
            timetable.len(),
            tasks.len()
        );

        Ok(Self {
            storage,
            timetable,
            tasks,
            persist_tasks: config.tasks.persist,
        })
    }

    pub fn profile(&self) -> &str {
        self.storage.profile()
    }

    pub fn timetable(&self) -> &Timetable {
        &self.timetable
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn persists_tasks(&self) -> bool {
        self.persist_tasks
    }

    pub fn save_class(&mut self, session: ClassSession) -> Result<()> {
        self.timetable.upsert(session);
        self.save_classes()
    }

    pub fn remove_class(&mut self, id: &str) -> Result<bool> {
        let removed = self.timetable.remove(id);
        if removed {
            self.save_classes()?;
        }
        Ok(removed)
    }

    /// Appends imported sessions; an empty import leaves storage untouched.
    pub fn import_classes(&mut self, sessions: Vec<ClassSession>) -> Result<usize> {
        let added = self.timetable.extend(sessions);
        if added > 0 {
            self.save_classes()?;
        }
        Ok(added)
    }

    pub fn add_task(&mut self, text: &str, category: Category) -> Result<Option<String>> {
        let id = self.tasks.add(text, category).map(|t| t.id.clone());
        if id.is_some() {
            self.save_tasks()?;
        }
        Ok(id)
    }

    pub fn toggle_task(&mut self, id: &str) -> Result<bool> {
        let changed = self.tasks.toggle(id);
        if changed {
            self.save_tasks()?;
        }
        Ok(changed)
    }

    pub fn edit_task(&mut self, id: &str, text: &str) -> Result<bool> {
        let changed = self.tasks.edit_text(id, text);
        if changed {
            self.save_tasks()?;
        }
        Ok(changed)
    }

    pub fn remove_task(&mut self, id: &str) -> Result<bool> {
        let changed = self.tasks.remove(id);
        if changed {
            self.save_tasks()?;
        }
        Ok(changed)
    }

    fn save_classes(&self) -> Result<()> {
        self.storage.save_classes(self.timetable.all())
    }

    fn save_tasks(&self) -> Result<()> {
        if self.persist_tasks {
            self.storage.save_tasks(self.tasks.all())?;
        }
        Ok(())
    }
}
