//! Todo items and the in-memory task list

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Personal,
    Study,
    Urgent,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Personal, Category::Study, Category::Urgent];

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "personal" => Some(Self::Personal),
            "study" => Some(Self::Study),
            "urgent" => Some(Self::Urgent),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Study => "study",
            Self::Urgent => "urgent",
        }
    }

    /// Next category in selector order, wrapping around.
    pub fn next(&self) -> Self {
        match self {
            Self::Personal => Self::Study,
            Self::Study => Self::Urgent,
            Self::Urgent => Self::Personal,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<DateTime<Local>>,
}

impl Task {
    /// New tasks are stamped with the creation time as their due date.
    pub fn new(text: &str, category: Category) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            text: text.to_string(),
            completed: false,
            category,
            due: Some(Local::now()),
        }
    }

    pub fn due_label(&self) -> Option<String> {
        self.due.map(|d| d.format("%b %-d, %-I:%M %p").to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Default,
    DueDate,
}

impl SortMode {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Default => Self::DueDate,
            Self::DueDate => Self::Default,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Default => "Sort by Date",
            Self::DueDate => "Sorted by Date",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    /// Placeholder entries shown on a fresh start.
    pub fn seeded(now: DateTime<Local>) -> Self {
        let mut math = Task::new("Complete Math Assignment", Category::Study);
        math.due = Some(now);

        let mut groceries = Task::new("Buy groceries", Category::Personal);
        groceries.completed = true;
        groceries.due = None;

        let mut quiz = Task::new("Prepare for Physics Quiz", Category::Urgent);
        quiz.due = None;

        Self::new(vec![math, groceries, quiz])
    }

    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Adds a task; blank text is rejected.
    pub fn add(&mut self, text: &str, category: Category) -> Option<&Task> {
        if text.trim().is_empty() {
            return None;
        }
        self.tasks.push(Task::new(text, category));
        self.tasks.last()
    }

    pub fn toggle(&mut self, id: &str) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                true
            }
            None => false,
        }
    }

    pub fn edit_text(&mut self, id: &str, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.text = text.to_string();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    pub fn pending(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.completed)
    }

    pub fn completed(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.completed)
    }

    pub fn pending_count(&self) -> usize {
        self.pending().count()
    }

    pub fn completed_count(&self) -> usize {
        self.completed().count()
    }

    /// Tasks in display order for the given mode.
    ///
    /// `DueDate` puts pending tasks first, ordered by ascending due time
    /// (a missing due date sorts as the epoch). Completed tasks keep their
    /// relative order.
    pub fn sorted(&self, mode: SortMode) -> Vec<&Task> {
        let mut sorted: Vec<&Task> = self.tasks.iter().collect();
        if mode == SortMode::DueDate {
            sorted.sort_by(|a, b| {
                if a.completed != b.completed {
                    return a.completed.cmp(&b.completed);
                }
                if a.completed {
                    return std::cmp::Ordering::Equal;
                }
                due_millis(a).cmp(&due_millis(b))
            });
        }
        sorted
    }
}

fn due_millis(task: &Task) -> i64 {
    task.due.map(|d| d.timestamp_millis()).unwrap_or(0)
}
