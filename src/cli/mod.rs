//! CLI command implementations

pub mod class;
pub mod config;
pub mod definition;
pub mod import;
pub mod profile;
pub mod task;
pub mod today;

pub use definition::{Cli, Commands};

use anyhow::{bail, Result};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::planner::{ClassSession, Task};

/// Picks the single item matching `identifier` by exact id, then by id
/// prefix, then by `label`. Empty identifiers and ambiguous prefixes fail.
fn resolve<'a, T>(
    kind: &str,
    identifier: &str,
    items: &'a [T],
    id: impl Fn(&T) -> &str,
    label: impl Fn(&T) -> &str,
) -> Result<&'a T> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        bail!("{} identifier cannot be empty", kind);
    }

    // Try exact ID match
    if let Some(item) = items.iter().find(|i| id(*i) == identifier) {
        return Ok(item);
    }

    let unique = |matches: Vec<&'a T>, by: &str| -> Result<Option<&'a T>> {
        match matches.len() {
            0 => Ok(None),
            1 => Ok(Some(matches[0])),
            n => bail!(
                "{} '{}' is ambiguous: {} entries match by {}",
                kind,
                identifier,
                n,
                by
            ),
        }
    };

    // Try ID prefix match
    let by_prefix = items.iter().filter(|i| id(*i).starts_with(identifier)).collect();
    if let Some(item) = unique(by_prefix, "ID prefix")? {
        return Ok(item);
    }

    let by_label = items.iter().filter(|i| label(*i) == identifier).collect();
    if let Some(item) = unique(by_label, "name")? {
        return Ok(item);
    }

    bail!("{} not found: {}", kind, identifier)
}

pub fn resolve_class<'a>(identifier: &str, sessions: &'a [ClassSession]) -> Result<&'a ClassSession> {
    resolve("Class", identifier, sessions, |s| &s.id, |s| &s.subject)
}

pub fn resolve_task<'a>(identifier: &str, tasks: &'a [Task]) -> Result<&'a Task> {
    resolve("Task", identifier, tasks, |t| &t.id, |t| &t.text)
}

/// Truncates to `max` display columns, ending in `...` when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let (budget, ellipsis) = if max <= 3 { (max, "") } else { (max - 3, "...") };

    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(ellipsis);
    out
}

/// First `max_len` characters of an id.
pub fn truncate_id(id: &str, max_len: usize) -> &str {
    match id.char_indices().nth(max_len) {
        Some((cut, _)) => &id[..cut],
        None => id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::Category;

    // Tests for truncate function
    #[test]
    fn test_truncate_shorter_than_max() {
        assert_eq!(truncate("hello", 10), "hello");
    }

    #[test]
    fn test_truncate_equal_to_max() {
        assert_eq!(truncate("hello", 5), "hello");
    }

    #[test]
    fn test_truncate_longer_than_max() {
        assert_eq!(truncate("hello world", 8), "hello...");
    }

    #[test]
    fn test_truncate_with_small_max() {
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("hello", 2), "he");
        assert_eq!(truncate("hello", 1), "h");
    }

    #[test]
    fn test_truncate_empty_string() {
        assert_eq!(truncate("", 5), "");
    }

    #[test]
    fn test_truncate_zero_max() {
        assert_eq!(truncate("hello", 0), "");
    }

    #[test]
    fn test_truncate_counts_display_width() {
        // Each CJK character takes two columns
        assert_eq!(truncate("数学课程", 8), "数学课程");
        assert_eq!(truncate("数学课程", 7), "数学...");
        assert_eq!(truncate("Café au lait", 7), "Café...");
    }

    // Tests for truncate_id function
    #[test]
    fn test_truncate_id_shorter_than_max() {
        assert_eq!(truncate_id("abc123", 10), "abc123");
    }

    #[test]
    fn test_truncate_id_longer_than_max() {
        assert_eq!(truncate_id("abc123def456", 8), "abc123de");
    }

    #[test]
    fn test_truncate_id_non_ascii() {
        assert_eq!(truncate_id("数学-0001", 2), "数学");
        assert_eq!(truncate_id("café-id", 4), "café");
        assert_eq!(truncate_id("数学", 8), "数学");
    }

    #[test]
    fn test_resolve_class_by_exact_id() {
        let sessions = vec![
            ClassSession::new("Math", "Monday", "09:00", "10:00"),
            ClassSession::new("Physics", "Tuesday", "11:00", "12:00"),
        ];
        let found = resolve_class(&sessions[1].id, &sessions).unwrap();
        assert_eq!(found.subject, "Physics");
    }

    #[test]
    fn test_resolve_class_by_id_prefix() {
        let sessions = vec![ClassSession::new("Math", "Monday", "09:00", "10:00")];
        let prefix = &sessions[0].id[..8];
        let found = resolve_class(prefix, &sessions).unwrap();
        assert_eq!(found.subject, "Math");
    }

    #[test]
    fn test_resolve_class_not_found() {
        let sessions = vec![ClassSession::new("Math", "Monday", "09:00", "10:00")];
        let result = resolve_class("nonexistent", &sessions);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("Class not found"));
    }

    #[test]
    fn test_resolve_task_by_text() {
        let tasks = vec![
            Task::new("Read chapter 4", Category::Study),
            Task::new("Buy groceries", Category::Personal),
        ];
        let found = resolve_task("Buy groceries", &tasks).unwrap();
        assert_eq!(found.category, Category::Personal);
    }

    #[test]
    fn test_resolve_rejects_empty_identifier() {
        let tasks = vec![Task::new("Read chapter 4", Category::Study)];
        let err = resolve_task("", &tasks).unwrap_err();
        assert!(err.to_string().contains("cannot be empty"));
        assert!(resolve_task("   ", &tasks).is_err());

        let sessions = vec![ClassSession::new("Math", "Monday", "09:00", "10:00")];
        assert!(resolve_class("", &sessions).is_err());
    }

    #[test]
    fn test_resolve_rejects_ambiguous_prefix() {
        let mut tasks = vec![
            Task::new("Essay draft", Category::Study),
            Task::new("Essay final", Category::Study),
        ];
        tasks[0].id = "abc-111".to_string();
        tasks[1].id = "abc-222".to_string();

        let err = resolve_task("abc", &tasks).unwrap_err();
        assert!(err.to_string().contains("ambiguous"));
        assert_eq!(resolve_task("abc-2", &tasks).unwrap().text, "Essay final");
    }

    #[test]
    fn test_resolve_class_by_subject() {
        let sessions = vec![
            ClassSession::new("Math", "Monday", "09:00", "10:00"),
            ClassSession::new("Physics", "Tuesday", "11:00", "12:00"),
        ];
        assert_eq!(resolve_class("Physics", &sessions).unwrap().day, "Tuesday");
    }

    #[test]
    fn test_resolve_task_empty_list() {
        let tasks: Vec<Task> = vec![];
        assert!(resolve_task("anything", &tasks).is_err());
    }
}
