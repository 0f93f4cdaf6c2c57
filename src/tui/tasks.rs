//! Tasks view - full todo list with sorting

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::app::Action;
use super::styles::Theme;
use crate::planner::{SortMode, Task, TaskList};

#[derive(Debug, Default)]
pub struct TasksView {
    cursor: usize,
    sort: SortMode,
}

impl TasksView {
    pub fn sort_mode(&self) -> SortMode {
        self.sort
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn selected<'a>(&self, tasks: &'a TaskList) -> Option<&'a Task> {
        tasks.sorted(self.sort).get(self.cursor).copied()
    }

    /// Keeps the cursor on a row after the list shrank.
    pub fn clamp(&mut self, len: usize) {
        if self.cursor >= len {
            self.cursor = len.saturating_sub(1);
        }
    }

    fn move_cursor(&mut self, delta: i32, len: usize) {
        if len == 0 {
            return;
        }
        self.cursor = if delta < 0 {
            self.cursor.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            (self.cursor + delta as usize).min(len - 1)
        };
    }

    pub fn handle_key(&mut self, key: KeyEvent, tasks: &TaskList) -> Option<Action> {
        let len = tasks.len();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1, len),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1, len),
            KeyCode::Home | KeyCode::Char('g') => self.cursor = 0,
            KeyCode::End | KeyCode::Char('G') => self.cursor = len.saturating_sub(1),
            KeyCode::Char('n') | KeyCode::Char('a') => return Some(Action::NewTask),
            KeyCode::Char('s') => {
                self.sort = self.sort.toggle();
                self.cursor = 0;
            }
            KeyCode::Char(' ') | KeyCode::Char('x') => {
                return self
                    .selected(tasks)
                    .map(|t| Action::ToggleTask(t.id.clone()));
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                return self.selected(tasks).map(|t| Action::EditTask(t.id.clone()));
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                return self
                    .selected(tasks)
                    .map(|t| Action::ConfirmDeleteTask(t.id.clone()));
            }
            _ => {}
        }
        None
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, tasks: &TaskList, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" My Tasks ")
            .title_style(Style::default().fg(theme.title).bold());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Min(1)])
            .split(inner);

        let header = Line::from(vec![
            Span::styled(
                format!(" {} pending", tasks.pending_count()),
                Style::default().fg(theme.text).bold(),
            ),
            Span::styled(
                format!(" · {} done", tasks.completed_count()),
                Style::default().fg(theme.dimmed),
            ),
            Span::raw("   "),
            Span::styled("[s] ", Style::default().fg(theme.hint)),
            Span::styled(self.sort.label(), Style::default().fg(theme.accent)),
        ]);
        frame.render_widget(Paragraph::new(header), chunks[0]);

        if tasks.is_empty() {
            let empty = vec![
                Line::from(""),
                Line::from("Your list is empty.").style(Style::default().fg(theme.dimmed)),
                Line::from(""),
                Line::from("Press 'n' to add a task").style(Style::default().fg(theme.hint)),
            ];
            frame.render_widget(
                Paragraph::new(empty).alignment(Alignment::Center),
                chunks[1],
            );
            return;
        }

        let items: Vec<ListItem> = tasks
            .sorted(self.sort)
            .into_iter()
            .map(|task| task_item(task, theme))
            .collect();
        let list = List::new(items).highlight_style(Style::default().bg(theme.selection));
        let mut state = ListState::default().with_selected(Some(self.cursor));
        frame.render_stateful_widget(list, chunks[1], &mut state);
    }
}

fn task_item<'a>(task: &'a Task, theme: &Theme) -> ListItem<'a> {
    let (check, text_style) = if task.completed {
        (
            "[x]",
            Style::default().fg(theme.dimmed).add_modifier(Modifier::CROSSED_OUT),
        )
    } else {
        ("[ ]", Style::default().fg(theme.text))
    };

    let mut spans = vec![
        Span::styled(format!(" {} ", check), Style::default().fg(theme.hint)),
        Span::styled("● ", Style::default().fg(theme.category(task.category))),
        Span::styled(task.text.as_str(), text_style),
        Span::styled(
            format!("  {}", task.category),
            Style::default().fg(theme.category(task.category)),
        ),
    ];
    if let Some(due) = task.due_label() {
        spans.push(Span::styled(
            format!("  {}", due),
            Style::default().fg(theme.dimmed),
        ));
    }
    ListItem::new(Line::from(spans))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::Category;
    use chrono::Local;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn tasks() -> TaskList {
        TaskList::seeded(Local::now())
    }

    #[test]
    fn test_cursor_stays_in_bounds() {
        let tasks = tasks();
        let mut view = TasksView::default();
        view.handle_key(key(KeyCode::Char('k')), &tasks);
        assert_eq!(view.cursor(), 0);
        for _ in 0..10 {
            view.handle_key(key(KeyCode::Char('j')), &tasks);
        }
        assert_eq!(view.cursor(), tasks.len() - 1);
    }

    #[test]
    fn test_toggle_targets_selected_row() {
        let tasks = tasks();
        let mut view = TasksView::default();
        view.handle_key(key(KeyCode::Down), &tasks);
        let expected = tasks.all()[1].id.clone();
        assert_eq!(
            view.handle_key(key(KeyCode::Char(' ')), &tasks),
            Some(Action::ToggleTask(expected))
        );
    }

    #[test]
    fn test_selection_follows_sort_mode() {
        let tasks = tasks();
        let mut view = TasksView::default();
        view.handle_key(key(KeyCode::Char('s')), &tasks);
        assert_eq!(view.sort_mode(), SortMode::DueDate);

        // The completed placeholder sorts last by date.
        view.handle_key(key(KeyCode::Char('G')), &tasks);
        match view.handle_key(key(KeyCode::Char('e')), &tasks) {
            Some(Action::EditTask(id)) => {
                assert!(tasks.get(&id).is_some_and(|t| t.completed));
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }

    #[test]
    fn test_actions_on_empty_list() {
        let tasks = TaskList::default();
        let mut view = TasksView::default();
        assert_eq!(view.handle_key(key(KeyCode::Char('x')), &tasks), None);
        assert_eq!(view.handle_key(key(KeyCode::Char('d')), &tasks), None);
        assert_eq!(
            view.handle_key(key(KeyCode::Char('n')), &tasks),
            Some(Action::NewTask)
        );
    }

    #[test]
    fn test_clamp_after_removal() {
        let mut tasks = tasks();
        let mut view = TasksView::default();
        view.handle_key(key(KeyCode::Char('G')), &tasks);
        let last = tasks.all()[2].id.clone();
        tasks.remove(&last);
        view.clamp(tasks.len());
        assert_eq!(view.cursor(), 1);
    }

    #[test]
    fn test_delete_asks_for_confirmation() {
        let mut tasks = TaskList::default();
        tasks.add("Essay", Category::Study);
        let id = tasks.all()[0].id.clone();
        let mut view = TasksView::default();
        assert_eq!(
            view.handle_key(key(KeyCode::Char('d')), &tasks),
            Some(Action::ConfirmDeleteTask(id))
        );
    }
}
