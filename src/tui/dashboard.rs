//! Dashboard view - today's classes alongside pending tasks

use chrono::{Datelike, NaiveDateTime};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::app::Action;
use super::styles::Theme;
use crate::planner::{day_label, is_current, is_past, ClassSession, PlannerState, Task, TaskList};

const RECENTLY_COMPLETED: usize = 3;

fn ordinal_suffix(day: u32) -> &'static str {
    match (day % 10, day % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    }
}

/// `Monday, March 10th, 2025`
pub fn long_date(now: NaiveDateTime) -> String {
    format!(
        "{}, {} {}{}, {}",
        day_label(now.weekday()),
        now.format("%B"),
        now.day(),
        ordinal_suffix(now.day()),
        now.year()
    )
}

#[derive(Debug, Default)]
pub struct DashboardView {
    cursor: usize,
}

impl DashboardView {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    fn selected<'a>(&self, tasks: &'a TaskList) -> Option<&'a Task> {
        tasks.pending().nth(self.cursor)
    }

    pub fn clamp(&mut self, pending: usize) {
        if self.cursor >= pending {
            self.cursor = pending.saturating_sub(1);
        }
    }

    /// Keys act on the pending task list; the schedule is display only.
    pub fn handle_key(&mut self, key: KeyEvent, tasks: &TaskList) -> Option<Action> {
        let pending = tasks.pending_count();
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.cursor + 1 < pending {
                    self.cursor += 1;
                }
            }
            KeyCode::Char(' ') | KeyCode::Char('x') => {
                return self
                    .selected(tasks)
                    .map(|t| Action::ToggleTask(t.id.clone()));
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                return self.selected(tasks).map(|t| Action::EditTask(t.id.clone()));
            }
            KeyCode::Char('n') => return Some(Action::NewTask),
            _ => {}
        }
        None
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        state: &PlannerState,
        reminders_on: bool,
        now: NaiveDateTime,
        theme: &Theme,
    ) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(5)])
            .split(area);

        self.render_header(frame, rows[0], reminders_on, now, theme);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);

        let today = state.timetable().for_day(day_label(now.weekday()));
        render_schedule(frame, columns[0], &today, now, theme);
        self.render_tasks(frame, columns[1], state.tasks(), theme);
    }

    fn render_header(
        &self,
        frame: &mut Frame,
        area: Rect,
        reminders_on: bool,
        now: NaiveDateTime,
        theme: &Theme,
    ) {
        let reminder = if reminders_on {
            Span::styled("🔔 Reminders On", Style::default().fg(theme.success))
        } else {
            Span::styled(
                "Reminders off (press r to enable)",
                Style::default().fg(theme.dimmed),
            )
        };
        let lines = vec![
            Line::from(Span::styled(
                "Today's Overview",
                Style::default().fg(theme.title).bold(),
            )),
            Line::from(reminder),
            Line::from(vec![
                Span::styled(
                    now.format("%-I:%M %p").to_string(),
                    Style::default().fg(theme.text).bold(),
                ),
                Span::styled(
                    format!("  {}", long_date(now)),
                    Style::default().fg(theme.dimmed),
                ),
            ]),
        ];
        frame.render_widget(
            Paragraph::new(lines).block(Block::default().padding(Padding::horizontal(1))),
            area,
        );
    }

    fn render_tasks(&self, frame: &mut Frame, area: Rect, tasks: &TaskList, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" Tasks ")
            .title_style(Style::default().fg(theme.title).bold())
            .title_top(
                Line::from(Span::styled(
                    format!(" {} Pending ", tasks.pending_count()),
                    Style::default().fg(theme.accent),
                ))
                .right_aligned(),
            );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let mut lines: Vec<Line> = Vec::new();
        if tasks.pending_count() == 0 {
            lines.push(Line::from(""));
            lines.push(
                Line::from("All caught up!")
                    .style(Style::default().fg(theme.dimmed))
                    .centered(),
            );
        }
        for (idx, task) in tasks.pending().enumerate() {
            let mut line = Line::from(vec![
                Span::styled(" ○ ", Style::default().fg(theme.hint)),
                Span::styled("● ", Style::default().fg(theme.category(task.category))),
                Span::styled(task.text.as_str(), Style::default().fg(theme.text)),
            ]);
            if idx == self.cursor {
                line = line.style(Style::default().bg(theme.selection));
            }
            lines.push(line);
        }

        let completed: Vec<&Task> = tasks.completed().take(RECENTLY_COMPLETED).collect();
        if !completed.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                " COMPLETED",
                Style::default().fg(theme.dimmed).bold(),
            )));
            for task in completed {
                lines.push(Line::from(vec![
                    Span::styled(" ✓ ", Style::default().fg(theme.success)),
                    Span::styled(
                        task.text.as_str(),
                        Style::default()
                            .fg(theme.dimmed)
                            .add_modifier(Modifier::CROSSED_OUT),
                    ),
                ]));
            }
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

fn render_schedule(
    frame: &mut Frame,
    area: Rect,
    today: &[&ClassSession],
    now: NaiveDateTime,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title(" Class Schedule ")
        .title_style(Style::default().fg(theme.title).bold())
        .title_top(
            Line::from(Span::styled(
                format!(" {} ", now.format("%b %-d")),
                Style::default().fg(theme.dimmed),
            ))
            .right_aligned(),
        );
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if today.is_empty() {
        let empty = vec![
            Line::from(""),
            Line::from("No classes scheduled.").style(Style::default().fg(theme.dimmed)),
            Line::from("Enjoy your day!").style(Style::default().fg(theme.dimmed)),
        ];
        frame.render_widget(Paragraph::new(empty).alignment(Alignment::Center), inner);
        return;
    }

    let mut lines = Vec::new();
    for session in today {
        let past = is_past(&session.end_time, now);
        let current = is_current(session, now);

        let (node, subject_style, detail_style) = if current {
            (
                "◉",
                Style::default().fg(theme.current).bold(),
                Style::default().fg(theme.current),
            )
        } else if past {
            (
                "○",
                Style::default()
                    .fg(theme.dimmed)
                    .add_modifier(Modifier::CROSSED_OUT),
                Style::default().fg(theme.dimmed),
            )
        } else {
            (
                "○",
                Style::default().fg(theme.text).bold(),
                Style::default().fg(theme.hint),
            )
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {:>5} ", session.start_time), detail_style),
            Span::styled(format!("{} ", node), detail_style),
            Span::styled(session.subject.as_str(), subject_style),
        ]));
        let mut detail = session.time_range();
        if let Some(room) = &session.room {
            detail.push_str(&format!(" • Room {}", room));
        }
        lines.push(Line::from(vec![
            Span::styled("       │ ", Style::default().fg(theme.border)),
            Span::styled(detail, detail_style),
        ]));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
