//! Calendar view - weekly grid of class sessions
//!
//! Rows are hours, columns are weekdays. Zoom scales the cell size; when
//! the grid no longer fits, it scrolls to keep the cursor visible.

use chrono::{Datelike, NaiveDateTime, Timelike};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::app::Action;
use super::styles::Theme;
use crate::cli::truncate;
use crate::planner::{Timetable, WEEKDAYS};

pub const MIN_ZOOM: u16 = 50;
pub const MAX_ZOOM: u16 = 150;
pub const DEFAULT_ZOOM: u16 = 80;
const ZOOM_STEP: u16 = 10;

const TIME_COLUMN_WIDTH: u16 = 7;
const MIN_COLUMN_WIDTH: u16 = 6;
const BASE_ROW_HEIGHT: u16 = 4;

/// Day column width at `zoom` percent; 100% fits all seven days.
pub fn column_width(available: u16, zoom: u16) -> u16 {
    let full = available.saturating_sub(TIME_COLUMN_WIDTH) / WEEKDAYS.len() as u16;
    (full as u32 * zoom as u32 / 100).max(MIN_COLUMN_WIDTH as u32) as u16
}

pub fn row_height(zoom: u16) -> u16 {
    ((BASE_ROW_HEIGHT as u32 * zoom as u32 + 50) / 100).max(1) as u16
}

/// First visible index so that `cursor` lies within a window of `visible` items.
pub fn scroll_offset(cursor: usize, visible: usize, total: usize) -> usize {
    let visible = visible.max(1);
    if total <= visible {
        return 0;
    }
    cursor
        .saturating_sub(visible - 1)
        .min(total - visible)
}

#[derive(Debug)]
pub struct CalendarView {
    hours: Vec<u32>,
    day: usize,
    hour_idx: usize,
    zoom: u16,
}

impl CalendarView {
    pub fn new(hours: Vec<u32>) -> Self {
        Self {
            hours,
            day: 0,
            hour_idx: 0,
            zoom: DEFAULT_ZOOM,
        }
    }

    /// Puts the cursor on today and, when it is on the grid, the current hour.
    pub fn focus_now(&mut self, now: NaiveDateTime) {
        self.day = now.weekday().num_days_from_monday() as usize;
        if let Some(idx) = self.hours.iter().position(|h| *h == now.hour()) {
            self.hour_idx = idx;
        }
    }

    pub fn zoom(&self) -> u16 {
        self.zoom
    }

    /// The (day, hour) slot under the cursor.
    pub fn slot(&self) -> (&'static str, u32) {
        (
            WEEKDAYS[self.day],
            self.hours.get(self.hour_idx).copied().unwrap_or_default(),
        )
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom + ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = self.zoom.saturating_sub(ZOOM_STEP).max(MIN_ZOOM);
    }

    pub fn handle_key(&mut self, key: KeyEvent, timetable: &Timetable) -> Option<Action> {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.day = self.day.saturating_sub(1),
            KeyCode::Right | KeyCode::Char('l') => {
                self.day = (self.day + 1).min(WEEKDAYS.len() - 1)
            }
            KeyCode::Up | KeyCode::Char('k') => self.hour_idx = self.hour_idx.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => {
                self.hour_idx = (self.hour_idx + 1).min(self.hours.len().saturating_sub(1))
            }
            KeyCode::Char('+') | KeyCode::Char('=') => self.zoom_in(),
            KeyCode::Char('-') => self.zoom_out(),
            KeyCode::Char('0') => self.zoom = DEFAULT_ZOOM,
            KeyCode::Enter => {
                let (day, hour) = self.slot();
                return Some(match timetable.at(day, hour).first() {
                    Some(session) => Action::EditClass(session.id.clone()),
                    None => Action::NewClass { day, hour },
                });
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                let (day, hour) = self.slot();
                return timetable
                    .at(day, hour)
                    .first()
                    .map(|s| Action::ConfirmDeleteClass(s.id.clone()));
            }
            _ => {}
        }
        None
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        timetable: &Timetable,
        now: NaiveDateTime,
        theme: &Theme,
    ) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" Weekly Schedule ")
            .title_style(Style::default().fg(theme.title).bold())
            .title_top(
                Line::from(vec![
                    Span::styled(" -/+ ", Style::default().fg(theme.hint)),
                    Span::styled(
                        format!("{}% ", self.zoom),
                        Style::default().fg(theme.accent),
                    ),
                ])
                .right_aligned(),
            );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height < 2 || inner.width <= TIME_COLUMN_WIDTH {
            return;
        }

        let col_w = column_width(inner.width, self.zoom);
        let row_h = row_height(self.zoom);
        let visible_days = ((inner.width - TIME_COLUMN_WIDTH) / col_w).max(1) as usize;
        let visible_hours = ((inner.height - 1) / row_h).max(1) as usize;
        let first_day = scroll_offset(self.day, visible_days, WEEKDAYS.len());
        let first_hour = scroll_offset(self.hour_idx, visible_hours, self.hours.len());

        let today = now.weekday().num_days_from_monday() as usize;
        let buf = frame.buffer_mut();

        // Header row
        Span::styled("Time", Style::default().fg(theme.dimmed).bold())
            .render(Rect::new(inner.x, inner.y, TIME_COLUMN_WIDTH, 1), buf);
        for (col, day) in (first_day..WEEKDAYS.len()).take(visible_days).enumerate() {
            let x = inner.x + TIME_COLUMN_WIDTH + col as u16 * col_w;
            let style = if day == today {
                Style::default().fg(theme.current).bold().underlined()
            } else {
                Style::default().fg(theme.dimmed)
            };
            Line::from(Span::styled(&WEEKDAYS[day][..3], style))
                .centered()
                .render(Rect::new(x, inner.y, col_w, 1), buf);
        }

        for (row, idx) in (first_hour..self.hours.len())
            .take(visible_hours)
            .enumerate()
        {
            let hour = self.hours[idx];
            let y = inner.y + 1 + row as u16 * row_h;
            let height = row_h.min(inner.bottom().saturating_sub(y));
            if height == 0 {
                break;
            }

            let marker = if hour == now.hour() { "●" } else { " " };
            Line::from(vec![
                Span::styled(format!("{:>2}:00", hour), Style::default().fg(theme.hint)),
                Span::styled(format!(" {}", marker), Style::default().fg(theme.current)),
            ])
            .render(Rect::new(inner.x, y, TIME_COLUMN_WIDTH, 1), buf);

            for (col, day) in (first_day..WEEKDAYS.len()).take(visible_days).enumerate() {
                let x = inner.x + TIME_COLUMN_WIDTH + col as u16 * col_w;
                let cell = Rect::new(x, y, col_w.saturating_sub(1), height);
                let selected = day == self.day && idx == self.hour_idx;
                render_cell(
                    buf,
                    cell,
                    timetable,
                    WEEKDAYS[day],
                    hour,
                    selected,
                    day == today,
                    theme,
                );
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn render_cell(
    buf: &mut Buffer,
    cell: Rect,
    timetable: &Timetable,
    day: &str,
    hour: u32,
    selected: bool,
    is_today: bool,
    theme: &Theme,
) {
    let background = if selected {
        Style::default().bg(theme.selection)
    } else {
        Style::default()
    };
    buf.set_style(cell, background);

    let width = cell.width as usize;
    let sessions = timetable.at(day, hour);
    let Some(session) = sessions.first() else {
        let filler = if selected {
            "+"
        } else if is_today {
            "·"
        } else {
            ""
        };
        Span::styled(filler, Style::default().fg(theme.dimmed))
            .render(Rect::new(cell.x, cell.y, cell.width, 1), buf);
        return;
    };

    let color = theme.class_color(session.color.as_deref());
    let mut subject = session.subject.clone();
    if sessions.len() > 1 {
        subject = format!("{} +{}", subject, sessions.len() - 1);
    }
    let mut lines = vec![Line::from(Span::styled(
        truncate(&subject, width),
        Style::default().fg(color).bold(),
    ))];
    lines.push(Line::from(Span::styled(
        truncate(&format!("{}-{}", session.start_time, session.end_time), width),
        Style::default().fg(theme.text),
    )));
    if let Some(room) = &session.room {
        lines.push(Line::from(Span::styled(
            truncate(room, width),
            Style::default().fg(theme.dimmed),
        )));
    }
    Paragraph::new(lines)
        .style(Style::default().bg(if selected {
            theme.selection
        } else {
            theme.background
        }))
        .render(cell, buf);
}
