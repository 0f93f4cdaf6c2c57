//! Add/edit class session dialog

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::*;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use super::DialogResult;
use crate::planner::{ClassForm, ClassSession};
use crate::tui::components::{render_error, render_text_field};
use crate::tui::styles::Theme;

const FIELD_COUNT: usize = 6;
const LABELS: [&str; FIELD_COUNT] = [
    "Subject:", "Day:    ", "Start:  ", "End:    ", "Room:   ", "Color:  ",
];
const PLACEHOLDERS: [&str; FIELD_COUNT] = [
    "e.g. Linear Algebra",
    "Monday",
    "HH:MM",
    "HH:MM",
    "optional",
    "accent, blue, #ff8800 ...",
];

/// Either a validated session to save, or a request to delete the one being edited.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassFormOutcome {
    Save(ClassSession),
    Delete(String),
}

pub struct ClassFormDialog {
    editing_id: Option<String>,
    fields: [Input; FIELD_COUNT],
    focused_field: usize,
    error_message: Option<String>,
}

impl ClassFormDialog {
    fn from_form(form: ClassForm, editing_id: Option<String>) -> Self {
        Self {
            editing_id,
            fields: [
                Input::new(form.subject),
                Input::new(form.day),
                Input::new(form.start_time),
                Input::new(form.end_time),
                Input::new(form.room),
                Input::new(form.color),
            ],
            focused_field: 0,
            error_message: None,
        }
    }

    /// Empty form for the calendar slot at `day`/`hour`.
    pub fn for_slot(day: &str, hour: u32) -> Self {
        Self::from_form(ClassForm::for_slot(day, hour), None)
    }

    pub fn edit(session: &ClassSession) -> Self {
        Self::from_form(ClassForm::from_session(session), Some(session.id.clone()))
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    fn form(&self) -> ClassForm {
        let [subject, day, start, end, room, color] = &self.fields;
        ClassForm {
            subject: subject.value().to_string(),
            day: day.value().to_string(),
            start_time: start.value().to_string(),
            end_time: end.value().to_string(),
            room: room.value().to_string(),
            color: color.value().to_string(),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogResult<ClassFormOutcome> {
        match key.code {
            KeyCode::Esc => DialogResult::Cancel,
            KeyCode::Enter => match self.form().validate(self.editing_id.as_deref()) {
                Ok(session) => DialogResult::Submit(ClassFormOutcome::Save(session)),
                Err(message) => {
                    self.error_message = Some(message);
                    DialogResult::Continue
                }
            },
            KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                match &self.editing_id {
                    Some(id) => DialogResult::Submit(ClassFormOutcome::Delete(id.clone())),
                    None => DialogResult::Continue,
                }
            }
            KeyCode::Tab | KeyCode::Down => {
                self.focused_field = (self.focused_field + 1) % FIELD_COUNT;
                DialogResult::Continue
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focused_field = (self.focused_field + FIELD_COUNT - 1) % FIELD_COUNT;
                DialogResult::Continue
            }
            _ => {
                self.fields[self.focused_field].handle_event(&crossterm::event::Event::Key(key));
                self.error_message = None;
                DialogResult::Continue
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let dialog_area = super::centered_rect(area, 56, 14);
        frame.render_widget(Clear, dialog_area);

        let title = if self.is_editing() {
            " Edit Class "
        } else {
            " Add Class "
        };
        let block = Block::default()
            .style(Style::default().bg(theme.background))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .title(title)
            .title_style(Style::default().fg(theme.title).bold());

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let mut constraints = vec![Constraint::Length(1); FIELD_COUNT];
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Length(1));
        constraints.push(Constraint::Min(1));
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(1)
            .vertical_margin(1)
            .constraints(constraints)
            .split(inner);

        for (i, input) in self.fields.iter().enumerate() {
            render_text_field(
                frame,
                chunks[i],
                LABELS[i],
                input,
                i == self.focused_field,
                Some(PLACEHOLDERS[i]),
                theme,
            );
        }

        render_error(frame, chunks[FIELD_COUNT + 1], self.error_message(), theme);

        let mut hint = vec![
            Span::styled("Tab", Style::default().fg(theme.hint)),
            Span::raw(" next  "),
            Span::styled("Enter", Style::default().fg(theme.hint)),
            Span::raw(" save  "),
        ];
        if self.is_editing() {
            hint.push(Span::styled("Ctrl+d", Style::default().fg(theme.hint)));
            hint.push(Span::raw(" delete  "));
        }
        hint.push(Span::styled("Esc", Style::default().fg(theme.hint)));
        hint.push(Span::raw(" cancel"));
        frame.render_widget(Paragraph::new(Line::from(hint)), chunks[FIELD_COUNT + 2]);
    }
}
