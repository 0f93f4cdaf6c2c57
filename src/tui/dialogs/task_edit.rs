//! Edit task text dialog

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use super::DialogResult;
use crate::tui::components::render_text_field;
use crate::tui::styles::Theme;

pub struct TaskEditDialog {
    task_id: String,
    text: Input,
}

impl TaskEditDialog {
    pub fn new(task_id: &str, current_text: &str) -> Self {
        Self {
            task_id: task_id.to_string(),
            text: Input::new(current_text.to_string()),
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Submits the new text; blank text keeps the dialog open.
    pub fn handle_key(&mut self, key: KeyEvent) -> DialogResult<String> {
        match key.code {
            KeyCode::Esc => DialogResult::Cancel,
            KeyCode::Enter => {
                let value = self.text.value();
                if value.trim().is_empty() {
                    DialogResult::Continue
                } else {
                    DialogResult::Submit(value.to_string())
                }
            }
            _ => {
                self.text.handle_event(&crossterm::event::Event::Key(key));
                DialogResult::Continue
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let dialog_area = super::centered_rect(area, 60, 7);
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .style(Style::default().bg(theme.background))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .title(" Edit Task ")
            .title_style(Style::default().fg(theme.title).bold());

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Length(2), Constraint::Min(1)])
            .split(inner);

        render_text_field(frame, chunks[0], "Task:", &self.text, true, None, theme);

        let hint = Line::from(vec![
            Span::styled("Enter", Style::default().fg(theme.hint)),
            Span::raw(" save changes  "),
            Span::styled("Esc", Style::default().fg(theme.hint)),
            Span::raw(" cancel"),
        ]);
        frame.render_widget(Paragraph::new(hint), chunks[1]);
    }
}
