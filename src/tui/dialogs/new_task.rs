//! New task dialog

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use super::DialogResult;
use crate::planner::Category;
use crate::tui::components::render_text_field;
use crate::tui::styles::Theme;

#[derive(Debug, Clone, PartialEq)]
pub struct NewTaskData {
    pub text: String,
    pub category: Category,
}

pub struct NewTaskDialog {
    text: Input,
    category: Category,
    focused_field: usize,
}

impl Default for NewTaskDialog {
    fn default() -> Self {
        Self::new()
    }
}

impl NewTaskDialog {
    pub fn new() -> Self {
        Self {
            text: Input::default(),
            category: Category::Personal,
            focused_field: 0,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogResult<NewTaskData> {
        match key.code {
            KeyCode::Esc => DialogResult::Cancel,
            KeyCode::Enter => {
                let text = self.text.value().trim();
                if text.is_empty() {
                    return DialogResult::Continue;
                }
                DialogResult::Submit(NewTaskData {
                    text: text.to_string(),
                    category: self.category,
                })
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.focused_field = 1 - self.focused_field;
                DialogResult::Continue
            }
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if self.focused_field == 1 => {
                self.category = self.category.next();
                DialogResult::Continue
            }
            _ => {
                if self.focused_field == 0 {
                    self.text.handle_event(&crossterm::event::Event::Key(key));
                }
                DialogResult::Continue
            }
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let dialog_area = super::centered_rect(area, 60, 9);
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .style(Style::default().bg(theme.background))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent))
            .title(" New Task ")
            .title_style(Style::default().fg(theme.title).bold());

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Min(1),
            ])
            .split(inner);

        render_text_field(
            frame,
            chunks[0],
            "Task:",
            &self.text,
            self.focused_field == 0,
            Some("What needs to be done?"),
            theme,
        );

        let category_focused = self.focused_field == 1;
        let label_style = if category_focused {
            Style::default().fg(theme.accent).underlined()
        } else {
            Style::default().fg(theme.text)
        };
        let mut spans = vec![Span::styled("Category:", label_style), Span::raw(" ")];
        for category in Category::ALL {
            let style = if category == self.category {
                Style::default().fg(theme.category(category)).bold()
            } else {
                Style::default().fg(theme.dimmed)
            };
            let marker = if category == self.category { "●" } else { "○" };
            spans.push(Span::styled(format!("{} {}  ", marker, category), style));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);

        let hint = Line::from(vec![
            Span::styled("Tab", Style::default().fg(theme.hint)),
            Span::raw(" field  "),
            Span::styled("←/→", Style::default().fg(theme.hint)),
            Span::raw(" category  "),
            Span::styled("Enter", Style::default().fg(theme.hint)),
            Span::raw(" add  "),
            Span::styled("Esc", Style::default().fg(theme.hint)),
            Span::raw(" cancel"),
        ]);
        frame.render_widget(Paragraph::new(hint), chunks[2]);
    }
}
