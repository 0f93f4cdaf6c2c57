//! Confirmation dialog

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::DialogResult;
use crate::tui::styles::Theme;

/// What gets deleted once the user confirms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    DeleteTask(String),
    DeleteClass(String),
}

pub struct ConfirmDialog {
    title: String,
    message: String,
    action: ConfirmAction,
    selected: bool, // true = Yes, false = No
}

impl ConfirmDialog {
    pub fn new(title: &str, message: &str, action: ConfirmAction) -> Self {
        Self {
            title: title.to_string(),
            message: message.to_string(),
            action,
            selected: false,
        }
    }

    pub fn action(&self) -> &ConfirmAction {
        &self.action
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DialogResult<ConfirmAction> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => DialogResult::Cancel,
            KeyCode::Enter => {
                if self.selected {
                    DialogResult::Submit(self.action.clone())
                } else {
                    DialogResult::Cancel
                }
            }
            KeyCode::Char('y') | KeyCode::Char('Y') => DialogResult::Submit(self.action.clone()),
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected = true;
                DialogResult::Continue
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.selected = false;
                DialogResult::Continue
            }
            KeyCode::Tab => {
                self.selected = !self.selected;
                DialogResult::Continue
            }
            _ => DialogResult::Continue,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let dialog_area = super::centered_rect(area, 50, 8);

        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .style(Style::default().bg(theme.background))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.error))
            .title(format!(" {} ", self.title))
            .title_style(Style::default().fg(theme.error).bold());

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Min(1), Constraint::Length(2)])
            .split(inner);

        let message = Paragraph::new(&*self.message)
            .style(Style::default().fg(theme.text))
            .wrap(Wrap { trim: true });
        frame.render_widget(message, chunks[0]);

        let yes_style = if self.selected {
            Style::default().fg(theme.error).bold()
        } else {
            Style::default().fg(theme.dimmed)
        };
        let no_style = if !self.selected {
            Style::default().fg(theme.success).bold()
        } else {
            Style::default().fg(theme.dimmed)
        };

        let buttons = Line::from(vec![
            Span::raw("  "),
            Span::styled("[Yes]", yes_style),
            Span::raw("    "),
            Span::styled("[No]", no_style),
        ]);

        frame.render_widget(
            Paragraph::new(buttons).alignment(Alignment::Center),
            chunks[1],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn dialog() -> ConfirmDialog {
        ConfirmDialog::new(
            "Delete Task",
            "Are you sure?",
            ConfirmAction::DeleteTask("t1".to_string()),
        )
    }

    #[test]
    fn test_default_selection_is_no() {
        assert!(!dialog().selected);
    }

    #[test]
    fn test_action_accessor() {
        let d = ConfirmDialog::new(
            "Delete Class",
            "Sure?",
            ConfirmAction::DeleteClass("c1".to_string()),
        );
        assert_eq!(d.action(), &ConfirmAction::DeleteClass("c1".to_string()));
    }

    #[test]
    fn test_esc_and_n_cancel() {
        let mut d = dialog();
        assert!(matches!(d.handle_key(key(KeyCode::Esc)), DialogResult::Cancel));
        assert!(matches!(
            d.handle_key(key(KeyCode::Char('N'))),
            DialogResult::Cancel
        ));
    }

    #[test]
    fn test_y_confirms_with_action() {
        let mut d = dialog();
        match d.handle_key(key(KeyCode::Char('y'))) {
            DialogResult::Submit(ConfirmAction::DeleteTask(id)) => assert_eq!(id, "t1"),
            _ => panic!("Expected Submit"),
        }
    }

    #[test]
    fn test_enter_with_no_selected_cancels() {
        let mut d = dialog();
        assert!(matches!(d.handle_key(key(KeyCode::Enter)), DialogResult::Cancel));
    }

    #[test]
    fn test_enter_with_yes_selected_submits() {
        let mut d = dialog();
        d.handle_key(key(KeyCode::Left));
        assert!(matches!(
            d.handle_key(key(KeyCode::Enter)),
            DialogResult::Submit(_)
        ));
    }

    #[test]
    fn test_tab_toggles_selection() {
        let mut d = dialog();
        d.handle_key(key(KeyCode::Tab));
        assert!(d.selected);
        d.handle_key(key(KeyCode::Tab));
        assert!(!d.selected);
    }

    #[test]
    fn test_h_and_l_move_selection() {
        let mut d = dialog();
        d.handle_key(key(KeyCode::Char('h')));
        assert!(d.selected);
        d.handle_key(key(KeyCode::Char('l')));
        assert!(!d.selected);
    }

    #[test]
    fn test_unknown_key_continues() {
        let mut d = dialog();
        assert!(matches!(
            d.handle_key(key(KeyCode::Char('x'))),
            DialogResult::Continue
        ));
    }
}
