//! Help overlay component

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::tui::dialogs::centered_rect;
use crate::tui::styles::Theme;

const DIALOG_WIDTH: u16 = 52;
const DIALOG_HEIGHT: u16 = 36;
#[cfg(test)]
const BORDER_HEIGHT: u16 = 2;
#[cfg(test)]
const BORDER_WIDTH: u16 = 2;
#[cfg(test)]
const KEY_COLUMN_WIDTH: usize = 14; // 2 spaces indent + 12 chars for key

fn shortcuts() -> Vec<(&'static str, Vec<(&'static str, &'static str)>)> {
    vec![
        (
            "Global",
            vec![
                ("1-4", "Dashboard/Calendar/Tasks/Import"),
                ("Tab", "Next view"),
                ("Backspace", "Previous view"),
                ("t", "Toggle light/dark theme"),
                ("r", "Toggle class reminders"),
                ("?", "Toggle help"),
                ("q", "Quit"),
            ],
        ),
        (
            "Tasks",
            vec![
                ("j/k", "Move selection"),
                ("n/a", "New task"),
                ("Space/x", "Toggle completed"),
                ("e", "Edit task text"),
                ("d", "Delete task"),
                ("s", "Toggle sort by date"),
            ],
        ),
        (
            "Calendar",
            vec![
                ("h/j/k/l", "Move between slots"),
                ("Enter", "Add or edit class"),
                ("d", "Delete class in slot"),
                ("+/-", "Zoom in/out"),
                ("0", "Reset zoom"),
            ],
        ),
        (
            "Import",
            vec![
                ("Enter", "Extract timetable from file"),
                ("Esc", "Clear path"),
            ],
        ),
    ]
}

#[cfg(test)]
fn content_line_count() -> usize {
    let mut count = 0;
    for (_, keys) in shortcuts() {
        count += 1; // section header
        count += keys.len(); // shortcut lines
        count += 1; // empty line after section
    }
    count
}

pub struct HelpOverlay;

impl HelpOverlay {
    pub fn render(frame: &mut Frame, area: Rect, theme: &Theme) {
        let dialog_area = centered_rect(area, DIALOG_WIDTH, DIALOG_HEIGHT);
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .style(Style::default().bg(theme.background))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" Keyboard Shortcuts ")
            .title_style(Style::default().fg(theme.title).bold());

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let mut lines: Vec<Line> = Vec::new();
        for (section, keys) in shortcuts() {
            lines.push(Line::from(Span::styled(
                section,
                Style::default().fg(theme.accent).bold(),
            )));
            for (key, desc) in keys {
                lines.push(Line::from(vec![
                    Span::styled(format!("  {:12}", key), Style::default().fg(theme.hint)),
                    Span::styled(desc, Style::default().fg(theme.text)),
                ]));
            }
            lines.push(Line::from(""));
        }

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_content_fits_in_dialog() {
        let available_height = (DIALOG_HEIGHT - BORDER_HEIGHT) as usize;
        let content_lines = content_line_count();
        assert!(
            content_lines <= available_height,
            "Help content ({content_lines} lines) exceeds dialog inner height ({available_height} lines)"
        );

        let available_width = (DIALOG_WIDTH - BORDER_WIDTH) as usize;
        for (section, keys) in shortcuts() {
            assert!(
                section.len() <= available_width,
                "Section header '{section}' exceeds dialog width ({available_width} chars)"
            );
            for (key, desc) in keys {
                let line_width = KEY_COLUMN_WIDTH + desc.len();
                assert!(
                    line_width <= available_width,
                    "Shortcut '{key}' description '{desc}' exceeds dialog width ({line_width} > {available_width})"
                );
            }
        }
    }

    #[test]
    fn every_view_shortcut_is_documented() {
        let global = shortcuts()
            .into_iter()
            .find(|(section, _)| *section == "Global")
            .map(|(_, keys)| keys)
            .unwrap_or_default();
        assert!(global.iter().any(|(key, _)| *key == "1-4"));
        assert!(global.iter().any(|(key, _)| *key == "q"));
    }
}
