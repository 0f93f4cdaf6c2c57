//! Navigation sidebar

use ratatui::prelude::*;
use ratatui::widgets::*;

use super::navigation::View;
use super::styles::{Theme, ThemeMode};

pub const SIDEBAR_WIDTH: u16 = 22;

pub fn render(
    frame: &mut Frame,
    area: Rect,
    current: View,
    mode: ThemeMode,
    profile: &str,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(theme.border))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(inner);

    let brand = vec![
        Line::from(Span::styled("AuraPlan", Style::default().fg(theme.title).bold())),
        Line::from(Span::styled(
            format!("profile: {}", profile),
            Style::default().fg(theme.dimmed),
        )),
    ];
    frame.render_widget(Paragraph::new(brand), chunks[0]);

    let items: Vec<Line> = View::ALL
        .iter()
        .map(|view| {
            let active = *view == current;
            let style = if active {
                Style::default().fg(theme.background).bg(theme.accent).bold()
            } else {
                Style::default().fg(theme.text)
            };
            Line::from(vec![
                Span::styled(format!(" {} ", view.shortcut()), Style::default().fg(theme.hint)),
                Span::styled(format!(" {:<12}", view.label()), style),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(items), chunks[1]);

    let toggle_label = match mode {
        ThemeMode::Light => "Dark Mode",
        ThemeMode::Dark => "Light Mode",
    };
    let footer = vec![
        Line::from(vec![
            Span::styled(" t ", Style::default().fg(theme.hint)),
            Span::styled(toggle_label, Style::default().fg(theme.text)),
        ]),
        Line::from(vec![
            Span::styled(" ? ", Style::default().fg(theme.hint)),
            Span::styled("Help", Style::default().fg(theme.text)),
        ]),
    ];
    frame.render_widget(Paragraph::new(footer), chunks[2]);
}
