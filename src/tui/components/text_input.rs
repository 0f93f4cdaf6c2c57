//! Form field rendering shared by dialogs and the import view

use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use tui_input::Input;

use crate::tui::styles::Theme;

/// Splits `value` around the char at `cursor` so it can be drawn in inverse video.
fn split_at_cursor(value: &str, cursor: usize) -> (String, String, String) {
    let before: String = value.chars().take(cursor).collect();
    let at: String = value
        .chars()
        .nth(cursor)
        .map(String::from)
        .unwrap_or_else(|| " ".to_string());
    let after: String = value.chars().skip(cursor + 1).collect();
    (before, at, after)
}

/// Renders `label` followed by the input value, with a block cursor when focused.
/// An unfocused empty field shows `placeholder` dimmed.
pub fn render_text_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    input: &Input,
    is_focused: bool,
    placeholder: Option<&str>,
    theme: &Theme,
) {
    let (label_style, value_style) = if is_focused {
        (
            Style::default().fg(theme.accent).underlined(),
            Style::default().fg(theme.accent),
        )
    } else {
        (Style::default().fg(theme.text), Style::default().fg(theme.text))
    };

    let mut spans = vec![Span::styled(label, label_style), Span::raw(" ")];
    let value = input.value();

    if is_focused {
        let (before, at, after) = split_at_cursor(value, input.visual_cursor());
        spans.push(Span::styled(before, value_style));
        spans.push(Span::styled(
            at,
            Style::default().fg(theme.background).bg(theme.accent),
        ));
        spans.push(Span::styled(after, value_style));
    } else if value.is_empty() {
        if let Some(text) = placeholder {
            spans.push(Span::styled(text, Style::default().fg(theme.dimmed)));
        }
    } else {
        spans.push(Span::styled(value, value_style));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Renders a validation message, or nothing when there is none.
pub fn render_error(frame: &mut Frame, area: Rect, message: Option<&str>, theme: &Theme) {
    if let Some(message) = message {
        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("✗ {}", message),
                Style::default().fg(theme.error),
            )),
            area,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_at_cursor_middle() {
        let (b, a, r) = split_at_cursor("abc", 1);
        assert_eq!((b.as_str(), a.as_str(), r.as_str()), ("a", "b", "c"));
    }

    #[test]
    fn test_split_at_cursor_end_shows_blank_cell() {
        let (b, a, r) = split_at_cursor("abc", 3);
        assert_eq!((b.as_str(), a.as_str(), r.as_str()), ("abc", " ", ""));
    }

    #[test]
    fn test_split_at_cursor_multibyte() {
        let (b, a, r) = split_at_cursor("héllo", 2);
        assert_eq!((b.as_str(), a.as_str(), r.as_str()), ("hé", "l", "lo"));
    }
}
