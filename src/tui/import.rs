//! Import view - timetable file selection and extraction status

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::prelude::*;
use ratatui::widgets::*;
use std::path::PathBuf;
use tui_input::backend::crossterm::EventHandler;
use tui_input::Input;

use super::app::Action;
use super::components::{render_error, render_text_field};
use super::styles::Theme;
use crate::ai::{detect_mime, ExtractError};

const SPINNER_FRAMES: &[char] = &['◐', '◓', '◑', '◒'];

/// Expands a leading `~/` to the home directory.
fn expand_home(raw: &str) -> PathBuf {
    match raw.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(raw)),
        None => PathBuf::from(raw),
    }
}

#[derive(Default)]
pub struct ImportState {
    path: Input,
    selected: Option<PathBuf>,
    loading: bool,
    error: Option<String>,
    imported: Option<usize>,
    spinner: usize,
}

impl ImportState {
    pub fn selected(&self) -> Option<&PathBuf> {
        self.selected.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn imported(&self) -> Option<usize> {
        self.imported
    }

    /// Accepts `raw` when it names an existing image or PDF. A rejected
    /// path clears any previous selection.
    pub fn select(&mut self, raw: &str) -> bool {
        self.imported = None;
        self.selected = None;

        let raw = raw.trim();
        if raw.is_empty() {
            self.error = Some("Enter the path of a timetable image or PDF.".to_string());
            return false;
        }
        let path = expand_home(raw);
        if let Err(e) = detect_mime(&path) {
            self.error = Some(e.user_message().to_string());
            return false;
        }
        if !path.is_file() {
            self.error = Some(format!("File not found: {}", path.display()));
            return false;
        }

        self.error = None;
        self.selected = Some(path);
        true
    }

    pub fn begin(&mut self) {
        self.loading = true;
        self.error = None;
        self.imported = None;
    }

    pub fn finish(&mut self, outcome: Result<usize, ExtractError>) {
        self.loading = false;
        match outcome {
            Ok(count) => {
                self.imported = Some(count);
                self.selected = None;
                self.path = Input::default();
            }
            Err(e) => self.error = Some(e.user_message().to_string()),
        }
    }

    pub fn fail(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    /// Advances the loading spinner; called on every event-loop tick.
    pub fn tick(&mut self) {
        if self.loading {
            self.spinner = self.spinner.wrapping_add(1);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if self.loading {
            return None;
        }
        match key.code {
            KeyCode::Enter => {
                let raw = self.path.value().to_string();
                if self.select(&raw) {
                    return self.selected.clone().map(Action::StartImport);
                }
            }
            KeyCode::Esc => {
                if self.path.value().is_empty() && self.error.is_none() {
                    return Some(Action::Back);
                }
                self.path = Input::default();
                self.selected = None;
                self.error = None;
                self.imported = None;
            }
            _ => {
                self.path.handle_event(&crossterm::event::Event::Key(key));
            }
        }
        None
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .title(" Import Schedule ")
            .title_style(Style::default().fg(theme.title).bold());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(2),
                Constraint::Length(1),
                Constraint::Min(1),
            ])
            .split(inner);

        frame.render_widget(
            Paragraph::new("Point to a photo or PDF of your timetable.")
                .style(Style::default().fg(theme.dimmed)),
            chunks[0],
        );

        render_text_field(
            frame,
            chunks[1],
            "File:",
            &self.path,
            !self.loading,
            Some("~/Downloads/timetable.png"),
            theme,
        );

        let status = if self.loading {
            let spinner = SPINNER_FRAMES[self.spinner % SPINNER_FRAMES.len()];
            Line::from(Span::styled(
                format!("{} Analyzing...", spinner),
                Style::default().fg(theme.accent).bold(),
            ))
        } else if let Some(count) = self.imported {
            Line::from(vec![
                Span::styled("✓ Success! ", Style::default().fg(theme.success).bold()),
                Span::styled(
                    format!("Schedule updated with {} classes.", count),
                    Style::default().fg(theme.text),
                ),
            ])
        } else if let Some(path) = &self.selected {
            Line::from(Span::styled(
                format!("Selected {}", path.display()),
                Style::default().fg(theme.text),
            ))
        } else {
            Line::from("")
        };
        frame.render_widget(Paragraph::new(status), chunks[2]);

        render_error(frame, chunks[3], self.error(), theme);

        let hint = Line::from(vec![
            Span::styled("Enter", Style::default().fg(theme.hint)),
            Span::raw(" extract classes  "),
            Span::styled("Esc", Style::default().fg(theme.hint)),
            Span::raw(" clear"),
        ]);
        frame.render_widget(Paragraph::new(hint), chunks[4]);
    }
}
