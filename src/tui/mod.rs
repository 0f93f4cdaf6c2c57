//! Terminal User Interface module

mod app;
mod calendar;
mod components;
mod dashboard;
pub mod dialogs;
mod import;
mod import_poller;
pub mod navigation;
mod sidebar;
pub mod styles;
mod tasks;

pub use app::*;
pub use dashboard::long_date;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;

use crate::planner::Config;

pub async fn run(profile: &str) -> Result<()> {
    let config = Config::load()?;
    let mut app = App::new(profile, config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
