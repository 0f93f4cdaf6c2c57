//! Main TUI application

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDateTime};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::prelude::*;
use ratatui::widgets::*;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{error, info};

use super::calendar::CalendarView;
use super::components::HelpOverlay;
use super::dashboard::DashboardView;
use super::dialogs::{
    ClassFormDialog, ClassFormOutcome, ConfirmAction, ConfirmDialog, DialogResult,
    NewTaskDialog, TaskEditDialog,
};
use super::import::ImportState;
use super::import_poller::{ImportPoller, ImportResult};
use super::navigation::{Navigator, View};
use super::sidebar::{self, SIDEBAR_WIDTH};
use super::styles::{Theme, ThemeMode};
use super::tasks::TasksView;
use crate::ai::Extractor;
use crate::planner::{day_label, Config, PlannerState, Storage};
use crate::reminders::{Reminder, ReminderTracker};

struct StatusMessage {
    text: String,
    is_error: bool,
}

pub struct App {
    config: Config,
    state: PlannerState,
    nav: Navigator,
    mode: ThemeMode,
    theme: Theme,

    dashboard: DashboardView,
    calendar: CalendarView,
    tasks: TasksView,
    import: ImportState,
    import_poller: ImportPoller,

    reminders: ReminderTracker,
    last_reminder_check: Option<Instant>,
    banner: Vec<Reminder>,
    status: Option<StatusMessage>,

    // Dialogs
    show_help: bool,
    new_task_dialog: Option<NewTaskDialog>,
    task_edit_dialog: Option<TaskEditDialog>,
    class_dialog: Option<ClassFormDialog>,
    confirm_dialog: Option<ConfirmDialog>,

    should_quit: bool,
}

impl App {
    pub fn new(profile: &str, config: Config) -> Result<Self> {
        let storage = Storage::new(profile)?;
        Ok(Self::with_state(PlannerState::load(storage, &config)?, config))
    }

    pub fn with_state(state: PlannerState, config: Config) -> Self {
        let mode = ThemeMode::parse(&config.theme.name);
        let mut calendar = CalendarView::new(config.calendar.hours());
        calendar.focus_now(Local::now().naive_local());

        Self {
            reminders: ReminderTracker::from_config(&config.reminders),
            last_reminder_check: None,
            config,
            state,
            nav: Navigator::default(),
            mode,
            theme: Theme::for_mode(mode),
            dashboard: DashboardView::default(),
            calendar,
            tasks: TasksView::default(),
            import: ImportState::default(),
            import_poller: ImportPoller::new(),
            banner: Vec::new(),
            status: None,
            show_help: false,
            new_task_dialog: None,
            task_edit_dialog: None,
            class_dialog: None,
            confirm_dialog: None,
            should_quit: false,
        }
    }

    pub fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<()> {
        terminal.clear()?;

        const TICK: Duration = Duration::from_millis(250);
        let mut last_tick = Instant::now();

        loop {
            if self.tick_reminders(Local::now().naive_local()) {
                // Terminal bell stands in for a desktop notification
                terminal.backend_mut().write_all(b"\x07")?;
                std::io::Write::flush(terminal.backend_mut())?;
            }

            self.poll_import();

            if last_tick.elapsed() >= TICK {
                self.import.tick();
                last_tick = Instant::now();
            }

            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == event::KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    pub fn current_view(&self) -> View {
        self.nav.current()
    }

    pub fn theme_mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn state(&self) -> &PlannerState {
        &self.state
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn has_dialog(&self) -> bool {
        self.show_help
            || self.new_task_dialog.is_some()
            || self.task_edit_dialog.is_some()
            || self.class_dialog.is_some()
            || self.confirm_dialog.is_some()
    }

    /// Runs the reminder pass when the check interval has elapsed or a
    /// check was requested. Returns true when a new reminder was raised.
    fn tick_reminders(&mut self, now: NaiveDateTime) -> bool {
        let interval = Duration::from_secs(self.config.reminders.check_interval_secs.max(1));
        if self
            .last_reminder_check
            .is_some_and(|t| t.elapsed() < interval)
        {
            return false;
        }
        self.last_reminder_check = Some(Instant::now());
        self.check_reminders(now)
    }

    /// Makes the next loop iteration check reminders right away.
    fn request_reminder_check(&mut self) {
        self.last_reminder_check = None;
    }

    /// Runs a reminder pass over today's classes. Returns true when a new
    /// reminder was raised.
    pub fn check_reminders(&mut self, now: NaiveDateTime) -> bool {
        let today = self.state.timetable().for_day(day_label(now.weekday()));
        let due = self.reminders.check(today, now);
        if due.is_empty() {
            return false;
        }
        for reminder in &due {
            info!("{}: {}", reminder.title, reminder.body);
        }
        self.banner = due;
        true
    }

    fn poll_import(&mut self) {
        if let Some(result) = self.import_poller.try_recv_result() {
            self.finish_import(result);
        }
    }

    /// Applies a finished extraction: sessions are appended and saved, then
    /// the Calendar view is shown.
    fn finish_import(&mut self, result: ImportResult) {
        match result {
            Ok(response) => {
                let sessions = response.into_sessions();
                match self.state.import_classes(sessions) {
                    Ok(added) => {
                        info!("Imported {} classes", added);
                        self.import.finish(Ok(added));
                        self.set_status(format!("Imported {} classes", added), false);
                        self.nav.go(View::Calendar);
                        self.request_reminder_check();
                    }
                    Err(e) => {
                        error!("Failed to save imported classes: {}", e);
                        self.import.fail(format!("Failed to save classes: {}", e));
                    }
                }
            }
            Err(e) => {
                error!("Timetable extraction failed: {}", e);
                self.import.finish(Err(e));
            }
        }
    }

    fn set_status(&mut self, text: String, is_error: bool) {
        self.status = Some(StatusMessage { text, is_error });
    }

    /// Storage failures are shown in the status bar rather than ending the session.
    fn report<T>(&mut self, what: &str, result: Result<T>) {
        if let Err(e) = result {
            error!("Failed to {}: {}", what, e);
            self.set_status(format!("Failed to {}: {}", what, e), true);
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        self.status = None;

        if self.show_help {
            if matches!(
                key.code,
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
            ) {
                self.show_help = false;
            }
            return;
        }

        if self.handle_dialog_key(key) {
            return;
        }

        if key.code == KeyCode::Esc && !self.banner.is_empty() {
            self.banner.clear();
            return;
        }

        // Tab always switches views; the import path field swallows everything else
        match key.code {
            KeyCode::Tab => {
                self.nav.go(self.nav.current().next());
                return;
            }
            KeyCode::BackTab => {
                self.nav.back();
                return;
            }
            _ => {}
        }

        if self.nav.current() != View::Import {
            match key.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                    return;
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                    return;
                }
                KeyCode::Char('t') => {
                    self.mode = self.mode.toggle();
                    self.theme = Theme::for_mode(self.mode);
                    return;
                }
                KeyCode::Char('r') => {
                    let enabled = !self.reminders.is_enabled();
                    self.reminders.set_enabled(enabled);
                    if enabled {
                        self.request_reminder_check();
                    }
                    let label = if enabled { "on" } else { "off" };
                    self.set_status(format!("Reminders {}", label), false);
                    return;
                }
                KeyCode::Backspace => {
                    self.nav.back();
                    return;
                }
                KeyCode::Char(c) => {
                    if let Some(view) = View::from_shortcut(c) {
                        self.nav.go(view);
                        return;
                    }
                }
                _ => {}
            }
        }

        let action = match self.nav.current() {
            View::Dashboard => self.dashboard.handle_key(key, self.state.tasks()),
            View::Calendar => self.calendar.handle_key(key, self.state.timetable()),
            View::Tasks => self.tasks.handle_key(key, self.state.tasks()),
            View::Import => self.import.handle_key(key),
        };
        if let Some(action) = action {
            self.apply(action);
        }
    }

    /// Routes the key to the open dialog, if any. Returns true when consumed.
    fn handle_dialog_key(&mut self, key: KeyEvent) -> bool {
        if let Some(dialog) = &mut self.confirm_dialog {
            match dialog.handle_key(key) {
                DialogResult::Continue => {}
                DialogResult::Cancel => self.confirm_dialog = None,
                DialogResult::Submit(action) => {
                    self.confirm_dialog = None;
                    self.confirm(action);
                }
            }
            return true;
        }

        if let Some(dialog) = &mut self.new_task_dialog {
            match dialog.handle_key(key) {
                DialogResult::Continue => {}
                DialogResult::Cancel => self.new_task_dialog = None,
                DialogResult::Submit(data) => {
                    self.new_task_dialog = None;
                    let result = self.state.add_task(&data.text, data.category);
                    self.report("add task", result);
                }
            }
            return true;
        }

        if let Some(dialog) = &mut self.task_edit_dialog {
            match dialog.handle_key(key) {
                DialogResult::Continue => {}
                DialogResult::Cancel => self.task_edit_dialog = None,
                DialogResult::Submit(text) => {
                    let id = dialog.task_id().to_string();
                    self.task_edit_dialog = None;
                    let result = self.state.edit_task(&id, &text);
                    self.report("edit task", result);
                }
            }
            return true;
        }

        if let Some(dialog) = &mut self.class_dialog {
            match dialog.handle_key(key) {
                DialogResult::Continue => {}
                DialogResult::Cancel => self.class_dialog = None,
                DialogResult::Submit(ClassFormOutcome::Save(session)) => {
                    self.class_dialog = None;
                    let result = self.state.save_class(session);
                    self.report("save class", result);
                    self.request_reminder_check();
                }
                DialogResult::Submit(ClassFormOutcome::Delete(id)) => {
                    self.class_dialog = None;
                    let result = self.state.remove_class(&id);
                    self.report("delete class", result);
                    self.request_reminder_check();
                }
            }
            return true;
        }

        false
    }

    fn confirm(&mut self, action: ConfirmAction) {
        match action {
            ConfirmAction::DeleteTask(id) => {
                let result = self.state.remove_task(&id);
                self.report("delete task", result);
                self.tasks.clamp(self.state.tasks().len());
                self.dashboard.clamp(self.state.tasks().pending_count());
            }
            ConfirmAction::DeleteClass(id) => {
                let result = self.state.remove_class(&id);
                self.report("delete class", result);
                self.request_reminder_check();
            }
        }
    }

    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Back => {
                self.nav.back();
            }
            Action::NewTask => self.new_task_dialog = Some(NewTaskDialog::new()),
            Action::EditTask(id) => {
                if let Some(task) = self.state.tasks().get(&id) {
                    self.task_edit_dialog = Some(TaskEditDialog::new(&task.id, &task.text));
                }
            }
            Action::ToggleTask(id) => {
                let result = self.state.toggle_task(&id);
                self.report("update task", result);
                self.dashboard.clamp(self.state.tasks().pending_count());
            }
            Action::ConfirmDeleteTask(id) => {
                if let Some(task) = self.state.tasks().get(&id) {
                    self.confirm_dialog = Some(ConfirmDialog::new(
                        "Delete Task",
                        &format!("Delete \"{}\"?", task.text),
                        ConfirmAction::DeleteTask(id),
                    ));
                }
            }
            Action::NewClass { day, hour } => {
                self.class_dialog = Some(ClassFormDialog::for_slot(day, hour));
            }
            Action::EditClass(id) => {
                if let Some(session) = self.state.timetable().get(&id) {
                    self.class_dialog = Some(ClassFormDialog::edit(session));
                }
            }
            Action::ConfirmDeleteClass(id) => {
                if let Some(session) = self.state.timetable().get(&id) {
                    self.confirm_dialog = Some(ConfirmDialog::new(
                        "Delete Class",
                        &format!(
                            "Delete {} on {} at {}?",
                            session.subject, session.day, session.start_time
                        ),
                        ConfirmAction::DeleteClass(id),
                    ));
                }
            }
            Action::StartImport(path) => self.start_import(path),
        }
    }

    fn start_import(&mut self, path: PathBuf) {
        let extractor = match Extractor::from_config(&self.config.ai) {
            Ok(extractor) => extractor,
            Err(e) => {
                error!("Failed to build extractor: {}", e);
                self.import.finish(Err(e));
                return;
            }
        };
        if self.import_poller.start(extractor, path) {
            self.import.begin();
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(
            Block::default().style(Style::default().bg(self.theme.background)),
            area,
        );

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
            .split(area);
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(1)])
            .split(columns[1]);

        sidebar::render(
            frame,
            columns[0],
            self.nav.current(),
            self.mode,
            self.state.profile(),
            &self.theme,
        );

        let now = Local::now().naive_local();
        match self.nav.current() {
            View::Dashboard => self.dashboard.render(
                frame,
                rows[0],
                &self.state,
                self.reminders.is_enabled(),
                now,
                &self.theme,
            ),
            View::Calendar => {
                self.calendar
                    .render(frame, rows[0], self.state.timetable(), now, &self.theme)
            }
            View::Tasks => self
                .tasks
                .render(frame, rows[0], self.state.tasks(), &self.theme),
            View::Import => self.import.render(frame, rows[0], &self.theme),
        }

        self.render_status_bar(frame, rows[1]);

        if self.show_help {
            HelpOverlay::render(frame, area, &self.theme);
        }
        if let Some(dialog) = &self.new_task_dialog {
            dialog.render(frame, area, &self.theme);
        }
        if let Some(dialog) = &self.task_edit_dialog {
            dialog.render(frame, area, &self.theme);
        }
        if let Some(dialog) = &self.class_dialog {
            dialog.render(frame, area, &self.theme);
        }
        if let Some(dialog) = &self.confirm_dialog {
            dialog.render(frame, area, &self.theme);
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some(reminder) = self.banner.first() {
            let more = if self.banner.len() > 1 {
                format!(" (+{} more)", self.banner.len() - 1)
            } else {
                String::new()
            };
            Line::from(vec![
                Span::styled(
                    format!(" 🔔 {} ", reminder.title),
                    Style::default().fg(self.theme.reminder).bold(),
                ),
                Span::styled(
                    format!("{}{}", reminder.body, more),
                    Style::default().fg(self.theme.text),
                ),
                Span::styled("  Esc dismiss", Style::default().fg(self.theme.dimmed)),
            ])
        } else if let Some(status) = &self.status {
            let color = if status.is_error {
                self.theme.error
            } else {
                self.theme.success
            };
            Line::from(Span::styled(
                format!(" {}", status.text),
                Style::default().fg(color),
            ))
        } else {
            Line::from(vec![
                Span::styled(" 1-4", Style::default().fg(self.theme.hint)),
                Span::styled(" views  ", Style::default().fg(self.theme.dimmed)),
                Span::styled("Tab", Style::default().fg(self.theme.hint)),
                Span::styled(" next  ", Style::default().fg(self.theme.dimmed)),
                Span::styled("?", Style::default().fg(self.theme.hint)),
                Span::styled(" help  ", Style::default().fg(self.theme.dimmed)),
                Span::styled("q", Style::default().fg(self.theme.hint)),
                Span::styled(" quit", Style::default().fg(self.theme.dimmed)),
            ])
        };
        frame.render_widget(Paragraph::new(line), area);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Quit,
    Back,
    NewTask,
    EditTask(String),
    ToggleTask(String),
    ConfirmDeleteTask(String),
    NewClass { day: &'static str, hour: u32 },
    EditClass(String),
    ConfirmDeleteClass(String),
    StartImport(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{ExtractError, TimetableResponse};
    use crate::planner::ClassSession;
    use chrono::Timelike;
    use serial_test::serial;
    use tempfile::TempDir;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn setup() -> (TempDir, App) {
        let temp = TempDir::new().unwrap();
        std::env::set_var("HOME", temp.path());
        std::env::set_var("XDG_CONFIG_HOME", temp.path().join(".config"));
        let app = App::new("test", Config::default()).unwrap();
        (temp, app)
    }

    #[test]
    fn test_action_enum() {
        let quit = Action::Quit;
        let edit = Action::EditTask("task-1".to_string());
        assert_eq!(quit, Action::Quit);
        assert_eq!(edit.clone(), Action::EditTask("task-1".to_string()));
    }

    #[test]
    #[serial]
    fn test_digit_shortcuts_navigate_and_backspace_returns() {
        let (_temp, mut app) = setup();
        assert_eq!(app.current_view(), View::Dashboard);
        app.handle_key(key(KeyCode::Char('3')));
        assert_eq!(app.current_view(), View::Tasks);
        app.handle_key(key(KeyCode::Char('2')));
        assert_eq!(app.current_view(), View::Calendar);
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(app.current_view(), View::Tasks);
    }

    #[test]
    #[serial]
    fn test_import_view_keeps_typed_digits() {
        let (_temp, mut app) = setup();
        app.handle_key(key(KeyCode::Char('4')));
        assert_eq!(app.current_view(), View::Import);
        app.handle_key(key(KeyCode::Char('1')));
        app.handle_key(key(KeyCode::Char('q')));
        assert_eq!(app.current_view(), View::Import);
        assert!(!app.should_quit());

        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.current_view(), View::Dashboard);
    }

    #[test]
    #[serial]
    fn test_theme_toggle() {
        let (_temp, mut app) = setup();
        assert_eq!(app.theme_mode(), ThemeMode::Light);
        app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(app.theme_mode(), ThemeMode::Dark);
    }

    #[test]
    #[serial]
    fn test_quit_blocked_while_dialog_open() {
        let (_temp, mut app) = setup();
        app.apply(Action::NewTask);
        assert!(app.has_dialog());
        app.handle_key(key(KeyCode::Char('q')));
        assert!(!app.should_quit());
        app.handle_key(key(KeyCode::Esc));
        assert!(!app.has_dialog());
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    #[serial]
    fn test_new_task_dialog_adds_task() {
        let (_temp, mut app) = setup();
        let before = app.state().tasks().len();
        app.apply(Action::NewTask);
        for c in "Read chapter 4".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
        assert!(!app.has_dialog());
        assert_eq!(app.state().tasks().len(), before + 1);
    }

    #[test]
    #[serial]
    fn test_delete_task_requires_confirmation() {
        let (_temp, mut app) = setup();
        let id = app.state().tasks().all()[0].id.clone();
        app.apply(Action::ConfirmDeleteTask(id.clone()));
        app.handle_key(key(KeyCode::Char('n')));
        assert!(app.state().tasks().get(&id).is_some());

        app.apply(Action::ConfirmDeleteTask(id.clone()));
        app.handle_key(key(KeyCode::Char('y')));
        assert!(app.state().tasks().get(&id).is_none());
    }

    #[test]
    #[serial]
    fn test_class_form_saves_and_persists() {
        let (_temp, mut app) = setup();
        app.apply(Action::NewClass {
            day: "Tuesday",
            hour: 11,
        });
        for c in "Biology".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.state().timetable().at("Tuesday", 11).len(), 1);

        let reloaded = App::new("test", Config::default()).unwrap();
        assert_eq!(reloaded.state().timetable().len(), 1);
    }

    #[test]
    #[serial]
    fn test_reminders_raise_banner_once() {
        let (_temp, mut app) = setup();
        let now = Local::now().naive_local();
        // Skip near midnight where "ten minutes from now" is tomorrow
        if now.hour() == 23 && now.minute() >= 50 {
            return;
        }
        let start = now + chrono::Duration::minutes(5);
        let session = ClassSession::new(
            "Chemistry",
            crate::planner::day_label(now.weekday()),
            &start.format("%H:%M").to_string(),
            "23:59",
        );
        app.state.save_class(session).unwrap();
        app.reminders.set_enabled(true);

        assert!(app.check_reminders(now));
        assert_eq!(app.banner.len(), 1);
        assert_eq!(app.banner[0].title, "Upcoming: Chemistry");
        assert!(!app.check_reminders(now));

        app.handle_key(key(KeyCode::Esc));
        assert!(app.banner.is_empty());
    }

    fn session_starting_soon(now: NaiveDateTime) -> Option<ClassSession> {
        // Skip near midnight where "five minutes from now" is tomorrow
        if now.hour() == 23 && now.minute() >= 50 {
            return None;
        }
        let start = now + chrono::Duration::minutes(5);
        Some(ClassSession::new(
            "Statistics",
            crate::planner::day_label(now.weekday()),
            &start.format("%H:%M").to_string(),
            "23:59",
        ))
    }

    #[test]
    #[serial]
    fn test_finished_import_appends_saves_and_shows_calendar() {
        let (_temp, mut app) = setup();
        app.handle_key(key(KeyCode::Char('4')));
        let response = TimetableResponse::parse(
            r#"{"schedule":[
                {"day":"Monday","subject":"Calculus","startTime":"09:00","endTime":"10:30","room":"B12"},
                {"day":"Friday","subject":"History","startTime":"13:00","endTime":"14:00"}
            ]}"#,
        )
        .unwrap();

        app.finish_import(Ok(response));

        assert_eq!(app.current_view(), View::Calendar);
        assert_eq!(app.state().timetable().len(), 2);
        assert_eq!(app.import.imported(), Some(2));

        let reloaded = App::new("test", Config::default()).unwrap();
        assert_eq!(reloaded.state().timetable().len(), 2);
        assert_eq!(
            reloaded.state().timetable().for_day("Friday")[0].subject,
            "History"
        );
    }

    #[test]
    #[serial]
    fn test_empty_import_shows_calendar_without_writing() {
        let (_temp, mut app) = setup();
        app.handle_key(key(KeyCode::Char('4')));

        app.finish_import(Ok(TimetableResponse::default()));

        assert_eq!(app.current_view(), View::Calendar);
        assert!(app.state().timetable().is_empty());
        assert!(!Storage::new("test").unwrap().classes_path().exists());
    }

    #[test]
    #[serial]
    fn test_failed_import_stays_on_import_view() {
        let (_temp, mut app) = setup();
        app.handle_key(key(KeyCode::Char('4')));

        app.finish_import(Err(ExtractError::EmptyResponse));

        assert_eq!(app.current_view(), View::Import);
        assert_eq!(
            app.import.error(),
            Some(ExtractError::EmptyResponse.user_message())
        );
    }

    #[test]
    #[serial]
    fn test_enabling_reminders_checks_immediately() {
        let (_temp, mut app) = setup();
        let now = Local::now().naive_local();
        let Some(session) = session_starting_soon(now) else {
            return;
        };

        app.handle_key(key(KeyCode::Char('r')));
        assert!(!app.reminders.is_enabled());
        app.state.save_class(session).unwrap();
        assert!(!app.tick_reminders(now));

        app.handle_key(key(KeyCode::Char('r')));
        assert!(app.tick_reminders(now));
        assert_eq!(app.banner[0].title, "Upcoming: Statistics");
    }

    #[test]
    #[serial]
    fn test_saving_class_checks_reminders_immediately() {
        let (_temp, mut app) = setup();
        let now = Local::now().naive_local();
        let Some(session) = session_starting_soon(now) else {
            return;
        };

        assert!(!app.tick_reminders(now));
        assert!(!app.tick_reminders(now));

        app.class_dialog = Some(ClassFormDialog::edit(&session));
        app.handle_key(key(KeyCode::Enter));
        assert!(!app.has_dialog());
        assert!(app.tick_reminders(now));
    }
}
