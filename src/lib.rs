//! AuraPlan library - tasks, weekly timetable, and AI timetable import

pub mod ai;
pub mod cli;
pub mod planner;
pub mod reminders;
pub mod tui;
