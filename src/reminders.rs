//! Upcoming-class reminders
//!
//! Checked on a fixed interval against today's sessions. A session is
//! reminded about at most once per tracker.

use chrono::{NaiveDateTime, Timelike};
use std::collections::HashSet;

use crate::planner::{ClassSession, RemindersConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reminder {
    pub session_id: String,
    pub title: String,
    pub body: String,
    pub minutes_until: u32,
}

#[derive(Debug, Clone)]
pub struct ReminderTracker {
    enabled: bool,
    lead_minutes: u32,
    notified: HashSet<String>,
}

impl ReminderTracker {
    pub fn new(enabled: bool, lead_minutes: u32) -> Self {
        Self {
            enabled,
            lead_minutes,
            notified: HashSet::new(),
        }
    }

    pub fn from_config(config: &RemindersConfig) -> Self {
        Self::new(config.enabled, config.lead_minutes)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn lead_minutes(&self) -> u32 {
        self.lead_minutes
    }

    pub fn was_notified(&self, session_id: &str) -> bool {
        self.notified.contains(session_id)
    }

    /// Reminders for sessions starting within the lead window.
    pub fn check<'a>(
        &mut self,
        today: impl IntoIterator<Item = &'a ClassSession>,
        now: NaiveDateTime,
    ) -> Vec<Reminder> {
        if !self.enabled {
            return Vec::new();
        }

        let now_minutes = (now.hour() * 60 + now.minute()) as i64;
        let mut due = Vec::new();

        for session in today {
            if self.notified.contains(&session.id) {
                continue;
            }
            let Some(start) = session.start_minutes() else {
                continue;
            };
            let diff = start as i64 - now_minutes;
            if diff > 0 && diff <= self.lead_minutes as i64 {
                self.notified.insert(session.id.clone());
                due.push(build_reminder(session, diff as u32));
            }
        }

        due
    }
}

fn build_reminder(session: &ClassSession, minutes_until: u32) -> Reminder {
    let room = session
        .room
        .as_deref()
        .map(|r| format!(" in Room {}", r))
        .unwrap_or_default();
    Reminder {
        session_id: session.id.clone(),
        title: format!("Upcoming: {}", session.subject),
        body: format!(
            "Starts in {} minutes at {}{}",
            minutes_until, session.start_time, room
        ),
        minutes_until,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 10)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn sessions() -> Vec<ClassSession> {
        vec![
            ClassSession::new("Maths", "Monday", "09:00", "10:00")
                .with_room(Some("101".to_string())),
            ClassSession::new("Physics", "Monday", "09:30", "10:30"),
        ]
    }

    #[test]
    fn test_reminds_within_window() {
        let mut tracker = ReminderTracker::new(true, 10);
        let today = sessions();
        let due = tracker.check(&today, now(8, 52));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].title, "Upcoming: Maths");
        assert_eq!(due[0].body, "Starts in 8 minutes at 09:00 in Room 101");
        assert!(tracker.was_notified(&today[0].id));
    }

    #[test]
    fn test_never_reminds_twice() {
        let mut tracker = ReminderTracker::new(true, 10);
        let today = sessions();
        assert_eq!(tracker.check(&today, now(8, 55)).len(), 1);
        assert!(tracker.check(&today, now(8, 56)).is_empty());
        assert!(tracker.check(&today, now(8, 59)).is_empty());
    }

    #[test]
    fn test_window_bounds() {
        let today = sessions();

        let mut tracker = ReminderTracker::new(true, 10);
        assert!(tracker.check(&today[..1], now(8, 49)).is_empty());

        let mut tracker = ReminderTracker::new(true, 10);
        assert_eq!(tracker.check(&today[..1], now(8, 50)).len(), 1);

        let mut tracker = ReminderTracker::new(true, 10);
        assert!(tracker.check(&today[..1], now(9, 0)).is_empty());
    }

    #[test]
    fn test_disabled_tracker_is_silent() {
        let mut tracker = ReminderTracker::new(false, 10);
        let today = sessions();
        assert!(tracker.check(&today, now(8, 55)).is_empty());
        tracker.set_enabled(true);
        assert_eq!(tracker.check(&today, now(8, 55)).len(), 1);
    }

    #[test]
    fn test_unparsable_start_is_skipped() {
        let mut tracker = ReminderTracker::new(true, 10);
        let today = vec![ClassSession::new("Mystery", "Monday", "soon", "later")];
        assert!(tracker.check(&today, now(8, 55)).is_empty());
    }

    #[test]
    fn test_from_config() {
        let tracker = ReminderTracker::from_config(&RemindersConfig::default());
        assert!(tracker.is_enabled());
        assert_eq!(tracker.lead_minutes(), 10);
    }
}
