//! Class sessions and the weekly timetable

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

pub const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Color assigned to sessions that were not given one explicitly.
pub const DEFAULT_CLASS_COLOR: &str = "accent";

pub fn day_label(day: chrono::Weekday) -> &'static str {
    WEEKDAYS[day.num_days_from_monday() as usize]
}

/// Canonical weekday label for a case-insensitive name or 3-letter prefix.
pub fn normalize_day(input: &str) -> Option<&'static str> {
    let needle = input.trim().to_lowercase();
    if needle.len() < 3 {
        return None;
    }
    WEEKDAYS
        .iter()
        .find(|d| d.to_lowercase() == needle || d.to_lowercase().starts_with(&needle))
        .copied()
}

/// Parses `HH:MM` into minutes since midnight.
pub fn parse_clock(s: &str) -> Option<u32> {
    let (h, m) = s.trim().split_once(':')?;
    let h: u32 = h.trim().parse().ok()?;
    let m: u32 = m.trim().parse().ok()?;
    if h > 23 || m > 59 {
        return None;
    }
    Some(h * 60 + m)
}

pub fn format_clock(hour: u32, minute: u32) -> String {
    format!("{:02}:{:02}", hour, minute)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSession {
    pub id: String,
    pub subject: String,
    pub day: String,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl ClassSession {
    pub fn new(subject: &str, day: &str, start_time: &str, end_time: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            subject: subject.to_string(),
            day: day.to_string(),
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
            room: None,
            color: Some(DEFAULT_CLASS_COLOR.to_string()),
        }
    }

    pub fn with_room(mut self, room: Option<String>) -> Self {
        self.room = room.filter(|r| !r.trim().is_empty());
        self
    }

    pub fn with_color(mut self, color: Option<String>) -> Self {
        self.color = color.filter(|c| !c.trim().is_empty());
        self
    }

    pub fn start_hour(&self) -> Option<u32> {
        self.start_time.split(':').next()?.trim().parse().ok()
    }

    pub fn start_minutes(&self) -> Option<u32> {
        parse_clock(&self.start_time)
    }

    pub fn is_on(&self, day: &str) -> bool {
        self.day.eq_ignore_ascii_case(day)
    }

    pub fn time_range(&self) -> String {
        format!("{} - {}", self.start_time, self.end_time)
    }

    /// Start time as the integer `HHMM`, used to order a day's sessions.
    fn sort_key(&self) -> u32 {
        self.start_time.replace(':', "").parse().unwrap_or(u32::MAX)
    }
}

/// True once the class's end time has passed on the current day.
pub fn is_past(end_time: &str, now: NaiveDateTime) -> bool {
    let Some(end) = parse_clock(end_time) else {
        return false;
    };
    let (h, m) = (end / 60, end % 60);
    h < now.hour() || (h == now.hour() && m < now.minute())
}

pub fn is_current(session: &ClassSession, now: NaiveDateTime) -> bool {
    session.start_hour() == Some(now.hour()) && !is_past(&session.end_time, now)
}

#[derive(Debug, Clone, Default)]
pub struct Timetable {
    sessions: Vec<ClassSession>,
}

impl Timetable {
    pub fn new(sessions: Vec<ClassSession>) -> Self {
        Self { sessions }
    }

    pub fn all(&self) -> &[ClassSession] {
        &self.sessions
    }

    pub fn get(&self, id: &str) -> Option<&ClassSession> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Sessions placed in the calendar cell for `day` at `hour`.
    pub fn at(&self, day: &str, hour: u32) -> Vec<&ClassSession> {
        self.sessions
            .iter()
            .filter(|s| s.is_on(day) && s.start_hour() == Some(hour))
            .collect()
    }

    /// A day's sessions ordered by start time.
    pub fn for_day(&self, day: &str) -> Vec<&ClassSession> {
        let mut sessions: Vec<&ClassSession> =
            self.sessions.iter().filter(|s| s.is_on(day)).collect();
        sessions.sort_by_key(|s| s.sort_key());
        sessions
    }

    /// Replaces the session with the same id, or appends it.
    pub fn upsert(&mut self, session: ClassSession) {
        match self.sessions.iter_mut().find(|s| s.id == session.id) {
            Some(existing) => *existing = session,
            None => self.sessions.push(session),
        }
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.sessions.len();
        self.sessions.retain(|s| s.id != id);
        self.sessions.len() != before
    }

    pub fn extend(&mut self, sessions: impl IntoIterator<Item = ClassSession>) -> usize {
        let before = self.sessions.len();
        self.sessions.extend(sessions);
        self.sessions.len() - before
    }
}

/// Raw field values from the class form, validated into a session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassForm {
    pub subject: String,
    pub day: String,
    pub start_time: String,
    pub end_time: String,
    pub room: String,
    pub color: String,
}

impl ClassForm {
    /// Form pre-filled for a one-hour slot.
    pub fn for_slot(day: &str, hour: u32) -> Self {
        Self {
            subject: String::new(),
            day: day.to_string(),
            start_time: format_clock(hour, 0),
            end_time: format_clock((hour + 1) % 24, 0),
            room: String::new(),
            color: DEFAULT_CLASS_COLOR.to_string(),
        }
    }

    pub fn from_session(session: &ClassSession) -> Self {
        Self {
            subject: session.subject.clone(),
            day: session.day.clone(),
            start_time: session.start_time.clone(),
            end_time: session.end_time.clone(),
            room: session.room.clone().unwrap_or_default(),
            color: session.color.clone().unwrap_or_default(),
        }
    }

    /// Builds the session; `existing_id` keeps the id when editing.
    pub fn validate(&self, existing_id: Option<&str>) -> Result<ClassSession, String> {
        let subject = self.subject.trim();
        if subject.is_empty() {
            return Err("Subject is required".to_string());
        }
        if self.day.trim().is_empty() {
            return Err("Day is required".to_string());
        }
        let day = normalize_day(&self.day).ok_or_else(|| format!("Unknown day: {}", self.day))?;
        if self.start_time.trim().is_empty() || self.end_time.trim().is_empty() {
            return Err("Start and end time are required".to_string());
        }
        let start = parse_clock(&self.start_time)
            .ok_or_else(|| format!("Invalid start time: {}", self.start_time))?;
        let end = parse_clock(&self.end_time)
            .ok_or_else(|| format!("Invalid end time: {}", self.end_time))?;

        let mut session = ClassSession::new(
            subject,
            day,
            &format_clock(start / 60, start % 60),
            &format_clock(end / 60, end % 60),
        )
        .with_room(Some(self.room.trim().to_string()))
        .with_color(Some(self.color.trim().to_string()));
        if let Some(id) = existing_id {
            session.id = id.to_string();
        }
        Ok(session)
    }
}
