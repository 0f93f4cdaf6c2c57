//! Timetable extraction through a hosted generative model
//!
//! An uploaded image or PDF is sent inline together with a fixed instruction
//! and response schema. The reply is a JSON schedule that gets turned into
//! class sessions.

mod error;
mod extractor;

pub use error::{ExtractError, Result};
pub use extractor::{strip_code_fences, Extractor};

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::planner::{normalize_day, ClassSession};

/// Environment variables checked for the API key, in order.
pub const API_KEY_ENV_VARS: &[&str] = &[
    "GEMINI_API_KEY",
    "VITE_API_KEY",
    "API_KEY",
    "REACT_APP_API_KEY",
    "NEXT_PUBLIC_API_KEY",
];

const PLACEHOLDER_KEY: &str = "dummy_key_to_prevent_init_crash";

/// Finds the API key: the configured key first, then each environment
/// variable in [`API_KEY_ENV_VARS`]. Blank and placeholder values are skipped.
pub fn discover_api_key(configured: Option<&str>) -> Option<String> {
    discover_api_key_with(configured, |name| std::env::var(name).ok())
}

pub fn discover_api_key_with<F>(configured: Option<&str>, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let usable = |key: &str| {
        let key = key.trim();
        !key.is_empty() && key != PLACEHOLDER_KEY
    };

    if let Some(key) = configured.filter(|k| usable(k)) {
        return Some(key.trim().to_string());
    }

    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .find(|key| usable(key))
        .map(|key| key.trim().to_string())
}

/// MIME type for an upload; only images and PDFs are accepted.
pub fn detect_mime(path: &Path) -> Result<String> {
    let guess = mime_guess::from_path(path).first();
    match guess {
        Some(m) if m.type_() == mime_guess::mime::IMAGE => Ok(m.essence_str().to_string()),
        Some(m) if m.essence_str() == "application/pdf" => Ok(m.essence_str().to_string()),
        Some(m) => Err(ExtractError::UnsupportedFile(m.essence_str().to_string())),
        None => Err(ExtractError::UnsupportedFile(path.display().to_string())),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedClass {
    pub day: String,
    pub subject: String,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimetableResponse {
    #[serde(default)]
    pub schedule: Vec<ExtractedClass>,
}

impl TimetableResponse {
    /// Parses model output, tolerating a surrounding markdown code fence.
    pub fn parse(text: &str) -> Result<Self> {
        let cleaned = strip_code_fences(text);
        if cleaned.is_empty() {
            return Err(ExtractError::EmptyResponse);
        }
        Ok(serde_json::from_str(&cleaned)?)
    }

    /// Each extracted class becomes a new session with a fresh id.
    pub fn into_sessions(self) -> Vec<ClassSession> {
        self.schedule
            .into_iter()
            .map(|c| {
                let day = normalize_day(&c.day).map(str::to_string).unwrap_or(c.day);
                ClassSession::new(&c.subject, &day, &c.start_time, &c.end_time).with_room(c.room)
            })
            .collect()
    }
}
