//! Gemini `generateContent` client for timetable extraction

use base64::Engine;
use regex::Regex;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;
use tracing::{debug, error, warn};

use super::error::{ExtractError, Result};
use super::{detect_mime, discover_api_key, TimetableResponse};
use crate::planner::AiConfig;

const INSTRUCTION: &str = "Analyze this image (or PDF) of a school timetable.
Extract the class schedule into a structured JSON format.
For each class, identify the Day of the week (e.g., 'Monday'), the Subject Name, the Start Time (HH:MM 24hr format), and End Time (HH:MM 24hr format).
If the end time is not explicitly stated, assume the class lasts 1 hour.
If a room number is visible, include it.
Normalize all times to 24-hour format (e.g., 2pm -> 14:00).
Ignore breaks or lunch if they are not labelled as a class.";

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json\n?|\n?```").unwrap());

/// Removes markdown code fences that models sometimes wrap JSON in.
pub fn strip_code_fences(text: &str) -> String {
    CODE_FENCE.replace_all(text, "").trim().to_string()
}

fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "schedule": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "day": { "type": "STRING" },
                        "subject": { "type": "STRING" },
                        "startTime": { "type": "STRING" },
                        "endTime": { "type": "STRING" },
                        "room": { "type": "STRING", "nullable": true }
                    },
                    "required": ["day", "subject", "startTime", "endTime"]
                }
            }
        }
    })
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

impl GenerateResponse {
    fn text(&self) -> Option<String> {
        let text: String = self
            .candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

pub struct Extractor {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl Extractor {
    pub fn from_config(config: &AiConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("auraplan/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ExtractError::Request(e.to_string()))?;

        Ok(Self {
            client,
            url: config.endpoint.replace("{model}", &config.model),
            api_key: discover_api_key(config.api_key.as_deref()),
        })
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Reads, validates and extracts a timetable file.
    pub async fn extract_file(&self, path: &Path) -> Result<TimetableResponse> {
        let mime = detect_mime(path)?;
        if !self.has_api_key() {
            return Err(ExtractError::MissingApiKey);
        }
        let bytes = tokio::fs::read(path).await?;
        debug!("Read {} bytes from {} ({})", bytes.len(), path.display(), mime);
        self.extract(&bytes, &mime).await
    }

    pub async fn extract(&self, bytes: &[u8], mime_type: &str) -> Result<TimetableResponse> {
        let api_key = self.api_key.as_deref().ok_or(ExtractError::MissingApiKey)?;

        let body = json!({
            "contents": [{
                "parts": [
                    {
                        "inlineData": {
                            "mimeType": mime_type,
                            "data": base64::engine::general_purpose::STANDARD.encode(bytes),
                        }
                    },
                    { "text": INSTRUCTION }
                ]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
            }
        });

        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!("Extraction request failed: {}", e);
                ExtractError::Request(e.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ExtractError::Request(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(classify_failure(status, &text));
        }

        let parsed: GenerateResponse = serde_json::from_str(&text).map_err(|e| {
            warn!("Unexpected response envelope: {}", e);
            ExtractError::Request(format!("Unexpected response: {}", e))
        })?;

        let output = parsed.text().ok_or(ExtractError::EmptyResponse)?;
        TimetableResponse::parse(&output).inspect_err(|e| {
            error!("JSON parse error: {} raw text: {}", e, output);
        })
    }
}

fn classify_failure(status: StatusCode, body: &str) -> ExtractError {
    let message = serde_json::from_str::<ApiErrorResponse>(body)
        .map(|r| r.error.message)
        .unwrap_or_else(|_| body.to_string());

    if status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN
        || message.contains("API key")
    {
        return ExtractError::InvalidApiKey(message);
    }
    ExtractError::Request(format!("HTTP {}: {}", status, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```json{\"a\":1}```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn test_classify_forbidden_as_invalid_key() {
        let err = classify_failure(StatusCode::FORBIDDEN, "nope");
        assert!(matches!(err, ExtractError::InvalidApiKey(_)));
    }

    #[test]
    fn test_classify_api_key_message_as_invalid_key() {
        let body = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.","status":"INVALID_ARGUMENT"}}"#;
        let err = classify_failure(StatusCode::BAD_REQUEST, body);
        match err {
            ExtractError::InvalidApiKey(msg) => assert!(msg.starts_with("API key not valid")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_classify_other_failures_as_request() {
        let err = classify_failure(StatusCode::INTERNAL_SERVER_ERROR, "overloaded");
        match err {
            ExtractError::Request(msg) => assert!(msg.contains("overloaded")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_response_text_joins_parts() {
        let envelope: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"sched"},{"text":"ule\":[]}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(envelope.text().as_deref(), Some("{\"schedule\":[]}"));
    }

    #[test]
    fn test_response_without_candidates_has_no_text() {
        let envelope: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(envelope.text().is_none());
    }

    #[test]
    fn test_endpoint_substitutes_model() {
        let config = AiConfig::default();
        let extractor = Extractor::from_config(&config).unwrap();
        assert!(extractor.url.contains("gemini-2.5-flash:generateContent"));
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_request() {
        let extractor = Extractor::from_config(&AiConfig::default())
            .unwrap()
            .with_api_key(None);
        let err = extractor.extract(b"png", "image/png").await.unwrap_err();
        assert!(matches!(err, ExtractError::MissingApiKey));
    }
}
