use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("API key is missing")]
    MissingApiKey,

    #[error("API key was rejected: {0}")]
    InvalidApiKey(String),

    #[error("No response received from AI service")]
    EmptyResponse,

    #[error("Failed to parse AI response: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("Unsupported file type: {0}")]
    UnsupportedFile(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Extraction request failed: {0}")]
    Request(String),
}

impl ExtractError {
    /// Short message suitable for showing to the user.
    pub fn user_message(&self) -> &'static str {
        match self {
            ExtractError::MissingApiKey => {
                "No API key configured. Set GEMINI_API_KEY (or API_KEY), or add ai.api_key to config.toml."
            }
            ExtractError::InvalidApiKey(_) => {
                "The API key was rejected. Check that it is valid and has not expired."
            }
            ExtractError::EmptyResponse => "No response received from AI service.",
            ExtractError::MalformedJson(_) => {
                "Failed to parse AI response. Please try again with a clearer image."
            }
            ExtractError::UnsupportedFile(_) => "Please upload an image or PDF file.",
            ExtractError::Io(_) => "Error processing file.",
            ExtractError::Request(_) => "Failed to analyze. Please ensure the image is clear.",
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages_are_distinct() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let errors = [
            ExtractError::MissingApiKey,
            ExtractError::InvalidApiKey("403".to_string()),
            ExtractError::EmptyResponse,
            ExtractError::MalformedJson(parse_err),
            ExtractError::UnsupportedFile("text/plain".to_string()),
            ExtractError::Io(std::io::Error::other("boom")),
            ExtractError::Request("timeout".to_string()),
        ];
        let mut messages: Vec<&str> = errors.iter().map(|e| e.user_message()).collect();
        messages.sort();
        messages.dedup();
        assert_eq!(messages.len(), errors.len());
    }
}
