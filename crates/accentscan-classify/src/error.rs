//! Error types for accent classification

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifyError {
    #[error("API key not configured. Set OPENAI_API_KEY")]
    ApiKeyMissing,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request timed out")]
    Timeout,
}

impl From<reqwest::Error> for ClassifyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClassifyError::Timeout
        } else if err.is_connect() {
            ClassifyError::ConnectionError(err.to_string())
        } else {
            ClassifyError::RequestFailed(err.to_string())
        }
    }
}
