// src/error.rs
//! Error taxonomy for a submission cycle

use thiserror::Error;

/// Rejections detected before any network activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select your resume PDF.")]
    MissingFile,

    #[error("Please paste the job description text.")]
    MissingText,
}

/// Failures of the request/response exchange with the scoring API.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("invalid response body: {0}")]
    MalformedResponse(String),
}

impl From<reqwest::Error> for SubmissionError {
    fn from(err: reqwest::Error) -> Self {
        SubmissionError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for SubmissionError {
    fn from(err: serde_json::Error) -> Self {
        SubmissionError::MalformedResponse(err.to_string())
    }
}
