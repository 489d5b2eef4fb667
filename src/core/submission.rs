// src/core/submission.rs
//! Form input, validation and multipart packaging

use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use std::path::Path;

use crate::error::ValidationError;

pub const RESUME_FIELD: &str = "resume_file";
pub const JD_TEXT_FIELD: &str = "jd_text";

/// A résumé file picked by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResumeFile {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl ResumeFile {
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content,
        }
    }

    /// Read a résumé from disk, keeping only the file name part of the path
    pub async fn from_path(path: &Path) -> Result<Self> {
        let content = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("resume.pdf")
            .to_string();

        Ok(Self { file_name, content })
    }

    /// Browsers post an unnamed, zero-length part when nothing was picked.
    pub fn is_placeholder(&self) -> bool {
        self.file_name.trim().is_empty() && self.content.is_empty()
    }

    pub fn content_type(&self) -> &'static str {
        let lower_name = self.file_name.to_lowercase();
        if lower_name.ends_with(".pdf") {
            "application/pdf"
        } else if lower_name.ends_with(".docx") {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        } else {
            "application/octet-stream"
        }
    }
}

/// Raw state of the upload form at submission time.
#[derive(Debug, Clone, Default)]
pub struct FormInput {
    pub resume: Option<ResumeFile>,
    pub jd_text: String,
}

impl FormInput {
    pub fn new(resume: Option<ResumeFile>, jd_text: impl Into<String>) -> Self {
        Self {
            resume,
            jd_text: jd_text.into(),
        }
    }

    /// File first, then text. Whitespace-only text counts as empty.
    pub fn validate(self) -> Result<SubmissionRequest, ValidationError> {
        let resume = match self.resume {
            Some(file) if !file.is_placeholder() => file,
            _ => return Err(ValidationError::MissingFile),
        };

        if self.jd_text.trim().is_empty() {
            return Err(ValidationError::MissingText);
        }

        Ok(SubmissionRequest {
            resume,
            jd_text: self.jd_text,
        })
    }
}

/// A validated submission, ready to be sent.
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub resume: ResumeFile,
    pub jd_text: String,
}

impl SubmissionRequest {
    /// The JD text goes out as entered, not trimmed.
    pub fn into_multipart(self) -> Result<Form, reqwest::Error> {
        let content_type = self.resume.content_type();
        let part = Part::bytes(self.resume.content)
            .file_name(self.resume.file_name)
            .mime_str(content_type)?;

        Ok(Form::new()
            .part(RESUME_FIELD, part)
            .text(JD_TEXT_FIELD, self.jd_text))
    }
}
