// src/core/service_client.rs
//! HTTP client for the scoring API - one multipart POST per submission

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, info};

use crate::core::submission::SubmissionRequest;
use crate::error::SubmissionError;

const MATCH_ENDPOINT: &str = "/match/";

/// Status and raw body of a scoring API reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Delivers a validated submission to a scoring backend.
#[async_trait]
pub trait MatchTransport: Send + Sync {
    async fn send(&self, request: SubmissionRequest) -> Result<ApiResponse, SubmissionError>;
}

pub struct ScoringClient {
    client: reqwest::Client,
    match_url: String,
}

impl ScoringClient {
    /// Create a client for `<base_url>/match/`. No timeout unless one is given.
    pub fn new(base_url: &str, timeout_seconds: Option<u64>) -> Result<Self> {
        let match_url = match_url(base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { client, match_url })
    }

    pub fn match_url(&self) -> &str {
        &self.match_url
    }
}

#[async_trait]
impl MatchTransport for ScoringClient {
    async fn send(&self, request: SubmissionRequest) -> Result<ApiResponse, SubmissionError> {
        let file_name = request.resume.file_name.clone();
        let form = request.into_multipart()?;

        info!("Calling scoring service: {} (resume: {})", self.match_url, file_name);

        let response = self
            .client
            .post(&self.match_url)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        debug!("Response status: {}", status);

        let body = response.text().await?;

        Ok(ApiResponse {
            status: status.as_u16(),
            body,
        })
    }
}

/// Join a configured base URL with the match endpoint, tolerating trailing slashes.
pub fn match_url(base_url: &str) -> Result<String> {
    let trimmed = base_url.trim().trim_end_matches('/');
    let url = format!("{}{}", trimmed, MATCH_ENDPOINT);

    Url::parse(&url).with_context(|| format!("Invalid scoring API base URL: {}", base_url))?;

    Ok(url)
}
