// src/core/mod.rs
//! Submission pipeline: form validation, transport, orchestration

pub mod handler;
pub mod service_client;
pub mod submission;

pub use handler::{SubmissionHandler, SubmissionOutcome};
pub use service_client::{ApiResponse, MatchTransport, ScoringClient};
pub use submission::{FormInput, ResumeFile, SubmissionRequest};
