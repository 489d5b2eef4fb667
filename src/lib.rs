//! Résumé / job-description scanner client.
//!
//! A [`SubmissionHandler`] validates an upload form, posts the résumé and
//! job description to the scoring API as multipart, and renders the match
//! result (or the error) into a [`ResultsSurface`].

pub mod cli;
pub mod core;
pub mod environment;
pub mod error;
pub mod render;
pub mod surface;
pub mod types;
pub mod web;

pub use crate::core::{
    ApiResponse, FormInput, MatchTransport, ResumeFile, ScoringClient, SubmissionHandler,
    SubmissionOutcome, SubmissionRequest,
};
pub use environment::EnvironmentConfig;
pub use error::{SubmissionError, ValidationError};
pub use render::{OutputFormat, ResultsView};
pub use surface::{ConsoleSurface, MemorySurface, ResultsSurface};
pub use types::{ErrorPayload, MatchResult};
