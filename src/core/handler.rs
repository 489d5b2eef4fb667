// src/core/handler.rs
//! Submission handler - one validated request/response cycle per submit

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::core::service_client::{ApiResponse, MatchTransport};
use crate::core::submission::FormInput;
use crate::error::{SubmissionError, ValidationError};
use crate::render::ResultsView;
use crate::surface::ResultsSurface;
use crate::types::{ErrorPayload, MatchResult};

/// How a single submission ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Validation failed; the user was alerted and nothing was sent.
    Rejected(ValidationError),
    Matched,
    ServerError(u16),
    /// Transport or parsing failure, rendered as a generic error.
    Failed,
    /// A newer submission started before this one settled.
    Stale,
    Detached,
}

/// Owns its transport and results surface for the lifetime of the form.
///
/// Each submission takes a new generation number; only the latest
/// generation may render or hide the loading indicator.
pub struct SubmissionHandler<S: ResultsSurface> {
    transport: Arc<dyn MatchTransport>,
    surface: Arc<S>,
    generation: AtomicU64,
    attached: AtomicBool,
}

/// Hides the loading indicator when the request settles, however it settles.
struct LoadingGuard<'a, S: ResultsSurface> {
    handler: &'a SubmissionHandler<S>,
    generation: u64,
}

impl<S: ResultsSurface> Drop for LoadingGuard<'_, S> {
    fn drop(&mut self) {
        if self.handler.is_current(self.generation) {
            self.handler.surface.set_loading(false);
        }
    }
}

impl<S: ResultsSurface> SubmissionHandler<S> {
    pub fn attach(transport: Arc<dyn MatchTransport>, surface: Arc<S>) -> Self {
        debug!("Submission handler attached");
        Self {
            transport,
            surface,
            generation: AtomicU64::new(0),
            attached: AtomicBool::new(true),
        }
    }

    /// Stop handling submissions. In-flight responses are dropped unrendered.
    pub fn detach(&self) {
        if self.attached.swap(false, Ordering::SeqCst) {
            self.generation.fetch_add(1, Ordering::SeqCst);
            self.surface.set_loading(false);
            debug!("Submission handler detached");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    pub async fn on_submit(&self, input: FormInput) -> SubmissionOutcome {
        if !self.is_attached() {
            debug!("Ignoring submission on detached handler");
            return SubmissionOutcome::Detached;
        }

        let request = match input.validate() {
            Ok(request) => request,
            Err(e) => {
                self.surface.alert(&e.to_string());
                return SubmissionOutcome::Rejected(e);
            }
        };

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        self.surface.clear();
        self.surface.set_loading(true);
        let loading = LoadingGuard {
            handler: self,
            generation,
        };

        info!(
            generation,
            "Submitting {} ({} bytes)",
            request.resume.file_name,
            request.resume.content.len()
        );

        let result = self.transport.send(request).await;
        drop(loading);

        if !self.is_attached() {
            debug!(generation, "Handler detached while request was in flight");
            return SubmissionOutcome::Detached;
        }
        if !self.is_current(generation) {
            info!(generation, "Discarding stale response");
            return SubmissionOutcome::Stale;
        }

        let (view, outcome) = match result.and_then(interpret_response) {
            Ok(view) => {
                let outcome = match &view {
                    ResultsView::ServerError { status, .. } => {
                        warn!(generation, "Scoring service returned HTTP {}", status);
                        SubmissionOutcome::ServerError(*status)
                    }
                    _ => SubmissionOutcome::Matched,
                };
                (view, outcome)
            }
            Err(e) => {
                error!(generation, "Submission failed: {}", e);
                (ResultsView::Failure(e.to_string()), SubmissionOutcome::Failed)
            }
        };

        self.surface.show(view);
        outcome
    }
}

/// Turn a raw reply into a view. Bodies are parsed as JSON on both branches.
pub fn interpret_response(response: ApiResponse) -> Result<ResultsView, SubmissionError> {
    if response.is_success() {
        let result: MatchResult = serde_json::from_str(&response.body)?;
        if !result.is_percentage_in_range() {
            warn!("Match percentage out of range: {}", result.match_percentage);
        }
        Ok(ResultsView::Match(result))
    } else {
        let payload: ErrorPayload = serde_json::from_str(&response.body)?;
        Ok(ResultsView::ServerError {
            status: response.status,
            payload,
        })
    }
}
