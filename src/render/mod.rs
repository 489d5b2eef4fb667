// src/render/mod.rs
//! Results views and their templates
//!
//! The handler produces a [`ResultsView`]; surfaces turn it into markup
//! through the askama templates under `templates/`. All interpolated
//! strings are escaped by the HTML templates.

use askama::Template;

use crate::types::{ErrorPayload, MatchResult, SkillContext};

const NONE_PLACEHOLDER: &str = "None";

/// What ends up in the results region after a submission settles.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    Match(MatchResult),
    ServerError { status: u16, payload: ErrorPayload },
    Failure(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Html,
    Text,
}

#[derive(Template)]
#[template(path = "results.html")]
struct MatchHtml<'a> {
    percentage: String,
    matched: String,
    missing: String,
    context: Vec<SkillContext<'a>>,
    bullets: &'a [String],
    suggestions: &'a [String],
}

#[derive(Template)]
#[template(path = "results.txt")]
struct MatchText<'a> {
    percentage: String,
    matched: String,
    missing: String,
    context: Vec<SkillContext<'a>>,
    bullets: &'a [String],
    suggestions: &'a [String],
}

#[derive(Template)]
#[template(path = "server_error.html")]
struct ServerErrorHtml {
    status: u16,
    payload: String,
}

#[derive(Template)]
#[template(path = "failure.html")]
struct FailureHtml<'a> {
    message: &'a str,
}

fn skills_line(skills: &[String]) -> String {
    if skills.is_empty() {
        NONE_PLACEHOLDER.to_string()
    } else {
        skills.join(", ")
    }
}

impl ResultsView {
    pub fn render(&self, format: OutputFormat) -> askama::Result<String> {
        match format {
            OutputFormat::Html => self.to_html(),
            OutputFormat::Text => self.to_text(),
        }
    }

    pub fn to_html(&self) -> askama::Result<String> {
        match self {
            ResultsView::Match(result) => MatchHtml {
                percentage: result.percentage_label(),
                matched: skills_line(&result.matched_skills),
                missing: skills_line(&result.missing_skills),
                context: result.missing_with_context(),
                bullets: &result.rewritten_bullets,
                suggestions: &result.suggestions,
            }
            .render(),
            ResultsView::ServerError { status, payload } => ServerErrorHtml {
                status: *status,
                payload: payload.pretty(),
            }
            .render(),
            ResultsView::Failure(message) => FailureHtml { message }.render(),
        }
    }

    pub fn to_text(&self) -> askama::Result<String> {
        match self {
            ResultsView::Match(result) => MatchText {
                percentage: result.percentage_label(),
                matched: skills_line(&result.matched_skills),
                missing: skills_line(&result.missing_skills),
                context: result.missing_with_context(),
                bullets: &result.rewritten_bullets,
                suggestions: &result.suggestions,
            }
            .render(),
            ResultsView::ServerError { status, payload } => {
                Ok(format!("Error (HTTP {}):\n{}\n", status, payload.pretty()))
            }
            ResultsView::Failure(message) => Ok(format!("Error: {}\n", message)),
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, ResultsView::Match(_))
    }
}
