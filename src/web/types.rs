// src/web/types.rs

use askama::Template;
use rocket::form::FromForm;
use rocket::fs::TempFile;
use std::sync::Arc;

use crate::core::MatchTransport;

pub struct ServerState {
    pub transport: Arc<dyn MatchTransport>,
}

/// Multipart body posted by the upload form.
#[derive(FromForm)]
pub struct ResumeUploadForm<'f> {
    pub resume_file: Option<TempFile<'f>>,
    pub jd_text: Option<String>,
}

#[derive(Template, Default)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub alert: String,
    pub jd_text: String,
    pub results_html: String,
}
