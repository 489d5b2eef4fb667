// src/web/handlers/upload_handlers.rs
//! Upload form page and submission handler

use askama::Template;
use rocket::form::Form;
use rocket::fs::TempFile;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::State;
use std::sync::Arc;
use tracing::{error, info};

use crate::core::{FormInput, ResumeFile, SubmissionHandler, SubmissionOutcome};
use crate::render::ResultsView;
use crate::surface::MemorySurface;
use crate::web::types::{IndexPage, ResumeUploadForm, ServerState};

const DOCX_SUBTYPE: &str = "vnd.openxmlformats-officedocument.wordprocessingml.document";

pub type PageResponse = (Status, RawHtml<String>);

pub async fn index_handler() -> PageResponse {
    render_page(Status::Ok, IndexPage::default())
}

pub async fn submit_handler(
    upload: Form<ResumeUploadForm<'_>>,
    state: &State<ServerState>,
) -> PageResponse {
    let upload = upload.into_inner();
    let jd_text = upload.jd_text.unwrap_or_default();

    let resume = match upload.resume_file {
        Some(file) => match read_upload(file).await {
            Ok(resume) => Some(resume),
            Err(e) => {
                error!("Failed to read uploaded resume: {}", e);
                let page = IndexPage {
                    jd_text,
                    results_html: failure_html("Failed to process uploaded file"),
                    ..IndexPage::default()
                };
                return render_page(Status::InternalServerError, page);
            }
        },
        None => None,
    };

    let surface = Arc::new(MemorySurface::new());
    let handler = SubmissionHandler::attach(state.transport.clone(), surface.clone());

    let outcome = handler.on_submit(FormInput::new(resume, jd_text.clone())).await;
    handler.detach();

    info!("Submission from upload form finished: {:?}", outcome);

    let status = match outcome {
        SubmissionOutcome::Rejected(_) => Status::BadRequest,
        _ => Status::Ok,
    };

    let page = IndexPage {
        alert: surface.alerts().join("\n"),
        jd_text,
        results_html: surface.html(),
    };

    render_page(status, page)
}

pub async fn health_handler() -> &'static str {
    "ok"
}

/// Persist the multipart file and read it back. An unnamed part keeps an
/// empty name so validation can tell it apart from a picked file.
async fn read_upload(mut file: TempFile<'_>) -> anyhow::Result<ResumeFile> {
    let file_name = upload_file_name(&file);

    let temp_path = std::env::temp_dir().join(format!("resume_upload_{}", uuid::Uuid::new_v4()));
    file.persist_to(&temp_path).await?;

    let content = tokio::fs::read(&temp_path).await;
    let _ = tokio::fs::remove_file(&temp_path).await;

    Ok(ResumeFile::new(file_name, content?))
}

/// Sanitized stem plus the extension the browser sent. Falls back to the
/// part's content type, then to `.pdf`.
fn upload_file_name(file: &TempFile<'_>) -> String {
    let Some(raw_name) = file.raw_name() else {
        return String::new();
    };

    let submitted = raw_name
        .dangerous_unsafe_unsanitized_raw()
        .as_str()
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or("")
        .trim();
    if submitted.is_empty() {
        return String::new();
    }

    let stem = raw_name.as_str().unwrap_or("resume");
    let extension = submitted_extension(submitted)
        .or_else(|| match file.content_type() {
            Some(ct) if ct.is_pdf() => Some("pdf".to_string()),
            Some(ct) if ct.to_string().contains(DOCX_SUBTYPE) => Some("docx".to_string()),
            _ => None,
        })
        .unwrap_or_else(|| "pdf".to_string());

    format!("{}.{}", stem, extension)
}

fn submitted_extension(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_lowercase())
}

fn failure_html(message: &str) -> String {
    ResultsView::Failure(message.to_string())
        .to_html()
        .unwrap_or_default()
}

fn render_page(status: Status, page: IndexPage) -> PageResponse {
    match page.render() {
        Ok(html) => (status, RawHtml(html)),
        Err(e) => {
            error!("Failed to render page: {}", e);
            (
                Status::InternalServerError,
                RawHtml("<p>Internal server error</p>".to_string()),
            )
        }
    }
}
