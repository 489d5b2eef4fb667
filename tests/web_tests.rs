//! Upload form routes, driven through Rocket's local client

use std::net::{IpAddr, Ipv4Addr};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use resume_scanner::web::build_rocket;
use resume_scanner::{ApiResponse, MatchTransport, SubmissionError, SubmissionRequest};
use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use scraper::{Html, Selector};

const BOUNDARY: &str = "X-RESUME-SCANNER-BOUNDARY";

/// Replies with a fixed response and remembers what it was sent.
struct RecordingTransport {
    reply: Mutex<Option<Result<ApiResponse, SubmissionError>>>,
    seen: Mutex<Vec<SubmissionRequest>>,
}

impl RecordingTransport {
    fn replying(reply: Result<ApiResponse, SubmissionError>) -> Arc<Self> {
        Arc::new(Self {
            reply: Mutex::new(Some(reply)),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn seen(&self) -> Vec<SubmissionRequest> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl MatchTransport for RecordingTransport {
    async fn send(&self, request: SubmissionRequest) -> Result<ApiResponse, SubmissionError> {
        self.seen.lock().unwrap().push(request);
        self.reply
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Err(SubmissionError::Transport("no reply left".to_string())))
    }
}

async fn client_for(transport: Arc<RecordingTransport>) -> Client {
    let rocket = build_rocket(transport, IpAddr::V4(Ipv4Addr::LOCALHOST), 0);
    Client::tracked(rocket).await.expect("valid rocket instance")
}

/// A picked file as the browser sends it: name, part content type, bytes.
type FilePart<'a> = (&'a str, &'a str, &'a [u8]);

fn part<'a>(name: &'a str, content_type: &'a str, content: &'a [u8]) -> FilePart<'a> {
    (name, content_type, content)
}

fn pdf<'a>(name: &'a str, content: &'a [u8]) -> FilePart<'a> {
    part(name, "application/pdf", content)
}

fn multipart_body(file: Option<FilePart<'_>>, jd_text: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();

    if let Some((name, content_type, content)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"resume_file\"; filename=\"{name}\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }

    if let Some(text) = jd_text {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"jd_text\"\r\n\r\n{text}\r\n"
            )
            .as_bytes(),
        );
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn multipart_type() -> ContentType {
    ContentType::new("multipart", "form-data").with_params(("boundary", BOUNDARY))
}

fn texts(html: &str, selector: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse(selector).unwrap();
    document
        .select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect()
}

#[rocket::async_test]
async fn test_index_serves_upload_form() {
    let client = client_for(RecordingTransport::replying(Ok(ApiResponse::new(200, "{}")))).await;

    let response = client.get("/").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.content_type(), Some(ContentType::HTML));

    let html = response.into_string().await.unwrap();
    let document = Html::parse_document(&html);
    let file_input = Selector::parse(r#"form#upload-form input[type="file"][name="resume_file"]"#).unwrap();
    let textarea = Selector::parse(r#"form#upload-form textarea[name="jd_text"]"#).unwrap();
    let spinner = Selector::parse("#spinner[hidden]").unwrap();

    assert_eq!(document.select(&file_input).count(), 1);
    assert_eq!(document.select(&textarea).count(), 1);
    assert_eq!(document.select(&spinner).count(), 1);
    assert!(texts(&html, "#results").iter().all(|t| t.is_empty()));
}

#[rocket::async_test]
async fn test_health() {
    let client = client_for(RecordingTransport::replying(Ok(ApiResponse::new(200, "{}")))).await;

    let response = client.get("/health").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(response.into_string().await.unwrap(), "ok");
}

#[rocket::async_test]
async fn test_submit_renders_results() {
    let transport = RecordingTransport::replying(Ok(ApiResponse::new(
        200,
        r#"{"match_percentage": 50, "matched_skills": ["Python"], "missing_skills": ["Docker"],
            "missing_context": {"Docker": ["Experience with Docker required."]},
            "suggestions": ["Add a Docker project"]}"#,
    )));
    let client = client_for(transport.clone()).await;

    let response = client
        .post("/")
        .header(multipart_type())
        .body(multipart_body(
            Some(pdf("cv.pdf", b"%PDF-1.4 resume")),
            Some("Python and Docker"),
        ))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    let html = response.into_string().await.unwrap();

    assert_eq!(
        texts(&html, "#results ul.missing-context > li.missing-skill strong"),
        vec!["Docker"]
    );
    assert_eq!(
        texts(&html, "#results ul.missing-context li.missing-skill ul > li"),
        vec!["Experience with Docker required."]
    );
    assert_eq!(texts(&html, "#results ul.suggestions > li"), vec!["Add a Docker project"]);
    assert!(texts(&html, ".alert").is_empty());

    let seen = transport.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].resume.file_name, "cv.pdf");
    assert_eq!(seen[0].resume.content, b"%PDF-1.4 resume");
    assert_eq!(seen[0].jd_text, "Python and Docker");
}

#[rocket::async_test]
async fn test_submit_without_file_alerts() {
    let transport = RecordingTransport::replying(Ok(ApiResponse::new(200, "{}")));
    let client = client_for(transport.clone()).await;

    let response = client
        .post("/")
        .header(multipart_type())
        .body(multipart_body(None, Some("Python")))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::BadRequest);
    let html = response.into_string().await.unwrap();
    assert_eq!(texts(&html, ".alert"), vec!["Please select your resume PDF."]);
    assert!(transport.seen().is_empty());
}

#[rocket::async_test]
async fn test_submit_blank_text_alerts_and_keeps_input() {
    let transport = RecordingTransport::replying(Ok(ApiResponse::new(200, "{}")));
    let client = client_for(transport.clone()).await;

    let response = client
        .post("/")
        .header(multipart_type())
        .body(multipart_body(Some(pdf("cv.pdf", b"%PDF")), Some("   ")))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::BadRequest);
    let html = response.into_string().await.unwrap();
    assert_eq!(texts(&html, ".alert"), vec!["Please paste the job description text."]);
    assert!(transport.seen().is_empty());
}

#[rocket::async_test]
async fn test_submit_server_error_shows_payload() {
    let transport = RecordingTransport::replying(Ok(ApiResponse::new(
        400,
        r#"{"detail":"Resume must be a PDF."}"#,
    )));
    let client = client_for(transport).await;

    let response = client
        .post("/")
        .header(multipart_type())
        .body(multipart_body(Some(pdf("cv.pdf", b"%PDF")), Some("<b>SQL</b>")))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    let html = response.into_string().await.unwrap();

    let pre = texts(&html, "#results div.error > pre");
    assert_eq!(pre.len(), 1);
    assert!(pre[0].contains("Resume must be a PDF."));
    assert!(texts(&html, "#results h2").is_empty());

    // entered text is echoed back escaped
    assert!(!html.contains("<b>SQL</b>"));
    assert_eq!(texts(&html, "textarea#jdtext"), vec!["<b>SQL</b>"]);
}

#[rocket::async_test]
async fn test_submit_transport_failure_shows_generic_error() {
    let transport = RecordingTransport::replying(Err(SubmissionError::Transport(
        "connection refused".to_string(),
    )));
    let client = client_for(transport).await;

    let response = client
        .post("/")
        .header(multipart_type())
        .body(multipart_body(Some(pdf("cv.pdf", b"%PDF")), Some("SQL")))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    let html = response.into_string().await.unwrap();
    assert_eq!(
        texts(&html, "#results div.error > p"),
        vec!["Error: request failed: connection refused"]
    );
}

#[rocket::async_test]
async fn test_submit_forwards_named_empty_file() {
    let transport = RecordingTransport::replying(Ok(ApiResponse::new(
        400,
        r#"{"detail":"Could not extract text from the PDF."}"#,
    )));
    let client = client_for(transport.clone()).await;

    let response = client
        .post("/")
        .header(multipart_type())
        .body(multipart_body(Some(pdf("empty.pdf", b"")), Some("SQL")))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    let html = response.into_string().await.unwrap();
    assert!(texts(&html, ".alert").is_empty());

    let seen = transport.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].resume.file_name, "empty.pdf");
    assert!(seen[0].resume.content.is_empty());
}

#[rocket::async_test]
async fn test_submit_unnamed_empty_part_alerts() {
    let transport = RecordingTransport::replying(Ok(ApiResponse::new(200, "{}")));
    let client = client_for(transport.clone()).await;

    let response = client
        .post("/")
        .header(multipart_type())
        .body(multipart_body(
            Some(part("", "application/octet-stream", b"")),
            Some("SQL"),
        ))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::BadRequest);
    let html = response.into_string().await.unwrap();
    assert_eq!(texts(&html, ".alert"), vec!["Please select your resume PDF."]);
    assert!(transport.seen().is_empty());
}

#[rocket::async_test]
async fn test_submit_keeps_extension_of_generic_part() {
    let transport = RecordingTransport::replying(Ok(ApiResponse::new(
        200,
        r#"{"match_percentage": 0, "matched_skills": [], "missing_skills": [], "suggestions": []}"#,
    )));
    let client = client_for(transport.clone()).await;

    let response = client
        .post("/")
        .header(multipart_type())
        .body(multipart_body(
            Some(part("cv.pdf", "application/octet-stream", b"%PDF-1.4")),
            Some("SQL"),
        ))
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    let seen = transport.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].resume.file_name, "cv.pdf");
    assert_eq!(seen[0].resume.content_type(), "application/pdf");
}

#[rocket::async_test]
async fn test_submit_without_extension_defaults_to_pdf() {
    let transport = RecordingTransport::replying(Ok(ApiResponse::new(
        200,
        r#"{"match_percentage": 0, "matched_skills": [], "missing_skills": [], "suggestions": []}"#,
    )));
    let client = client_for(transport.clone()).await;

    client
        .post("/")
        .header(multipart_type())
        .body(multipart_body(
            Some(part("resume", "application/octet-stream", b"%PDF-1.4")),
            Some("SQL"),
        ))
        .dispatch()
        .await;

    let seen = transport.seen();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].resume.file_name, "resume.pdf");
}
