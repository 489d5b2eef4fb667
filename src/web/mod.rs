// src/web/mod.rs
//! Local web front-end: serves the upload form and renders results pages

pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use anyhow::Result;
use rocket::data::{Limits, ToByteUnit};
use rocket::form::Form;
use rocket::{catchers, get, post, routes, Build, Rocket, State};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::info;

use crate::core::MatchTransport;

const MAX_UPLOAD_MIB: u64 = 10;

#[get("/")]
pub async fn index() -> PageResponse {
    handlers::index_handler().await
}

#[post("/", data = "<upload>")]
pub async fn submit(upload: Form<ResumeUploadForm<'_>>, state: &State<ServerState>) -> PageResponse {
    handlers::submit_handler(upload, state).await
}

#[get("/health")]
pub async fn health() -> &'static str {
    handlers::health_handler().await
}

#[rocket::catch(413)]
pub fn payload_too_large() -> &'static str {
    "Resume exceeds the 10 MiB upload limit"
}

/// Assemble the server without launching it.
pub fn build_rocket(transport: Arc<dyn MatchTransport>, address: IpAddr, port: u16) -> Rocket<Build> {
    let limits = Limits::default()
        .limit("file", MAX_UPLOAD_MIB.mebibytes())
        .limit("data-form", (MAX_UPLOAD_MIB + 1).mebibytes());

    let figment = rocket::Config::figment()
        .merge(("address", address))
        .merge(("port", port))
        .merge(("limits", limits))
        .merge(("log_level", "critical"));

    rocket::custom(figment)
        .manage(ServerState { transport })
        .register("/", catchers![payload_too_large])
        .mount("/", routes![index, submit, health])
}

pub async fn start_web_server(
    transport: Arc<dyn MatchTransport>,
    address: IpAddr,
    port: u16,
) -> Result<()> {
    info!("Starting resume scanner web front-end on http://{}:{}", address, port);

    build_rocket(transport, address, port)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Web server failed: {}", e))?;

    Ok(())
}
