// src/cli.rs
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;

use crate::core::{FormInput, ResumeFile, ScoringClient, SubmissionHandler, SubmissionOutcome};
use crate::environment::{EnvironmentConfig, DEFAULT_CONFIG_PATH};
use crate::render::OutputFormat;
use crate::surface::ConsoleSurface;

#[derive(Parser, Debug)]
#[command(name = "resume-scanner")]
#[command(about = "Score a resume against a job description with the resume scanner API")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Environment config file with `local` and `production` sections
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Scoring API base URL, overrides the config file and environment
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Request timeout in seconds (no timeout by default)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Submit a resume and job description once and print the results
    Submit(SubmitArgs),
    /// Serve the upload form on a local web server
    Serve {
        #[arg(long, default_value = "127.0.0.1")]
        address: IpAddr,
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
}

#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Resume file (PDF)
    #[arg(long)]
    pub resume: Option<PathBuf>,

    /// Job description text
    #[arg(long, conflicts_with = "jd_file")]
    pub jd: Option<String>,

    /// Read the job description from a file
    #[arg(long)]
    pub jd_file: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Html)]
    pub format: OutputFormat,

    /// Write results to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl Cli {
    pub fn load_config(&self) -> Result<EnvironmentConfig> {
        let config = EnvironmentConfig::load(&self.config, self.api_url.clone())?;
        Ok(config.with_timeout(self.timeout))
    }
}

pub async fn handle_command(cli: Cli) -> Result<ExitCode> {
    let config = cli.load_config()?;
    let client = ScoringClient::new(&config.api_base_url, config.timeout_seconds)?;
    info!("Scoring API: {}", client.match_url());

    match cli.command {
        Command::Submit(args) => {
            let outcome = run_submit(args, client).await?;
            Ok(ExitCode::from(exit_status(&outcome)))
        }
        Command::Serve { address, port } => {
            crate::web::start_web_server(Arc::new(client), address, port).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// One submission through the terminal surface. Results go to stdout or
/// `--output`, alerts to stderr.
pub async fn run_submit(args: SubmitArgs, client: ScoringClient) -> Result<SubmissionOutcome> {
    let resume = match &args.resume {
        Some(path) => Some(ResumeFile::from_path(path).await?),
        None => None,
    };

    let jd_text = match (&args.jd, &args.jd_file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read job description: {}", path.display()))?,
        (None, None) => String::new(),
    };

    let surface = Arc::new(ConsoleSurface::new(args.format, args.output));
    let handler = SubmissionHandler::attach(Arc::new(client), surface);

    let outcome = handler.on_submit(FormInput::new(resume, jd_text)).await;
    handler.detach();

    Ok(outcome)
}

/// 0 on a rendered match, 2 when the form was rejected, 1 otherwise.
pub fn exit_status(outcome: &SubmissionOutcome) -> u8 {
    match outcome {
        SubmissionOutcome::Matched => 0,
        SubmissionOutcome::Rejected(_) => 2,
        _ => 1,
    }
}
