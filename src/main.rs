//! CLI entry point for the student transcript tool.
//!
//! Provides subcommands for building a transcript from a saved
//! `getStudentData` response and for fetching one live from a portal.

mod infra;
mod services;

use crate::infra::powerschool::{PortalConfig, PowerSchoolClient};
use crate::services::transcript_api::TranscriptApi;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::ffi::OsStr;
use std::path::Path;
use student_transcript::{
    fetch::{BasicClient, fetch_bytes},
    model::Student,
    output::{print_json, print_pretty, print_summary, write_json},
    parser::parse_response,
    session::Session,
    transcript::build,
};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "transcript")]
#[command(about = "Builds a student transcript from a student-information service", long_about = None)]
struct Cli {
    /// How to log the built transcript
    #[arg(short, long, value_enum, global = true, default_value_t = Format::Summary)]
    format: Format,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// One line per section
    Summary,
    /// Debug pretty-print (logged at debug level)
    Pretty,
    /// Pretty-printed JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a transcript from a saved response file or URL
    Build {
        /// Path to file or URL to fetch
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// JSON file to write the transcript to
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Fetch a transcript from the portal using an existing session
    Fetch {
        /// JSON file holding the session returned by the portal's login call
        #[arg(short, long)]
        session: String,

        /// JSON file to write the transcript to
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/transcript.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("transcript.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build { source, output } => {
            let bytes = fetcher(&source).await?;
            let raw = parse_response(&bytes)?;
            let student = build(&raw)?;

            emit(&student, cli.format, output.as_deref())?;
        }
        Commands::Fetch { session, output } => {
            let session = Session::load(&session)?;
            let client = PowerSchoolClient::new(PortalConfig::from_env()?)?;

            info!("Fetching student data from portal");
            let raw = client.fetch_transcript(&session).await?;
            let student = build(&raw)?;

            emit(&student, cli.format, output.as_deref())?;
        }
    }

    Ok(())
}

/// Loads a saved response from a local file path or fetches it over HTTP.
#[tracing::instrument(fields(source = %url))]
async fn fetcher(url: &str) -> Result<Vec<u8>> {
    let bytes = if url.starts_with("http") {
        let client = BasicClient::new();
        fetch_bytes(&client, url).await?
    } else {
        std::fs::read(url).with_context(|| format!("failed to read {url}"))?
    };
    Ok(bytes)
}

/// Logs the transcript in the chosen format and writes it if asked to.
fn emit(student: &Student, format: Format, output: Option<&str>) -> Result<()> {
    match format {
        Format::Summary => print_summary(student),
        Format::Pretty => print_pretty(student),
        Format::Json => print_json(student)?,
    }

    if let Some(path) = output {
        write_json(path, student)?;
        info!(path, "Transcript written");
    }

    Ok(())
}
