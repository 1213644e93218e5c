use std::path::PathBuf;

use clap::Parser;
use vidrank_core::error::{ConfigError, IngestError, RenderError, ScoreError, VidrankError};

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "vidrank",
    version,
    about = "Score engagement and classify performance tiers for video metrics"
)]
struct Cli {
    #[command(subcommand)]
    command: commands::Command,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Config file (default: ./vidrank.toml when present)
    #[arg(long, global = true, env = "VIDRANK_CONFIG")]
    config: Option<PathBuf>,
}

/// Exit code for a typed cause in the chain, outermost first.
fn typed_exit_code(err: &anyhow::Error) -> Option<i32> {
    err.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<VidrankError>() {
            Some(match e {
                VidrankError::Config(_) => 2,
                VidrankError::Ingest(ingest) => ingest_exit_code(ingest),
                VidrankError::Score(_) => 4,
                VidrankError::Render(_) => 7,
            })
        } else if cause.is::<ConfigError>() {
            Some(2)
        } else if let Some(ingest) = cause.downcast_ref::<IngestError>() {
            Some(ingest_exit_code(ingest))
        } else if cause.is::<ScoreError>() {
            Some(4)
        } else if cause.is::<RenderError>() {
            Some(7)
        } else if cause.is::<std::io::Error>() {
            Some(3)
        } else {
            None
        }
    })
}

fn ingest_exit_code(err: &IngestError) -> i32 {
    match err {
        IngestError::Io(_) => 3,
        IngestError::Json(_) | IngestError::NoItems(_) => 4,
    }
}

/// Map an error to a process exit code.
///
/// Exit codes:
///   0: success
///   1: general/unknown error
///   2: configuration error
///   3: input file not found
///   4: invalid input data
///   7: render failed
///
/// Typed causes decide first; the message is only inspected for untyped errors.
fn classify_exit_code(err: &anyhow::Error) -> i32 {
    if let Some(code) = typed_exit_code(err) {
        return code;
    }

    let lower = format!("{err:#}").to_lowercase();
    if lower.contains("no files match") {
        3 // input not found
    } else if lower.contains("config") {
        2 // config error
    } else if lower.contains("cannot read") || lower.contains("not found") {
        3
    } else if lower.contains("invalid input") || lower.contains("json error") {
        4 // invalid input data
    } else if lower.contains("render") {
        7 // render failed
    } else {
        1 // general error
    }
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity
    let filter = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (_, 0) => "warn",
        (_, 1) => "info",
        (_, 2) => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();

    match commands::run(cli.command, cli.config.as_deref()) {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(classify_exit_code(&e));
        }
    }
}
