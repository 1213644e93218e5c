pub mod analyze;
pub mod init;
pub mod rising_stars;
pub mod score;
pub mod topics;

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Subcommand;

use vidrank_core::config::{CONFIG_FILE_NAME, VidrankConfig};

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default vidrank.toml
    Init(init::InitArgs),
    /// Score a single item from its counters
    Score(score::ScoreArgs),
    /// Analyze batch files: tiers, top/bottom view, summary
    Analyze(analyze::AnalyzeArgs),
    /// Find fast-growing channels in a subscriber range
    RisingStars(rising_stars::RisingStarsArgs),
    /// Suggest under-covered topics from a batch's titles
    Topics(topics::TopicsArgs),
}

pub fn run(cmd: Command, config: Option<&Path>) -> anyhow::Result<()> {
    match cmd {
        Command::Init(args) => init::run(&args),
        Command::Score(args) => score::run(&args, &load_config(config)?),
        Command::Analyze(args) => analyze::run(&args, &load_config(config)?),
        Command::RisingStars(args) => rising_stars::run(&args),
        Command::Topics(args) => topics::run(&args),
    }
}

/// Explicit `--config` path, else `./vidrank.toml` if it exists, else defaults.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<VidrankConfig> {
    let path: Option<PathBuf> = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => {
            let local = PathBuf::from(CONFIG_FILE_NAME);
            local.exists().then_some(local)
        }
    };
    let config = VidrankConfig::load_or_default(path.as_deref()).with_context(|| {
        format!(
            "Cannot load config: {}",
            path.as_deref().map_or_else(|| "<defaults>".to_string(), |p| p.display().to_string())
        )
    })?;
    tracing::debug!(path = ?path, "Config resolved");
    Ok(config)
}

/// Expand glob patterns into a sorted, de-duplicated list of files.
pub(crate) fn expand_patterns(patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let matches = glob::glob(pattern)
            .with_context(|| format!("Invalid glob pattern: {pattern}"))?;
        let before = files.len();
        for entry in matches {
            let path = entry.with_context(|| format!("Cannot read path matched by {pattern}"))?;
            if path.is_file() {
                files.push(path);
            }
        }
        if files.len() == before {
            anyhow::bail!("No files match: {pattern}");
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}
