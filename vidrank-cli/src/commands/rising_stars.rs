use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use vidrank_core::discover::find_rising_stars;
use vidrank_core::ingest::load_channels;

#[derive(Args, Debug)]
pub struct RisingStarsArgs {
    /// JSON array of channel records
    pub channels: PathBuf,

    /// Minimum subscriber count (inclusive)
    #[arg(long, default_value_t = 1_000)]
    pub min: u64,

    /// Maximum subscriber count (inclusive)
    #[arg(long, default_value_t = 100_000)]
    pub max: u64,

    /// Channels to list
    #[arg(long, default_value_t = 10)]
    pub limit: usize,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &RisingStarsArgs) -> anyhow::Result<()> {
    if args.min > args.max {
        anyhow::bail!("--min ({}) exceeds --max ({})", args.min, args.max);
    }
    if !args.channels.exists() {
        anyhow::bail!("Channel file not found: {}", args.channels.display());
    }
    let channels = load_channels(&args.channels)
        .with_context(|| format!("Cannot load channels: {}", args.channels.display()))?;
    let stars = find_rising_stars(&channels, args.min, args.max, args.limit);
    tracing::info!(candidates = channels.len(), selected = stars.len(), "Rising stars");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&stars)?);
        return Ok(());
    }

    println!(
        "Rising stars ({}-{} subscribers): {} of {} channels",
        args.min,
        args.max,
        stars.len(),
        channels.len()
    );
    for (i, c) in stars.iter().enumerate() {
        println!(
            "{:>3}. {} ({}) subscribers={} views={}",
            i + 1,
            c.title,
            c.id,
            c.subscriber_count.unwrap_or(0),
            c.total_view_count.unwrap_or(0)
        );
    }
    Ok(())
}
