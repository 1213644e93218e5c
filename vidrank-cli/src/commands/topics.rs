use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use vidrank_core::discover::find_blue_ocean_topics;
use vidrank_core::ingest::load_batch;

#[derive(Args, Debug)]
pub struct TopicsArgs {
    /// Batch file whose titles are sampled
    pub batch: PathBuf,

    /// Category name used in suggested titles
    #[arg(long)]
    pub category: String,

    /// Topics to list
    #[arg(long, default_value_t = 10)]
    pub limit: usize,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &TopicsArgs) -> anyhow::Result<()> {
    if !args.batch.exists() {
        anyhow::bail!("Batch file not found: {}", args.batch.display());
    }
    let items = load_batch(&args.batch)
        .with_context(|| format!("Cannot parse batch: {}", args.batch.display()))?;
    let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
    let topics = find_blue_ocean_topics(&titles, &args.category, args.limit);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&topics)?);
        return Ok(());
    }

    println!("Blue ocean topics for {} ({} titles sampled)", args.category, titles.len());
    for t in &topics {
        println!(
            "  {:<20} mentions={:<3} score={:>6.2}  \"{}\"",
            t.topic, t.mention_count, t.opportunity_score, t.suggested_title
        );
    }
    Ok(())
}
