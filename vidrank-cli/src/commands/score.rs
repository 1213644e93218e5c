use anyhow::Context;
use clap::Args;

use vidrank_core::config::VidrankConfig;
use vidrank_core::score::{compute_popularity_score, engagement_ratio};

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// View count
    #[arg(allow_negative_numbers = true)]
    pub views: f64,

    /// Like count
    #[arg(allow_negative_numbers = true)]
    pub likes: f64,

    /// Comment count
    #[arg(allow_negative_numbers = true)]
    pub comments: f64,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &ScoreArgs, config: &VidrankConfig) -> anyhow::Result<()> {
    let score = compute_popularity_score(args.views, args.likes, args.comments, &config.scoring)
        .context("Cannot score item")?;
    let engagement = engagement_ratio(args.views, args.likes, args.comments);

    if args.json {
        let value = serde_json::json!({
            "popularityScore": score,
            "engagementRate": engagement,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("popularity score: {score:.2}");
        println!("engagement rate:  {:.2}%", engagement * 100.0);
    }
    Ok(())
}
