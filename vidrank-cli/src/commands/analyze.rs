use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use vidrank_core::analysis::{AnalysisRequest, Analyzer};
use vidrank_core::cache::TtlCache;
use vidrank_core::config::VidrankConfig;
use vidrank_core::ingest::parse_batch;
use vidrank_core::render::{OutputFormat, renderer_for};
use vidrank_core::types::{
    ChannelContext, DurationFilter, MetricItem, RankingKey, RegionFilter, SelectMode,
};

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Batch files or glob patterns (e.g. "data/*.json")
    #[arg(required = true)]
    pub patterns: Vec<String>,

    /// Ranking metric for tiers: engagement, popularity
    #[arg(long, default_value = "popularity")]
    pub rank_by: RankingKey,

    /// Which end of the score distribution to list: top, bottom
    #[arg(long, default_value = "top")]
    pub view: SelectMode,

    /// Items to list (default: filters.default_count)
    #[arg(long)]
    pub count: Option<usize>,

    /// Duration bucket: all, short, long, unknown
    #[arg(long, default_value = "all")]
    pub duration: DurationFilter,

    /// Short/long boundary in seconds (default: filters.short_threshold_seconds)
    #[arg(long)]
    pub threshold: Option<u64>,

    /// Audience region: all, korea, overseas
    #[arg(long, default_value = "all")]
    pub region: RegionFilter,

    /// Channel subscriber count, enables retention scoring
    #[arg(long)]
    pub subscribers: Option<u64>,

    /// Output format: text, markdown, json, csv
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Write one report per batch into this directory instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl AnalyzeArgs {
    fn request(&self) -> AnalysisRequest {
        AnalysisRequest {
            ranking_key: self.rank_by,
            select_mode: self.view,
            count: self.count,
            duration_filter: self.duration,
            threshold_seconds: self.threshold,
            region_filter: self.region,
            channel: self.subscribers.map(|subs| ChannelContext {
                subscriber_count: Some(subs),
            }),
        }
    }
}

fn read_batch(path: &Path) -> anyhow::Result<Vec<MetricItem>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read batch: {}", path.display()))?;
    parse_batch(&text).with_context(|| format!("Cannot parse batch: {}", path.display()))
}

pub fn run(args: &AnalyzeArgs, config: &VidrankConfig) -> anyhow::Result<()> {
    let files = super::expand_patterns(&args.patterns)?;
    tracing::info!(files = files.len(), "Analyzing batches");

    let batches = files
        .iter()
        .map(|path| read_batch(path))
        .collect::<anyhow::Result<Vec<_>>>()?;

    // Identical batches across the matched files are analysed once.
    let analyzer = Analyzer::new(config.clone());
    let request = args.request();
    let mut cache = TtlCache::new();
    let reports = files
        .iter()
        .zip(&batches)
        .map(|(path, batch)| {
            analyzer
                .run_cached(batch, &request, &mut cache)
                .with_context(|| format!("Cannot analyze {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let stats = cache.stats();
    tracing::debug!(hits = stats.hits, misses = stats.misses, "Cache stats");

    let renderer = renderer_for(args.format, &config.render);
    let multiple = files.len() > 1;

    for (path, report) in files.iter().zip(&reports) {
        if let Some(dir) = &args.output {
            let stem = path
                .file_stem()
                .map_or_else(|| "report".to_string(), |s| s.to_string_lossy().to_string());
            let written = renderer
                .write(report, dir, &stem)
                .with_context(|| format!("Rendering failed: {}", path.display()))?;
            println!("Wrote {}", written.display());
        } else {
            let out = renderer
                .render(report)
                .with_context(|| format!("Rendering failed: {}", path.display()))?;
            if multiple && matches!(args.format, OutputFormat::Text | OutputFormat::Markdown) {
                println!("==> {} <==", path.display());
            }
            print!("{out}");
            if multiple {
                println!();
            }
        }
    }
    Ok(())
}
